//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::MapService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    pub map_service: MapService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container reading map files through `fs`.
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            map_service: MapService::new(fs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::MapSource;
    use std::io;
    use std::path::{Path, PathBuf};

    struct OneFile {
        path: PathBuf,
        content: &'static str,
    }

    impl FileSystem for OneFile {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            if path == self.path {
                Ok(self.content.to_string())
            } else {
                Err(io::Error::from(io::ErrorKind::NotFound))
            }
        }

        fn exists(&self, path: &Path) -> bool {
            path == self.path
        }

        fn is_file(&self, path: &Path) -> bool {
            path == self.path
        }
    }

    #[test]
    fn configured_map_is_read_through_injected_filesystem() {
        let settings = Settings {
            map: Some(PathBuf::from("/maps/porao.toml")),
            color: false,
        };
        let fs = OneFile {
            path: PathBuf::from("/maps/porao.toml"),
            content: "[[rooms]]\nname = \"Porão\"\n",
        };
        let container = ServiceContainer::with_deps(settings, Arc::new(fs));

        let source = MapSource::from_option(container.settings.map.as_deref());
        let map = container.map_service.load(&source).unwrap();

        assert_eq!(map.leaf_names(), vec!["Porão"]);
    }
}
