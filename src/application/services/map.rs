//! Map loading service
//!
//! Produces the [`MapArena`] to explore: the built-in mansion or a room
//! table read from a TOML file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{layout, MapArena, MapBuilder, RoomSpec};
use crate::infrastructure::traits::FileSystem;

/// Where the map comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapSource {
    Builtin,
    File(PathBuf),
}

impl MapSource {
    /// File source if a path is given, otherwise the built-in mansion.
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(p) => MapSource::File(expand_path(p)),
            None => MapSource::Builtin,
        }
    }
}

impl fmt::Display for MapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapSource::Builtin => write!(f, "built-in mansion"),
            MapSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// On-disk map format.
///
/// ```toml
/// [[rooms]]
/// name = "Hall"
/// left = "Cozinha"
///
/// [[rooms]]
/// name = "Cozinha"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapFile {
    pub rooms: Vec<RoomSpec>,
}

/// Service for loading maps.
pub struct MapService {
    fs: Arc<dyn FileSystem>,
}

impl MapService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and build the map for `source`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, source: &MapSource) -> ApplicationResult<MapArena> {
        let rooms = match source {
            MapSource::Builtin => layout::mansion(),
            MapSource::File(path) => self.read_map_file(path)?.rooms,
        };
        debug!("load: {} rooms from {}", rooms.len(), source);
        Ok(MapBuilder::build(&rooms)?)
    }

    fn read_map_file(&self, path: &Path) -> ApplicationResult<MapFile> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::MapNotFound(path.to_path_buf()));
        }
        if !self.fs.is_file(path) {
            return Err(ApplicationError::MapFile {
                path: path.to_path_buf(),
                message: "not a file".to_string(),
            });
        }
        let content = self.fs.read_to_string(path).with_path_context("read map", path)?;
        Self::parse(&content, path)
    }

    /// Parse TOML map content; `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> ApplicationResult<MapFile> {
        toml::from_str(content).map_err(|e| ApplicationError::MapFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Expand `~` and `$VAR` in a user-supplied path.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw).unwrap_or_else(|_| shellexpand::tilde(&raw));
    PathBuf::from(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;

    #[derive(Default)]
    struct MemFs {
        files: HashMap<PathBuf, String>,
    }

    impl FileSystem for MemFs {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }
    }

    fn service_with(path: &str, content: &str) -> MapService {
        let mut fs = MemFs::default();
        fs.files.insert(PathBuf::from(path), content.to_string());
        MapService::new(Arc::new(fs))
    }

    #[test]
    fn builtin_source_loads_mansion() {
        let service = MapService::new(Arc::new(MemFs::default()));
        let map = service.load(&MapSource::Builtin).unwrap();
        assert_eq!(map.len(), 8);
    }

    #[test]
    fn file_source_builds_rooms() {
        let service = service_with(
            "/maps/casa.toml",
            r#"
[[rooms]]
name = "Hall"
right = "Quarto"

[[rooms]]
name = "Quarto"
"#,
        );
        let map = service
            .load(&MapSource::File(PathBuf::from("/maps/casa.toml")))
            .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.leaf_names(), vec!["Quarto"]);
    }

    #[test]
    fn missing_file_is_reported() {
        let service = MapService::new(Arc::new(MemFs::default()));
        let err = service
            .load(&MapSource::File(PathBuf::from("/nope.toml")))
            .unwrap_err();
        assert!(matches!(err, ApplicationError::MapNotFound(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = MapService::parse("[[rooms]]\nname = \"A\"\nup = \"B\"\n", Path::new("m.toml"))
            .unwrap_err();
        assert!(matches!(err, ApplicationError::MapFile { .. }));
    }

    #[test]
    fn empty_file_is_an_empty_map() {
        let service = service_with("/empty.toml", "");
        let map = service
            .load(&MapSource::File(PathBuf::from("/empty.toml")))
            .unwrap();
        assert!(map.is_empty());
    }
}
