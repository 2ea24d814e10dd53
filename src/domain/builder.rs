//! Map builder: turns a table of rooms into a linked [`MapArena`].

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::arena::{MapArena, Side};
use crate::domain::error::{DomainError, DomainResult};

/// One row of a map table: a room and the names of its children.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomSpec {
    pub name: String,
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
}

impl RoomSpec {
    pub fn new(name: &str, left: Option<&str>, right: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            left: left.map(str::to_string),
            right: right.map(str::to_string),
        }
    }

    fn children(&self) -> impl Iterator<Item = (Side, &str)> + '_ {
        [(Side::Left, &self.left), (Side::Right, &self.right)]
            .into_iter()
            .filter_map(|(side, child)| child.as_deref().map(|c| (side, c)))
    }
}

/// Longest root-to-leaf path, in rooms, that a table may describe.
pub const MAX_DEPTH: usize = 1024;

/// Constructs maps from room tables.
pub struct MapBuilder;

impl MapBuilder {
    /// Build a map from `rooms`.
    ///
    /// The table is checked before any room is created: names are unique,
    /// children exist, every room has at most one parent, exactly one room is
    /// nobody's child, every room is reachable from it, and no path is longer
    /// than [`MAX_DEPTH`] rooms. An empty table yields an empty map.
    #[instrument(level = "debug", skip(rooms), fields(rooms = rooms.len()))]
    pub fn build(rooms: &[RoomSpec]) -> DomainResult<MapArena> {
        let mut map = MapArena::new();
        if rooms.is_empty() {
            return Ok(map);
        }
        let root_name = Self::validate(rooms)?;

        let mut indices: HashMap<&str, Index> = HashMap::with_capacity(rooms.len());
        for spec in rooms {
            let idx = map.create_node(&spec.name)?;
            indices.insert(spec.name.as_str(), idx);
        }
        for spec in rooms {
            let parent = indices[spec.name.as_str()];
            for (side, child) in spec.children() {
                map.link(parent, side, indices[child])?;
            }
        }
        map.set_root(indices[root_name])?;

        debug!(root = root_name, rooms = map.len(), "map built");
        Ok(map)
    }

    /// Checks the table shape and returns the root's name.
    fn validate(rooms: &[RoomSpec]) -> DomainResult<&str> {
        let mut names = HashSet::with_capacity(rooms.len());
        for spec in rooms {
            if spec.name.is_empty() {
                return Err(DomainError::EmptyName);
            }
            if !names.insert(spec.name.as_str()) {
                return Err(DomainError::DuplicateRoom(spec.name.clone()));
            }
        }

        let mut parent_of: HashMap<&str, &str> = HashMap::new();
        for spec in rooms {
            for (_, child) in spec.children() {
                if child == spec.name {
                    return Err(DomainError::SelfLink(child.to_string()));
                }
                if !names.contains(child) {
                    return Err(DomainError::UnknownTarget {
                        room: spec.name.clone(),
                        target: child.to_string(),
                    });
                }
                if let Some(first) = parent_of.insert(child, &spec.name) {
                    return Err(DomainError::MultipleParents {
                        child: child.to_string(),
                        first: first.to_string(),
                        second: spec.name.clone(),
                    });
                }
            }
        }

        let roots: Vec<&str> = rooms
            .iter()
            .map(|spec| spec.name.as_str())
            .filter(|name| !parent_of.contains_key(name))
            .collect();
        let root = match roots.as_slice() {
            [] => return Err(DomainError::NoRoot),
            [root] => *root,
            many => {
                return Err(DomainError::MultipleRoots(
                    many.iter().map(|r| r.to_string()).collect(),
                ))
            }
        };

        // With one parent per room and a single root, anything the root
        // cannot reach sits on a cycle.
        let by_name: HashMap<&str, &RoomSpec> =
            rooms.iter().map(|spec| (spec.name.as_str(), spec)).collect();
        let mut reached = HashSet::with_capacity(rooms.len());
        let mut stack = vec![(root, 1)];
        while let Some((name, level)) = stack.pop() {
            if level > MAX_DEPTH {
                return Err(DomainError::TooDeep {
                    room: name.to_string(),
                    limit: MAX_DEPTH,
                });
            }
            if reached.insert(name) {
                stack.extend(by_name[name].children().map(|(_, child)| (child, level + 1)));
            }
        }
        if reached.len() != rooms.len() {
            let rooms = rooms
                .iter()
                .map(|spec| spec.name.as_str())
                .filter(|name| !reached.contains(name))
                .map(str::to_string)
                .collect();
            return Err(DomainError::Unreachable {
                root: root.to_string(),
                rooms,
            });
        }

        Ok(root)
    }
}
