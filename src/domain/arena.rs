//! Arena-backed store for the rooms of a map.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Which child slot of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// One location of the map.
#[derive(Debug)]
pub struct Room {
    name: String,
    /// Index of the left child in the arena
    pub left: Option<Index>,
    /// Index of the right child in the arena
    pub right: Option<Index>,
}

impl Room {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn child(&self, side: Side) -> Option<Index> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn exits(&self) -> Exits {
        Exits {
            left: self.left,
            right: self.right,
        }
    }

    pub fn is_dead_end(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The child slots of a room as seen from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exits {
    pub left: Option<Index>,
    pub right: Option<Index>,
}

impl Exits {
    pub fn has(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left.is_some(),
            Side::Right => self.right.is_some(),
        }
    }

    pub fn is_dead_end(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Arena-based binary tree of rooms.
///
/// Every room lives in the arena and is referenced by at most one parent
/// slot. Dropping the arena frees all rooms; [`MapArena::release`] does the
/// same in post-order and reports what it freed.
#[derive(Debug)]
pub struct MapArena {
    /// Arena storage for all rooms
    arena: Arena<Room>,
    /// Index of the root room, None for empty maps
    root: Option<Index>,
}

impl Default for MapArena {
    fn default() -> Self {
        Self::new()
    }
}

impl MapArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Creates a detached room with no children.
    ///
    /// The name is copied into storage reserved up front, so running out of
    /// memory surfaces as [`DomainError::Allocation`] instead of an abort.
    #[instrument(level = "trace", skip(self))]
    pub fn create_node(&mut self, name: &str) -> DomainResult<Index> {
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        let mut owned = String::new();
        owned
            .try_reserve_exact(name.len())
            .map_err(|source| DomainError::Allocation {
                what: "room name",
                source,
            })?;
        owned.push_str(name);

        let idx = self.arena.insert(Room {
            name: owned,
            left: None,
            right: None,
        });
        Ok(idx)
    }

    /// Points `parent`'s `side` slot at `child`.
    ///
    /// No cycle check: callers build valid trees (see `MapBuilder`).
    #[instrument(level = "trace", skip(self))]
    pub fn link(&mut self, parent: Index, side: Side, child: Index) -> DomainResult<()> {
        if !self.arena.contains(child) {
            return Err(DomainError::UnknownRoom(child));
        }
        let room = self
            .arena
            .get_mut(parent)
            .ok_or(DomainError::UnknownRoom(parent))?;
        match side {
            Side::Left => room.left = Some(child),
            Side::Right => room.right = Some(child),
        }
        Ok(())
    }

    pub fn set_root(&mut self, idx: Index) -> DomainResult<()> {
        if !self.arena.contains(idx) {
            return Err(DomainError::UnknownRoom(idx));
        }
        self.root = Some(idx);
        Ok(())
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn room(&self, idx: Index) -> Option<&Room> {
        self.arena.get(idx)
    }

    pub fn child(&self, idx: Index, side: Side) -> Option<Index> {
        self.room(idx).and_then(|room| room.child(side))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Rooms on the longest path from the root.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|r| (r, 1)).collect();
        while let Some((idx, level)) = stack.pop() {
            let Some(room) = self.room(idx) else {
                continue;
            };
            deepest = deepest.max(level);
            stack.extend(room.left.into_iter().chain(room.right).map(|c| (c, level + 1)));
        }
        deepest
    }

    /// Names of all dead-end rooms, left to right.
    pub fn leaf_names(&self) -> Vec<String> {
        self.iter_postorder()
            .filter(|(_, room)| room.is_dead_end())
            .map(|(_, room)| room.name.clone())
            .collect()
    }

    /// Frees every room, children strictly before their parent.
    ///
    /// Returns the names in the order they were freed. Rooms that are not
    /// reachable from the root are freed last, in arena order.
    #[instrument(level = "debug", skip(self))]
    pub fn release(mut self) -> Vec<String> {
        let order: Vec<Index> = self.iter_postorder().map(|(idx, _)| idx).collect();
        let mut released = Vec::with_capacity(self.arena.len());

        for idx in order {
            if let Some(room) = self.arena.remove(idx) {
                released.push(room.name);
            }
        }
        let remaining: Vec<Index> = self.arena.iter().map(|(idx, _)| idx).collect();
        let stray: Vec<String> = remaining
            .into_iter()
            .filter_map(|idx| self.arena.remove(idx))
            .map(|room| room.name)
            .collect();
        if !stray.is_empty() {
            debug!(count = stray.len(), "releasing unreachable rooms");
        }
        released.extend(stray);
        self.root = None;

        debug!(count = released.len(), "map released");
        released
    }
}

/// Post-order walk from the root: left subtree, right subtree, room.
pub struct PostOrderIterator<'a> {
    arena: &'a MapArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a MapArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a Room);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(room) = self.arena.room(current_idx) {
                if visited {
                    return Some((current_idx, room));
                }
                self.stack.push((current_idx, true));
                // Push right first so the left subtree is visited first
                if let Some(right) = room.right {
                    self.stack.push((right, false));
                }
                if let Some(left) = room.left {
                    self.stack.push((left, false));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_node_starts_without_children() {
        let mut map = MapArena::new();
        let idx = map.create_node("Cozinha").unwrap();
        let room = map.room(idx).unwrap();
        assert_eq!(room.name(), "Cozinha");
        assert!(room.left.is_none());
        assert!(room.right.is_none());
        assert!(room.is_dead_end());
    }

    #[test]
    fn create_node_rejects_empty_name() {
        let mut map = MapArena::new();
        assert!(matches!(map.create_node(""), Err(DomainError::EmptyName)));
        assert!(map.is_empty());
    }

    #[test]
    fn link_sets_requested_slot() {
        let mut map = MapArena::new();
        let parent = map.create_node("Biblioteca").unwrap();
        let child = map.create_node("Sala secreta").unwrap();
        map.link(parent, Side::Right, child).unwrap();

        assert_eq!(map.child(parent, Side::Right), Some(child));
        assert_eq!(map.child(parent, Side::Left), None);
    }

    #[test]
    fn link_rejects_index_from_other_map() {
        let mut map = MapArena::new();
        let parent = map.create_node("A").unwrap();
        let mut other = MapArena::new();
        let _ = other.create_node("x").unwrap();
        let stale = other.create_node("y").unwrap();
        let result = map.link(parent, Side::Left, stale);
        assert!(matches!(result, Err(DomainError::UnknownRoom(_))));
    }

    #[test]
    fn depth_follows_linked_chain_without_recursion() {
        let mut map = MapArena::new();
        let mut parent = map.create_node("r0").unwrap();
        map.set_root(parent).unwrap();
        for i in 1..100_000 {
            let child = map.create_node(&format!("r{i}")).unwrap();
            map.link(parent, Side::Left, child).unwrap();
            parent = child;
        }
        assert_eq!(map.depth(), 100_000);
    }

    #[test]
    fn depth_of_empty_map_is_zero() {
        assert_eq!(MapArena::new().depth(), 0);
    }
}
