//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Domain errors represent violations of the map's tree rules.
/// These are independent of how the map was loaded or displayed.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("room name must not be empty")]
    EmptyName,

    #[error("cannot allocate storage for {what}")]
    Allocation {
        what: &'static str,
        #[source]
        source: std::collections::TryReserveError,
    },

    #[error("unknown room index: {0:?}")]
    UnknownRoom(Index),

    #[error("duplicate room: {0}")]
    DuplicateRoom(String),

    #[error("room {room} links to unknown room: {target}")]
    UnknownTarget { room: String, target: String },

    #[error("room {child} has more than one parent: {first} and {second}")]
    MultipleParents {
        child: String,
        first: String,
        second: String,
    },

    #[error("room links to itself: {0}")]
    SelfLink(String),

    #[error("map has no root room (every room is somebody's child)")]
    NoRoot,

    #[error("map has more than one root room: {0:?}")]
    MultipleRoots(Vec<String>),

    #[error("room {room} is deeper than {limit} levels")]
    TooDeep { room: String, limit: usize },

    #[error("rooms not reachable from root {root}: {rooms:?}")]
    Unreachable { root: String, rooms: Vec<String> },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
