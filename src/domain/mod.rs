//! Domain layer: the room tree and its explorer
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod explorer;
pub mod layout;

pub use arena::{Exits, MapArena, Room, Side};
pub use builder::{MapBuilder, RoomSpec, MAX_DEPTH};
pub use error::{DomainError, DomainResult};
pub use explorer::{Arrival, Command, Event, Explorer, State, Stop};
