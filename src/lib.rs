//! Interactive explorer for a mansion laid out as a binary tree of rooms.
//!
//! Layers, innermost first: [`domain`] (room tree, builder, explorer state
//! machine), [`application`] (map loading), [`infrastructure`] (I/O traits and
//! service wiring) and [`cli`] (arguments, dispatch, the interactive session).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
