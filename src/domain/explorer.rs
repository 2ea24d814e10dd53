//! Traversal state machine over a [`MapArena`].
//!
//! The explorer holds a cursor on the current room and moves it only
//! downwards, one child at a time. It does no I/O: the caller renders each
//! [`Arrival`], feeds parsed [`Command`]s to [`Explorer::apply`] and renders
//! the resulting [`Event`].

use std::fmt;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{Exits, MapArena, Side};

/// A normalized user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Side),
    Quit,
    Invalid(char),
}

impl Command {
    pub const LEFT: char = 'e';
    pub const RIGHT: char = 'd';
    pub const QUIT: char = 's';

    /// Normalize one input line.
    ///
    /// The first non-whitespace character decides, case-insensitively.
    /// A blank line or end of input (`None`) means quit.
    pub fn parse(line: Option<&str>) -> Self {
        let first = line.and_then(|l| l.chars().find(|c| !c.is_whitespace()));
        match first {
            None => Command::Quit,
            Some(c) => Self::from_char(c.to_lowercase().next().unwrap_or(c)),
        }
    }

    pub fn from_char(c: char) -> Self {
        match c {
            Self::LEFT => Command::Move(Side::Left),
            Self::RIGHT => Command::Move(Side::Right),
            Self::QUIT => Command::Quit,
            other => Command::Invalid(other),
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// Reached a room without children
    DeadEnd,
    /// The user asked to quit (or input ran out)
    UserQuit,
    /// The map had no root
    EmptyMap,
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stop::DeadEnd => write!(f, "dead end"),
            Stop::UserQuit => write!(f, "user quit"),
            Stop::EmptyMap => write!(f, "empty map"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Active(Index),
    Stopped(Stop),
}

/// What the cursor sees when a turn begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival<'a> {
    /// A room with at least one way on
    Room { name: &'a str, exits: Exits },
    /// A room without children; the explorer has stopped
    DeadEnd { name: &'a str },
    /// Nothing to show, the session is over
    Stopped(Stop),
}

/// Outcome of applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Moved { from: Index, to: Index },
    /// The requested side has no room; the cursor did not move
    NoPath(Side),
    /// Unrecognized command; the cursor did not move
    Invalid(char),
    Stopped(Stop),
}

pub struct Explorer<'a> {
    map: &'a MapArena,
    state: State,
    trail: Vec<Index>,
}

impl<'a> Explorer<'a> {
    pub fn new(map: &'a MapArena) -> Self {
        match map.root() {
            Some(root) => Self {
                map,
                state: State::Active(root),
                trail: vec![root],
            },
            None => Self {
                map,
                state: State::Stopped(Stop::EmptyMap),
                trail: Vec::new(),
            },
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.state, State::Stopped(_))
    }

    /// Room under the cursor, if the session is still active.
    pub fn cursor(&self) -> Option<Index> {
        match self.state {
            State::Active(idx) => Some(idx),
            State::Stopped(_) => None,
        }
    }

    /// Rooms entered so far, starting with the root.
    pub fn trail(&self) -> Vec<&'a str> {
        self.trail
            .iter()
            .filter_map(|&idx| self.map.room(idx))
            .map(|room| room.name())
            .collect()
    }

    /// Start of a turn: report the current room.
    ///
    /// Landing on a room without children stops the explorer.
    #[instrument(level = "trace", skip(self))]
    pub fn arrive(&mut self) -> Arrival<'a> {
        let idx = match self.state {
            State::Active(idx) => idx,
            State::Stopped(stop) => return Arrival::Stopped(stop),
        };
        // The map is borrowed for the explorer's lifetime, so the cursor
        // always points at a live room.
        let Some(room) = self.map.room(idx) else {
            self.state = State::Stopped(Stop::DeadEnd);
            return Arrival::Stopped(Stop::DeadEnd);
        };
        let exits = room.exits();
        if exits.is_dead_end() {
            debug!(room = room.name(), "dead end");
            self.state = State::Stopped(Stop::DeadEnd);
            return Arrival::DeadEnd { name: room.name() };
        }
        Arrival::Room {
            name: room.name(),
            exits,
        }
    }

    /// Apply one command to the cursor.
    #[instrument(level = "trace", skip(self))]
    pub fn apply(&mut self, command: Command) -> Event {
        let idx = match self.state {
            State::Active(idx) => idx,
            State::Stopped(stop) => return Event::Stopped(stop),
        };
        match command {
            Command::Move(side) => match self.map.child(idx, side) {
                Some(to) => {
                    debug!(%side, "moved");
                    self.state = State::Active(to);
                    self.trail.push(to);
                    Event::Moved { from: idx, to }
                }
                None => Event::NoPath(side),
            },
            Command::Quit => {
                self.state = State::Stopped(Stop::UserQuit);
                Event::Stopped(Stop::UserQuit)
            }
            Command::Invalid(c) => Event::Invalid(c),
        }
    }
}
