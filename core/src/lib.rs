//! Rule engine for single-player Minesweeper.
//!
//! A [`GameSession`] owns a [`TileGrid`] and applies the player moves (reveal, chord reveal, flag toggle) to it.
//! Rendering and input handling are left to the caller, which reads the board back through [`BoardView`].

#![no_std]

extern crate alloc;

use core::ops::BitOr;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod config;
mod engine;
mod error;
mod grid;
mod tile;
mod types;
mod view;

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of revealing one or more tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}

/// Merges outcomes of a multi-tile reveal, hitting a mine dominates.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Revealed, _) | (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
