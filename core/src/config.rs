use serde::{Deserialize, Serialize};

use crate::*;

/// Parameters a game session is built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    /// Requested mines, clamped to the board capacity when the grid is built.
    pub mines: CellCount,
    /// How many reveals are guaranteed not to hit a mine.
    pub mercy_credits: CellCount,
    /// Whether revealing a zero tile opens its whole region.
    pub chain_reveal: bool,
}

impl GameConfig {
    pub fn new(
        size: Coord2,
        mines: CellCount,
        mercy_credits: CellCount,
        chain_reveal: bool,
    ) -> Result<Self> {
        let config = Self {
            size,
            mines,
            mercy_credits,
            chain_reveal,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_presets(size: SizePreset, difficulty: DifficultyPreset) -> Self {
        let (width, height) = size.dimensions();
        let (mercy_credits, mines) = difficulty.budget(mult(width, height));
        Self {
            size: (width, height),
            mines,
            mercy_credits,
            chain_reveal: true,
        }
    }

    /// Rejects degenerate boards, also needed for configs that were deserialized.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            Err(GameError::InvalidConfiguration)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Mines that will actually be placed.
    pub fn effective_mines(&self) -> CellCount {
        self.mines.min(self.total_cells())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizePreset {
    Small,
    Medium,
    Large,
}

impl SizePreset {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    pub const fn dimensions(self) -> Coord2 {
        match self {
            Self::Small => (15, 5),
            Self::Medium => (30, 10),
            Self::Large => (60, 20),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyPreset {
    Easy,
    Medium,
    Hard,
}

impl DifficultyPreset {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// `(mercy_credits, mines)` for a board with `cells` tiles.
    pub const fn budget(self, cells: CellCount) -> (CellCount, CellCount) {
        match self {
            Self::Easy => (cells / 36, cells / 12),
            Self::Medium => (cells / 24, cells / 8),
            Self::Hard => (cells / 15, cells / 5),
        }
    }
}
