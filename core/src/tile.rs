use serde::{Deserialize, Serialize};

/// State of a single cell on the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) is_mine: bool,
    pub(crate) is_flagged: bool,
    pub(crate) is_revealed: bool,
    /// Only kept up to date for tiles without a mine.
    pub(crate) adjacent_mines: u8,
}

impl Tile {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// What a player is allowed to see of this tile.
    pub const fn view(&self) -> TileView {
        if self.is_flagged {
            TileView::Flagged
        } else if !self.is_revealed {
            TileView::Hidden
        } else if self.is_mine {
            TileView::Mine
        } else {
            TileView::Revealed(self.adjacent_mines)
        }
    }
}

/// Player-visible render attributes of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// A revealed mine, only ever seen once the game is over.
    Mine,
}

impl TileView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for TileView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_hides_unrevealed_mines() {
        let tile = Tile {
            is_mine: true,
            ..Default::default()
        };

        assert_eq!(tile.view(), TileView::Hidden);
    }

    #[test]
    fn flag_takes_precedence_in_view() {
        let tile = Tile {
            is_flagged: true,
            adjacent_mines: 3,
            ..Default::default()
        };

        assert_eq!(tile.view(), TileView::Flagged);
        assert!(tile.view().is_unrevealed());
    }

    #[test]
    fn revealed_tile_shows_count_or_mine() {
        let safe = Tile {
            is_revealed: true,
            adjacent_mines: 2,
            ..Default::default()
        };
        let mine = Tile {
            is_revealed: true,
            is_mine: true,
            ..Default::default()
        };

        assert_eq!(safe.view(), TileView::Revealed(2));
        assert_eq!(mine.view(), TileView::Mine);
    }
}
