use core::iter;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::grid_size;
use crate::*;

/// Rectangular board of tiles, indexed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    tiles: Array2<Tile>,
}

impl TileGrid {
    /// Builds a board with `mines` mines scattered uniformly at random.
    ///
    /// Asking for more mines than the board has tiles fills the whole board.
    pub fn new<R: Rng>(size: Coord2, mines: CellCount, rng: &mut R) -> Result<Self> {
        let mut grid = Self::empty(size)?;

        let total_cells = mult(size.0, size.1);
        let target = if mines > total_cells {
            log::warn!(
                "Board already full, requested {} mines but only {} fit",
                mines,
                total_cells
            );
            total_cells
        } else {
            mines
        };

        // rejection sampling, terminates since target never exceeds the tile count
        let mut mines_placed = 0;
        while mines_placed < target {
            let coords = (rng.random_range(0..size.0), rng.random_range(0..size.1));
            let tile = &mut grid[coords];
            if !tile.is_mine {
                tile.is_mine = true;
                mines_placed += 1;
            }
        }

        grid.compute_adjacency();
        Ok(grid)
    }

    /// Builds a board with mines at exactly the given coordinates.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::empty(size)?;

        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid[coords].is_mine = true;
        }

        grid.compute_adjacency();
        Ok(grid)
    }

    fn empty(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self {
            tiles: Array2::default(size.to_nd_index()),
        })
    }

    fn compute_adjacency(&mut self) {
        let (x_end, y_end) = self.size();
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                if !self[coords].is_mine {
                    let count = self.count_in_block(coords, |tile| tile.is_mine);
                    self[coords].adjacent_mines = count;
                }
            }
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.tiles)
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Mines in the clamped 3x3 block centered on `coords`.
    pub fn mine_count_in_neighborhood(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_in_block(coords, |tile| tile.is_mine))
    }

    /// Flags in the clamped 3x3 block centered on `coords`.
    pub fn flag_count_in_neighborhood(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_in_block(coords, |tile| tile.is_flagged))
    }

    /// Live mines on the whole board.
    pub fn count_mines(&self) -> CellCount {
        // bounded by the tile count, which fits
        self.tiles.iter().filter(|tile| tile.is_mine).count() as CellCount
    }

    /// Iterates over every tile in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((x, y), tile)| ((x as Coord, y as Coord), tile))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    /// The tile itself followed by its neighbors.
    pub(crate) fn iter_block(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        iter::once(coords).chain(self.iter_neighbors(coords))
    }

    pub(crate) fn count_in_block(&self, coords: Coord2, pred: impl Fn(&Tile) -> bool) -> u8 {
        // at most nine tiles
        self.iter_block(coords).filter(|&pos| pred(&self[pos])).count() as u8
    }
}

impl Index<Coord2> for TileGrid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for TileGrid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.tiles[coords.to_nd_index()]
    }
}
