use ndarray::Array2;

use crate::*;

/// Read-only view of a board exposing only what a player may see.
#[derive(Copy, Clone, Debug)]
pub struct BoardView<'a> {
    grid: &'a TileGrid,
}

impl<'a> BoardView<'a> {
    pub fn new(grid: &'a TileGrid) -> Self {
        Self { grid }
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn get(&self, coords: Coord2) -> Result<TileView> {
        Ok(self.grid.tile_at(coords)?.view())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, TileView)> + use<'a> {
        let grid = self.grid;
        grid.iter().map(|(coords, tile)| (coords, tile.view()))
    }

    /// Tiles of row `y`, left to right.
    pub fn row(&self, y: Coord) -> Result<impl Iterator<Item = TileView> + use<'a>> {
        let grid = self.grid;
        let (width, height) = grid.size();
        if y >= height {
            return Err(GameError::OutOfBounds);
        }
        Ok((0..width).map(move |x| grid[(x, y)].view()))
    }

    pub fn to_array(&self) -> Array2<TileView> {
        let mut tiles = Array2::default(self.size().to_nd_index());
        for (coords, view) in self.iter() {
            tiles[coords.to_nd_index()] = view;
        }
        tiles
    }

    pub fn revealed_count(&self) -> CellCount {
        // bounded by the tile count
        self.iter()
            .filter(|(_, view)| !view.is_unrevealed())
            .count() as CellCount
    }
}
