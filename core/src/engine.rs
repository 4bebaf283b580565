use alloc::collections::{BTreeSet, VecDeque};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Over
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    InProgress,
    /// A mine was revealed, no more moves are accepted
    Over,
}

impl GameState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

/// A single game from the first move until a mine goes off.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    grid: TileGrid,
    mercy_credits: CellCount,
    flags_placed: CellCount,
    mines_remaining: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    pub fn new<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let grid = TileGrid::new(config.size, config.mines, rng)?;
        Ok(Self::from_parts(config, grid))
    }

    /// Reproducible game, the same seed always lays out the same board.
    pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, &mut SmallRng::seed_from_u64(seed))
    }

    /// Game on a prepared board, size and mine count are taken from `grid`.
    pub fn with_grid(grid: TileGrid, mercy_credits: CellCount, chain_reveal: bool) -> Self {
        let config = GameConfig {
            size: grid.size(),
            mines: grid.count_mines(),
            mercy_credits,
            chain_reveal,
        };
        Self::from_parts(config, grid)
    }

    fn from_parts(config: GameConfig, grid: TileGrid) -> Self {
        let mines_remaining = grid.count_mines();
        log::debug!(
            "new game {:?} with {} mines, {} mercy credits",
            config.size,
            mines_remaining,
            config.mercy_credits
        );
        Self {
            config,
            grid,
            mercy_credits: config.mercy_credits,
            flags_placed: 0,
            mines_remaining,
            state: GameState::default(),
            triggered_mine: None,
        }
    }

    /// Fresh game with the same settings on a newly generated board.
    pub fn restart<R: Rng>(&self, rng: &mut R) -> Result<Self> {
        Self::new(self.config, rng)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    /// `(width, height)` of the board.
    pub fn dimensions(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn board(&self) -> BoardView<'_> {
        BoardView::new(&self.grid)
    }

    pub fn tile_view_at(&self, coords: Coord2) -> Result<TileView> {
        self.board().get(coords)
    }

    pub fn mercy_credits(&self) -> CellCount {
        self.mercy_credits
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    pub fn mines_remaining(&self) -> CellCount {
        self.mines_remaining
    }

    /// Mines not yet covered by a flag, negative when a disarm left more flags than mines.
    pub fn unflagged_mine_count(&self) -> isize {
        (self.mines_remaining as isize) - (self.flags_placed as isize)
    }

    /// The mine that ended the game, if any.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Reveals a tile, opening its whole zero region when chain reveal is on.
    ///
    /// While mercy credits remain every call spends one, whether the tile holds a mine or not, and a mine under the
    /// tile is disarmed first. Flagged and already revealed tiles are left alone.
    pub fn reveal_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(self.reveal_from(coords))
    }

    /// Reveals every unflagged neighbor of a revealed tile whose count matches its adjacent flags.
    ///
    /// Flags are trusted as placed, a wrong flag can still lose the game.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.grid.validate_coords(coords)?;
        if self.state.is_over() {
            return Ok(NoChange);
        }

        let tile = self.grid[coords];
        if !tile.is_revealed
            || tile.adjacent_mines != self.grid.count_in_block(coords, |tile| tile.is_flagged)
        {
            return Ok(NoChange);
        }

        let mut outcome = NoChange;
        for pos in self.grid.iter_neighbors(coords) {
            if !self.grid[pos].is_flagged {
                outcome = outcome | self.reveal_from(pos);
            }
        }
        Ok(outcome)
    }

    /// Flags or unflags a hidden tile.
    ///
    /// New flags are refused once there are as many flags as live mines.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.grid.validate_coords(coords)?;
        if self.state.is_over() {
            return Ok(NoChange);
        }

        let tile = &mut self.grid[coords];
        Ok(if tile.is_revealed {
            NoChange
        } else if tile.is_flagged {
            tile.is_flagged = false;
            self.flags_placed -= 1;
            Changed
        } else if self.flags_placed >= self.mines_remaining {
            log::debug!(
                "flag at {:?} refused, {} flags already placed",
                coords,
                self.flags_placed
            );
            NoChange
        } else {
            tile.is_flagged = true;
            self.flags_placed += 1;
            Changed
        })
    }

    fn reveal_from(&mut self, coords: Coord2) -> RevealOutcome {
        let outcome = self.reveal_single_tile(coords, true);
        if outcome == RevealOutcome::Revealed
            && self.config.chain_reveal
            && self.grid[coords].adjacent_mines == 0
        {
            self.flood_fill(coords);
        }
        outcome
    }

    /// Opens the connected zero region around `origin` and its numbered border.
    ///
    /// Every tile reached here neighbors a zero tile, so none of them can hold a mine and no mercy credit is spent.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut scheduled = BTreeSet::from([origin]);
        let mut to_visit = VecDeque::new();
        self.schedule_hidden_neighbors(origin, &mut scheduled, &mut to_visit);
        log::trace!("flood fill from {:?}, initial neighbors: {:?}", origin, to_visit);

        while let Some(visit_coords) = to_visit.pop_front() {
            if self.reveal_single_tile(visit_coords, false) != RevealOutcome::Revealed {
                log::trace!("skipping tile at {:?}", visit_coords);
                continue;
            }

            if self.grid[visit_coords].adjacent_mines == 0 {
                self.schedule_hidden_neighbors(visit_coords, &mut scheduled, &mut to_visit);
            }
        }
    }

    fn schedule_hidden_neighbors(
        &self,
        coords: Coord2,
        scheduled: &mut BTreeSet<Coord2>,
        to_visit: &mut VecDeque<Coord2>,
    ) {
        to_visit.extend(
            self.grid
                .iter_neighbors(coords)
                .filter(|&pos| !self.grid[pos].is_revealed)
                .filter(|&pos| scheduled.insert(pos)),
        );
    }

    fn reveal_single_tile(&mut self, coords: Coord2, spend_mercy: bool) -> RevealOutcome {
        if self.state.is_over() {
            return RevealOutcome::NoChange;
        }

        let tile = self.grid[coords];
        if tile.is_flagged || tile.is_revealed {
            return RevealOutcome::NoChange;
        }

        if spend_mercy && self.mercy_credits > 0 {
            self.mercy_credits -= 1;
            self.disarm_at(coords);
        }

        let tile = &mut self.grid[coords];
        tile.is_revealed = true;
        if tile.is_mine {
            self.end_game(coords);
            RevealOutcome::HitMine
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Turns a mine into a safe tile and removes it from its neighbors' counts.
    fn disarm_at(&mut self, coords: Coord2) {
        if !self.grid[coords].is_mine {
            return;
        }

        self.grid[coords].is_mine = false;
        self.mines_remaining -= 1;
        for pos in self.grid.iter_neighbors(coords) {
            let neighbor = &mut self.grid[pos];
            if !neighbor.is_mine && neighbor.adjacent_mines > 0 {
                neighbor.adjacent_mines -= 1;
            }
        }

        let count = self.grid.count_in_block(coords, |tile| tile.is_mine);
        self.grid[coords].adjacent_mines = count;
        log::debug!(
            "disarmed mine at {:?}, {} mines left, {} mercy credits left",
            coords,
            self.mines_remaining,
            self.mercy_credits
        );
    }

    fn end_game(&mut self, coords: Coord2) {
        self.triggered_mine = Some(coords);
        self.state = GameState::Over;
        log::debug!("game over, mine revealed at {:?}", coords);
    }
}
