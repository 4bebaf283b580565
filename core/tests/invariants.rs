//! Property-based tests for the board invariants.
//!
//! Every test drives seeded random games through arbitrary move sequences.

use std::collections::{BTreeSet, VecDeque};

use proptest::prelude::*;

use minesweeper_core::*;

#[derive(Copy, Clone, Debug)]
enum Move {
    Reveal(Coord2),
    Chord(Coord2),
    Flag(Coord2),
}

fn config_strategy() -> impl Strategy<Value = (GameConfig, u64)> {
    (1u8..12, 1u8..12, 0u16..40, 0u16..4, any::<bool>(), any::<u64>()).prop_map(
        |(width, height, mines, mercy_credits, chain_reveal, seed)| {
            let config =
                GameConfig::new((width, height), mines, mercy_credits, chain_reveal).unwrap();
            (config, seed)
        },
    )
}

fn moves_strategy() -> impl Strategy<Value = Vec<(u8, u8, u8)>> {
    prop::collection::vec((0u8..3, any::<u8>(), any::<u8>()), 0..60)
}

fn to_move((kind, x, y): (u8, u8, u8), (width, height): Coord2) -> Move {
    let coords = (x % width, y % height);
    match kind {
        0 => Move::Reveal(coords),
        1 => Move::Chord(coords),
        _ => Move::Flag(coords),
    }
}

fn apply(game: &mut GameSession, mv: Move) {
    match mv {
        Move::Reveal(coords) => {
            game.reveal_at(coords).unwrap();
        }
        Move::Chord(coords) => {
            game.chord_reveal(coords).unwrap();
        }
        Move::Flag(coords) => {
            game.toggle_flag(coords).unwrap();
        }
    }
}

fn check_board(game: &GameSession) -> std::result::Result<(), TestCaseError> {
    let grid = game.grid();
    for (coords, tile) in grid.iter() {
        if !tile.is_mine() {
            prop_assert_eq!(
                tile.adjacent_mines(),
                grid.mine_count_in_neighborhood(coords).unwrap(),
                "stale count at {:?}",
                coords
            );
        }
        if tile.is_mine() && tile.is_revealed() {
            prop_assert!(game.is_game_over(), "mine revealed at {:?} without game over", coords);
        }
        prop_assert!(!(tile.is_flagged() && tile.is_revealed()));
    }
    prop_assert_eq!(game.mines_remaining(), grid.count_mines());
    Ok(())
}

/// Zero region around `origin` plus its numbered border, ignoring flags.
fn expected_region(grid: &TileGrid, origin: Coord2) -> BTreeSet<Coord2> {
    let (width, height) = grid.size();
    let mut region = BTreeSet::from([origin]);
    let mut queue = VecDeque::from([origin]);
    while let Some(coords) = queue.pop_front() {
        if grid[coords].adjacent_mines() != 0 {
            continue;
        }
        for neighbor in NeighborIter::new(coords, (width, height)) {
            if !grid[neighbor].is_flagged() && region.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    region
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Counts, mine totals and the loss latch stay consistent under any move sequence.
    #[test]
    fn prop_board_consistent_after_every_move(
        (config, seed) in config_strategy(),
        moves in moves_strategy(),
    ) {
        let mut game = GameSession::from_seed(config, seed).unwrap();
        check_board(&game)?;

        for raw in moves {
            apply(&mut game, to_move(raw, config.size));
            check_board(&game)?;
        }
    }

    /// Placing flags never goes past the number of live mines.
    #[test]
    fn prop_flags_never_exceed_mines(
        (config, seed) in config_strategy(),
        flags in prop::collection::vec((any::<u8>(), any::<u8>()), 0..80),
    ) {
        let mut game = GameSession::from_seed(config, seed).unwrap();

        for (x, y) in flags {
            let coords = (x % config.size.0, y % config.size.1);
            game.toggle_flag(coords).unwrap();
            prop_assert!(game.flags_placed() <= game.mines_remaining());
            prop_assert!(game.unflagged_mine_count() >= 0);
        }
    }

    /// With `k` mercy credits the first `k` reveals cannot lose.
    #[test]
    fn prop_mercy_protects_first_reveals(
        (config, seed) in config_strategy(),
        targets in prop::collection::vec((any::<u8>(), any::<u8>()), 1..20),
    ) {
        let mut game = GameSession::from_seed(config, seed).unwrap();

        for (x, y) in targets.into_iter().take(config.mercy_credits.into()) {
            let coords = (x % config.size.0, y % config.size.1);
            prop_assert_ne!(game.reveal_at(coords).unwrap(), RevealOutcome::HitMine);
            prop_assert!(!game.is_game_over());
        }
    }

    /// Once a mine goes off no move changes the session anymore.
    #[test]
    fn prop_game_over_is_terminal(
        seed in any::<u64>(),
        moves in moves_strategy(),
    ) {
        let config = GameConfig::new((6, 6), 30, 0, true).unwrap();
        let mut game = GameSession::from_seed(config, seed).unwrap();
        let mine = game
            .grid()
            .iter()
            .find(|(_, tile)| tile.is_mine())
            .map(|(coords, _)| coords)
            .unwrap();
        game.reveal_at(mine).unwrap();
        prop_assert!(game.is_game_over());

        let frozen = game.clone();
        for raw in moves {
            apply(&mut game, to_move(raw, config.size));
            prop_assert_eq!(&game, &frozen);
        }
    }

    /// Revealing a zero tile opens exactly its region and border, never a flagged tile.
    #[test]
    fn prop_flood_fill_opens_whole_region(
        (config, seed) in config_strategy(),
        flags in prop::collection::vec((any::<u8>(), any::<u8>()), 0..6),
    ) {
        let config = GameConfig { mercy_credits: 0, chain_reveal: true, ..config };
        let mut game = GameSession::from_seed(config, seed).unwrap();
        for (x, y) in flags {
            game.toggle_flag((x % config.size.0, y % config.size.1)).unwrap();
        }

        let origin = game
            .grid()
            .iter()
            .find(|(_, tile)| !tile.is_mine() && !tile.is_flagged() && tile.adjacent_mines() == 0)
            .map(|(coords, _)| coords);
        let Some(origin) = origin else {
            return Ok(());
        };

        let region = expected_region(game.grid(), origin);
        game.reveal_at(origin).unwrap();

        prop_assert!(!game.is_game_over());
        for (coords, tile) in game.grid().iter() {
            prop_assert_eq!(tile.is_revealed(), region.contains(&coords), "at {:?}", coords);
            if tile.is_flagged() {
                prop_assert!(!tile.is_revealed());
            }
        }
    }
}
