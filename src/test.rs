#[cfg(test)]
mod tests {
    use crate::board::{Board, BoardError, Direction, MoveError};
    use crate::search::{solve, SearchError, Strategy};
    use crate::tile::Cell;
    use crate::traits::board::{Heuristic, HeuristicKind};

    const GOAL: &str = "b12 345 678";

    fn board(s: &str) -> Board {
        s.parse().expect("valid board fixture")
    }

    // Any board with the blank at blank_idx and the tiles laid out 1..8 in
    // reading order around it.
    fn board_with_blank_at(blank_idx: usize) -> Board {
        let mut cells = [Cell::Blank; 9];
        let mut next_tile = 1u8;
        for (idx, cell) in cells.iter_mut().enumerate() {
            if idx != blank_idx {
                *cell = Cell::Tile(next_tile);
                next_tile += 1;
            }
        }
        Board::new(cells).expect("permutation by construction")
    }

    #[test]
    fn accepts_only_permutations_of_the_nine_symbols() {
        assert!(GOAL.parse::<Board>().is_ok());
        assert!("724 5b6 831".parse::<Board>().is_ok());

        assert_eq!("b12 345 67".parse::<Board>(), Err(BoardError::BadLength(8)));
        assert_eq!("b12 345 6789".parse::<Board>(), Err(BoardError::BadLength(10)));
        assert_eq!("b12 345 679".parse::<Board>(), Err(BoardError::UnknownSymbol('9')));
        assert_eq!("x12 345 678".parse::<Board>(), Err(BoardError::UnknownSymbol('x')));
        assert_eq!("112 345 678".parse::<Board>(), Err(BoardError::DuplicateSymbol('1')));
        assert_eq!("b12 345 677".parse::<Board>(), Err(BoardError::DuplicateSymbol('7')));
    }

    #[test]
    fn applying_a_move_then_its_opposite_restores_the_state() {
        let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

        for seed in 0..8 {
            let state = Board::randomized(seed, 10);
            for direction in directions {
                if let Ok(next) = state.moved(direction) {
                    assert_eq!(next.moved(direction.opposite()), Ok(state));
                }
            }
        }
    }

    #[test]
    fn edge_blocked_moves_are_rejected() {
        // Goal state has the blank in the top-left corner.
        let goal = Board::goal();
        assert_eq!(goal.moved(Direction::Up), Err(MoveError::Blocked(Direction::Up)));
        assert_eq!(goal.moved(Direction::Left), Err(MoveError::Blocked(Direction::Left)));
        assert!(goal.moved(Direction::Right).is_ok());
        assert!(goal.moved(Direction::Down).is_ok());
    }

    #[test]
    fn heuristics_are_zero_exactly_at_the_goal() {
        let goal = Board::goal();
        assert_eq!(goal.misplaced_tiles(), 0);
        assert_eq!(goal.manhattan_distance(), 0);

        // One move from the goal: the blank and one tile are displaced, and
        // both heuristics count the blank.
        let nearly = board("1b2 345 678");
        assert_eq!(nearly.misplaced_tiles(), 2);
        assert_eq!(nearly.manhattan_distance(), 2);
    }

    #[test]
    fn manhattan_swing_per_move_is_at_most_two() {
        for seed in 0..8 {
            let state = Board::randomized(seed, 15);
            let h = state.manhattan_distance() as i64;

            for (neighbor, _) in state.neighbors() {
                let delta = (neighbor.manhattan_distance() as i64 - h).abs();
                assert!(delta <= 2, "swing {} from {} to {}", delta, state, neighbor);
            }
        }
    }

    #[test]
    fn neighbor_counts_follow_blank_position() {
        let expected = [2usize, 3, 2, 3, 4, 3, 2, 3, 2];

        for (blank_idx, &count) in expected.iter().enumerate() {
            let state = board_with_blank_at(blank_idx);
            assert_eq!(state.neighbors().count(), count, "blank at {}", blank_idx);
        }
    }

    #[test]
    fn neighbors_enumerate_right_left_up_down() {
        let center = board_with_blank_at(4);
        let directions: Vec<Direction> = center.neighbors().map(|(_, d)| d).collect();
        assert_eq!(
            directions,
            vec![Direction::Right, Direction::Left, Direction::Up, Direction::Down]
        );

        // The sequence restarts from scratch on every call.
        assert_eq!(center.neighbors().count(), 4);
    }

    #[test]
    fn wire_form_round_trips() {
        assert_eq!(Board::goal().to_string(), GOAL);

        for seed in 0..16 {
            let state = Board::randomized(seed, 25);
            let text = state.to_string();
            assert_eq!(text.len(), 11);
            assert_eq!(text.parse::<Board>(), Ok(state));
        }
    }

    #[test]
    fn json_form_round_trips() {
        let state = board("312 4b5 678");
        let json = serde_json::to_string(&state).expect("board serializes");
        assert_eq!(json, "\"312 4b5 678\"");

        let back: Board = serde_json::from_str(&json).expect("board deserializes");
        assert_eq!(back, state);
    }

    #[test]
    fn randomized_walks_are_deterministic_per_seed() {
        assert_eq!(Board::randomized(7, 0), Board::goal());
        assert_eq!(Board::randomized(7, 30), Board::randomized(7, 30));
        assert_ne!(Board::randomized(7, 1), Board::goal());
    }

    #[test]
    fn one_move_start_solves_in_a_single_left_move() {
        let start = board("1b2 345 678");
        let records = solve(&start, Strategy::BestFirst(HeuristicKind::Misplaced), 1000)
            .expect("solvable within budget");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].move_number, 1);
        assert_eq!(records[0].direction, Direction::Left);
        assert_eq!(records[0].previous, start);
        assert!(records[0].state.is_goal());
    }

    #[test]
    fn best_first_finds_the_two_move_solution() {
        let start = board("312 4b5 678");

        for kind in [HeuristicKind::Misplaced, HeuristicKind::Manhattan] {
            let records = solve(&start, Strategy::BestFirst(kind), 1000).expect("solvable");
            let directions: Vec<Direction> = records.iter().map(|r| r.direction).collect();
            assert_eq!(directions, vec![Direction::Left, Direction::Up]);
            assert!(records.last().expect("nonempty path").state.is_goal());
        }
    }

    #[test]
    fn beam_search_solves_within_a_generous_width() {
        let start = board("312 4b5 678");
        let records = solve(&start, Strategy::Beam(50), 1000).expect("solvable within width");

        let directions: Vec<Direction> = records.iter().map(|r| r.direction).collect();
        assert_eq!(directions, vec![Direction::Left, Direction::Up]);
    }

    #[test]
    fn solving_the_goal_state_yields_an_empty_move_list() {
        let goal = Board::goal();

        for strategy in [Strategy::BestFirst(HeuristicKind::Manhattan), Strategy::Beam(1)] {
            let records = solve(&goal, strategy, 10).expect("trivial success");
            assert!(records.is_empty());
        }
    }

    #[test]
    fn a_budget_of_one_exhausts_before_any_expansion() {
        let start = board("1b2 345 678");
        let result = solve(&start, Strategy::BestFirst(HeuristicKind::Misplaced), 1);
        assert_eq!(result, Err(SearchError::Exhausted { budget: 1 }));
    }

    #[test]
    fn beam_width_one_overflows_at_the_first_branching_step() {
        let start = board("1b2 345 678");
        let result = solve(&start, Strategy::Beam(1), 1000);
        assert_eq!(result, Err(SearchError::BeamExhausted { width: 1 }));
    }

    #[test]
    fn solution_replays_to_the_goal_with_consecutive_move_numbers() {
        let start = Board::randomized(373_456_123, 10);
        let records = solve(&start, Strategy::BestFirst(HeuristicKind::Manhattan), 100_000)
            .expect("scramble solves within the default budget");

        let mut state = start;
        for (idx, record) in records.iter().enumerate() {
            assert_eq!(record.move_number as usize, idx + 1);
            assert_eq!(record.previous, state);
            state = state.moved(record.direction).expect("recorded move is legal");
            assert_eq!(state, record.state);
        }
        assert!(state.is_goal());
    }
}
