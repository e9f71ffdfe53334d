pub(crate) mod board {
    use ordered_float::OrderedFloat;

    use crate::board::{Board, SIDE};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum HeuristicKind {
        Misplaced,
        Manhattan,
    }

    pub trait Heuristic {
        fn misplaced_tiles(&self) -> u32;
        fn manhattan_distance(&self) -> u32;
        fn evaluation(&self, kind: HeuristicKind) -> OrderedFloat<f32>;
    }

    impl Heuristic for Board {
        // Positions whose symbol differs from the goal arrangement, the blank
        // counted like any other tile.
        fn misplaced_tiles(&self) -> u32 {
            self.cells()
                .iter()
                .enumerate()
                .filter(|&(idx, &cell)| cell.goal_idx() != idx)
                .count() as u32
        }

        // Summed |Δrow| + |Δcol| displacement of all nine symbols, blank
        // included. Consistent across states, so it orders the frontier even
        // though it sits above the classic eight-tile distance.
        fn manhattan_distance(&self) -> u32 {
            let mut distance = 0;

            for (idx, cell) in self.cells().iter().enumerate() {
                let goal_idx = cell.goal_idx();
                let row_delta = (idx / SIDE) as i32 - (goal_idx / SIDE) as i32;
                let col_delta = (idx % SIDE) as i32 - (goal_idx % SIDE) as i32;
                distance += row_delta.unsigned_abs() + col_delta.unsigned_abs();
            }

            distance
        }

        fn evaluation(&self, kind: HeuristicKind) -> OrderedFloat<f32> {
            let score = match kind {
                HeuristicKind::Misplaced => self.misplaced_tiles(),
                HeuristicKind::Manhattan => self.manhattan_distance(),
            };
            OrderedFloat(score as f32)
        }
    }
}

pub(crate) mod render {
    use std::fmt::Write;

    use colored::Colorize;

    use crate::board::{Board, SIDE};
    use crate::tile::Cell;

    pub trait GridPrintable {
        fn render_grid(&self) -> String;
    }

    impl GridPrintable for Board {
        fn render_grid(&self) -> String {
            let mut grid = String::new();

            grid.push('┌');
            for col in 0..SIDE {
                grid.push_str("───");
                if col < SIDE - 1 {
                    grid.push('┬');
                }
            }
            grid.push_str("┐\n");

            for row in 0..SIDE {
                grid.push('│');
                for col in 0..SIDE {
                    let cell = self.cells()[row * SIDE + col];
                    match cell {
                        Cell::Blank => {
                            let _ = write!(grid, " {} ", "·".green());
                        }
                        Cell::Tile(value) => {
                            let _ = write!(grid, " {} ", value);
                        }
                    }
                    grid.push('│');
                }
                grid.push('\n');

                if row < SIDE - 1 {
                    grid.push('├');
                    for col in 0..SIDE {
                        grid.push_str("───");
                        if col < SIDE - 1 {
                            grid.push('┼');
                        }
                    }
                    grid.push_str("┤\n");
                }
            }

            grid.push('└');
            for col in 0..SIDE {
                grid.push_str("───");
                if col < SIDE - 1 {
                    grid.push('┴');
                }
            }
            grid.push_str("┘\n");

            grid
        }
    }
}
