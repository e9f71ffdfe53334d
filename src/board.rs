use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHasher;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::tile::Cell;

pub const SIDE: usize = 3;
pub const CELLS: usize = SIDE * SIDE;

const GOAL_CELLS: [Cell; CELLS] = [
    Cell::Blank,
    Cell::Tile(1),
    Cell::Tile(2),
    Cell::Tile(3),
    Cell::Tile(4),
    Cell::Tile(5),
    Cell::Tile(6),
    Cell::Tile(7),
    Cell::Tile(8),
];

// Neighbor enumeration order is fixed so search runs reproduce exactly.
const ENUMERATION: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Up,
    Direction::Down,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    // Offset the blank index shifts by within the row-major cell array.
    pub fn offset(self) -> isize {
        match self {
            Direction::Up => -(SIDE as isize),
            Direction::Down => SIDE as isize,
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    BadLength(usize),
    UnknownSymbol(char),
    DuplicateSymbol(char),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::BadLength(count) => {
                write!(f, "expected {} cells, got {}", CELLS, count)
            }
            BoardError::UnknownSymbol(symbol) => {
                write!(f, "unrecognized cell symbol '{}'", symbol)
            }
            BoardError::DuplicateSymbol(symbol) => {
                write!(f, "cell symbol '{}' appears more than once", symbol)
            }
        }
    }
}

impl std::error::Error for BoardError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    Blocked(Direction),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoveError::Blocked(direction) => {
                write!(f, "cannot move the blank tile {}: blocked by the board edge", direction)
            }
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Debug, Clone, Copy)]
pub struct Board {
    cells: [Cell; CELLS],
    blank_idx: usize,
    digest: u64,
}

fn digest_cells(cells: &[Cell]) -> u64 {
    let mut hasher = FxHasher::default();
    for cell in cells {
        cell.hash(&mut hasher);
    }
    hasher.finish()
}

impl Board {
    pub fn new(cells: [Cell; CELLS]) -> Result<Self, BoardError> {
        let mut seen = [false; CELLS];
        let mut blank_idx = 0;

        for (idx, &cell) in cells.iter().enumerate() {
            let slot = cell.goal_idx();
            if seen[slot] {
                return Err(BoardError::DuplicateSymbol(cell.to_char()));
            }
            seen[slot] = true;
            if slot == 0 {
                blank_idx = idx;
            }
        }
        // Nine distinct slots across nine cells: every symbol, blank included,
        // appears exactly once, so blank_idx is always assigned above.

        Ok(Self {
            cells,
            blank_idx,
            digest: digest_cells(&cells),
        })
    }

    pub fn goal() -> Self {
        Self {
            cells: GOAL_CELLS,
            blank_idx: 0,
            digest: digest_cells(&GOAL_CELLS),
        }
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    pub fn blank_row(&self) -> usize {
        self.blank_idx / SIDE
    }

    pub fn blank_col(&self) -> usize {
        self.blank_idx % SIDE
    }

    pub fn is_goal(&self) -> bool {
        self.cells == GOAL_CELLS
    }

    pub fn moved(&self, direction: Direction) -> Result<Board, MoveError> {
        let legal = match direction {
            Direction::Right => self.blank_col() < SIDE - 1,
            Direction::Left => self.blank_col() > 0,
            Direction::Up => self.blank_row() > 0,
            Direction::Down => self.blank_row() < SIDE - 1,
        };
        if !legal {
            return Err(MoveError::Blocked(direction));
        }

        let target_idx = (self.blank_idx as isize + direction.offset()) as usize;
        let mut cells = self.cells;
        cells.swap(self.blank_idx, target_idx);

        Ok(Board {
            cells,
            blank_idx: target_idx,
            digest: digest_cells(&cells),
        })
    }

    pub fn neighbors(&self) -> Neighbors<'_> {
        Neighbors {
            board: self,
            next: 0,
        }
    }

    // Deterministic scramble: a seeded random walk out of the goal state, so
    // every state it produces is reachable. Only legal moves count toward n.
    pub fn randomized(seed: u64, move_count: u32) -> Board {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = Board::goal();
        let mut performed = 0;

        while performed < move_count {
            let roll: u32 = rng.gen_range(0..100);
            let direction = match roll / 25 {
                0 => Direction::Right,
                1 => Direction::Left,
                2 => Direction::Down,
                _ => Direction::Up,
            };

            if let Ok(next) = state.moved(direction) {
                state = next;
                performed += 1;
            }
        }

        state
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.digest);
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, BoardError> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != CELLS {
            return Err(BoardError::BadLength(symbols.len()));
        }

        let mut cells = [Cell::Blank; CELLS];
        for (idx, &symbol) in symbols.iter().enumerate() {
            cells[idx] = Cell::from_char(symbol).ok_or(BoardError::UnknownSymbol(symbol))?;
        }

        Board::new(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, cell) in self.cells.iter().enumerate() {
            if idx > 0 && idx % SIDE == 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", cell.to_char())?;
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

pub struct Neighbors<'a> {
    board: &'a Board,
    next: usize,
}

impl Iterator for Neighbors<'_> {
    type Item = (Board, Direction);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < ENUMERATION.len() {
            let direction = ENUMERATION[self.next];
            self.next += 1;
            if let Ok(board) = self.board.moved(direction) {
                return Some((board, direction));
            }
        }
        None
    }
}
