use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::board::{Board, Direction};
use crate::traits::board::{Heuristic, HeuristicKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    Exhausted { budget: u32 },
    BeamExhausted { width: usize },
    NoPath,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchError::Exhausted { budget } => {
                write!(f, "max number of nodes to search exceeded ({})", budget)
            }
            SearchError::BeamExhausted { width } => {
                write!(f, "beam state space exceeded ({} states)", width)
            }
            SearchError::NoPath => {
                write!(f, "terminal node is the search root, no moves to walk back")
            }
        }
    }
}

impl std::error::Error for SearchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BestFirst(HeuristicKind),
    Beam(usize),
}

// One explored state. Nodes live in an arena owned by a single search call;
// parent is an index into that arena, so the explored set forms a tree with
// no cross-edges and no shared ownership.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub board: Board,
    pub moves: u32,
    pub parent: Option<usize>,
    pub direction: Option<Direction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveRecord {
    pub move_number: u32,
    pub direction: Direction,
    pub state: Board,
    pub previous: Board,
}

// A start state that already satisfies the goal resolves to an empty move
// list; reconstruction itself treats a root terminal as a caller error.
pub fn solve(start: &Board, strategy: Strategy, budget: u32) -> Result<Vec<MoveRecord>, SearchError> {
    if start.is_goal() {
        return Ok(Vec::new());
    }

    let (arena, terminal) = match strategy {
        Strategy::BestFirst(kind) => best_first(start, kind, budget)?,
        Strategy::Beam(width) => beam(start, width)?,
    };

    reconstruct(&arena, terminal)
}

type FrontierKey = Reverse<(OrderedFloat<f32>, usize)>;

// A*-style search: priority is moves-so-far plus the selected heuristic.
// No closed set; a state reached along two paths is expanded twice. Ties
// break toward the earlier arena index, which is insertion order.
fn best_first(
    start: &Board,
    kind: HeuristicKind,
    budget: u32,
) -> Result<(Vec<SearchNode>, usize), SearchError> {
    let mut arena: Vec<SearchNode> = Vec::new();
    let mut frontier: BinaryHeap<FrontierKey> = BinaryHeap::new();
    let mut visited: u32 = 0;

    arena.push(SearchNode {
        board: *start,
        moves: 0,
        parent: None,
        direction: None,
    });
    visited += 1;
    frontier.push(Reverse((start.evaluation(kind), 0)));

    while let Some(Reverse((_, idx))) = frontier.pop() {
        if arena[idx].board.is_goal() {
            return Ok((arena, idx));
        }

        let current = arena[idx].board;
        let moves = arena[idx].moves + 1;

        for (neighbor, direction) in current.neighbors() {
            if neighbor == current {
                continue;
            }

            let priority = OrderedFloat(moves as f32) + neighbor.evaluation(kind);
            let child_idx = arena.len();
            arena.push(SearchNode {
                board: neighbor,
                moves,
                parent: Some(idx),
                direction: Some(direction),
            });
            visited += 1;
            frontier.push(Reverse((priority, child_idx)));

            if visited > budget {
                return Err(SearchError::Exhausted { budget });
            }
        }
    }

    // Every expanded state pushes at least two neighbors, so the frontier
    // only drains if the budget was never reachable in the first place.
    Err(SearchError::Exhausted { budget })
}

// Width-bounded search ordered by the Manhattan evaluation alone; path cost
// never enters the key. The width is a hard ceiling, not a pruning rule:
// overflowing it aborts the whole search.
fn beam(start: &Board, width: usize) -> Result<(Vec<SearchNode>, usize), SearchError> {
    let mut arena: Vec<SearchNode> = Vec::new();
    let mut frontier: BinaryHeap<FrontierKey> = BinaryHeap::new();

    arena.push(SearchNode {
        board: *start,
        moves: 0,
        parent: None,
        direction: None,
    });
    frontier.push(Reverse((start.evaluation(HeuristicKind::Manhattan), 0)));

    while let Some(Reverse((_, idx))) = frontier.pop() {
        if arena[idx].board.is_goal() {
            return Ok((arena, idx));
        }

        let current = arena[idx].board;
        let moves = arena[idx].moves + 1;

        for (neighbor, direction) in current.neighbors() {
            if neighbor == current {
                continue;
            }

            let score = neighbor.evaluation(HeuristicKind::Manhattan);
            let child_idx = arena.len();
            arena.push(SearchNode {
                board: neighbor,
                moves,
                parent: Some(idx),
                direction: Some(direction),
            });
            frontier.push(Reverse((score, child_idx)));

            if frontier.len() > width {
                return Err(SearchError::BeamExhausted { width });
            }
        }
    }

    Err(SearchError::BeamExhausted { width })
}

// Walk parent links terminal → root, then reverse into start-to-goal order.
// Move numbers are 1-based and equal each node's depth.
fn reconstruct(arena: &[SearchNode], terminal: usize) -> Result<Vec<MoveRecord>, SearchError> {
    if arena[terminal].parent.is_none() {
        return Err(SearchError::NoPath);
    }

    let mut records = Vec::new();
    let mut idx = terminal;

    while let Some(parent_idx) = arena[idx].parent {
        let node = &arena[idx];
        let direction = node.direction.ok_or(SearchError::NoPath)?;
        records.push(MoveRecord {
            move_number: node.moves,
            direction,
            state: node.board,
            previous: arena[parent_idx].board,
        });
        idx = parent_idx;
    }

    records.reverse();
    Ok(records)
}
