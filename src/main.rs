mod board;
mod search;
mod test;
mod tile;
mod traits;
mod util;

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::board::{Board, Direction};
use crate::search::{solve, MoveRecord, SearchError, Strategy};
use crate::traits::board::HeuristicKind;
use crate::traits::render::GridPrintable;
use crate::util::read_commands;

const DEFAULT_MAX_NODES: u32 = 100_000;
const RANDOMIZE_SEED: u64 = 373_456_123;

#[derive(Serialize)]
struct SolveReport {
    command: String,
    start: Board,
    outcome: SolveOutcome,
}

#[derive(Serialize)]
enum SolveOutcome {
    Solved { moves: Vec<MoveRecord> },
    Failed { reason: String },
}

struct Session {
    current: Option<Board>,
    max_nodes: u32,
    reports: Vec<SolveReport>,
}

impl Session {
    fn new() -> Self {
        Self {
            current: None,
            max_nodes: DEFAULT_MAX_NODES,
            reports: Vec::new(),
        }
    }

    fn process(&mut self, line: &str) {
        let args: Vec<&str> = line.split_whitespace().collect();

        match args.as_slice() {
            [cmd] if cmd.eq_ignore_ascii_case("exit") => std::process::exit(0),
            [cmd] if cmd.eq_ignore_ascii_case("printState") => self.print_state(),
            [cmd, count] if cmd.eq_ignore_ascii_case("randomizeState") => {
                match count.parse::<u32>() {
                    Ok(count) => self.randomize_state(count),
                    Err(_) => wrong_input_type(),
                }
            }
            [cmd, direction] if cmd.eq_ignore_ascii_case("move") => self.do_move(direction),
            [cmd, count] if cmd.eq_ignore_ascii_case("maxNodes") => match count.parse::<u32>() {
                Ok(count) => {
                    self.max_nodes = count;
                    println!("Max number of nodes to search set to {}", self.max_nodes);
                }
                Err(_) => wrong_input_type(),
            },
            [cmd, algorithm, parameter] if cmd.eq_ignore_ascii_case("solve") => {
                self.do_solve(line, algorithm, parameter)
            }
            [cmd, top, middle, bottom] if cmd.eq_ignore_ascii_case("setState") => {
                self.set_state(top, middle, bottom)
            }
            _ => invalid_command(),
        }
    }

    fn set_state(&mut self, top: &str, middle: &str, bottom: &str) {
        let state = format!("{} {} {}", top, middle, bottom);
        match state.parse::<Board>() {
            Ok(board) => {
                println!("\nSetting state of puzzle to be {}", board);
                if board.is_goal() {
                    println!("This is the goal state\n");
                }
                self.current = Some(board);
            }
            Err(e) => println!("{}", format!("INVALID STATE: {}", e).red()),
        }
    }

    fn randomize_state(&mut self, move_count: u32) {
        println!("\nRandomizing state of puzzle");
        let board = Board::randomized(RANDOMIZE_SEED, move_count);
        println!("Puzzle state randomized, the current state is: {}", board);
        self.current = Some(board);
    }

    fn print_state(&self) {
        match self.current {
            Some(board) => {
                println!("The current state of the puzzle is {}", board);
                print!("{}", board.render_grid());
            }
            None => println!("The state of the 8-puzzle must be set first"),
        }
    }

    fn do_move(&mut self, direction: &str) {
        let Some(board) = self.current else {
            println!("The state of the 8-puzzle must be set first");
            return;
        };

        let direction = match direction.to_ascii_lowercase().as_str() {
            "up" => Direction::Up,
            "down" => Direction::Down,
            "left" => Direction::Left,
            "right" => Direction::Right,
            _ => {
                println!("{}", "INVALID DIRECTION: Please enter a valid move direction".red());
                return;
            }
        };

        match board.moved(direction) {
            Ok(next) => {
                println!("Blank tile moved {}, the new state of the puzzle is: {}", direction, next);
                self.current = Some(next);
                self.check_goal();
            }
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    fn do_solve(&mut self, line: &str, algorithm: &str, parameter: &str) {
        let Some(start) = self.current else {
            println!("The state of the 8-puzzle must be set first");
            return;
        };

        let strategy = if algorithm.eq_ignore_ascii_case("A-star") {
            match parameter.to_ascii_lowercase().as_str() {
                "h1" => Strategy::BestFirst(HeuristicKind::Misplaced),
                "h2" => Strategy::BestFirst(HeuristicKind::Manhattan),
                _ => {
                    println!("Please enter a valid heuristic to use\nValid heuristics:\nh1\nh2");
                    return;
                }
            }
        } else if algorithm.eq_ignore_ascii_case("beam") {
            match parameter.parse::<usize>() {
                Ok(width) if width > 0 => Strategy::Beam(width),
                _ => {
                    wrong_input_type();
                    return;
                }
            }
        } else {
            invalid_command();
            return;
        };

        match strategy {
            Strategy::BestFirst(_) => {
                println!("\nAttempting to solve using A* search with heuristic {}\n", parameter)
            }
            Strategy::Beam(width) => {
                println!("\nAttempting to solve using beam search with {} states\n", width)
            }
        }

        match solve(&start, strategy, self.max_nodes) {
            Ok(records) => {
                if records.is_empty() {
                    println!("The puzzle is already in the goal state");
                } else {
                    print_solution(&start, &records);
                    if let Some(last) = records.last() {
                        self.current = Some(last.state);
                    }
                }
                self.check_goal();
                self.reports.push(SolveReport {
                    command: line.to_string(),
                    start,
                    outcome: SolveOutcome::Solved { moves: records },
                });
            }
            Err(e) => {
                let advice = match e {
                    SearchError::Exhausted { .. } => {
                        "Solution not found.\n\
                         Max number of nodes to search exceeded.\n\
                         May need to change or set number of max nodes to search if have not done so.\n"
                    }
                    SearchError::BeamExhausted { .. } => {
                        "Solution not found.\n\
                         Beam search state space exceeded.\n\
                         May need to change state space to search in order to find a solution\n"
                    }
                    SearchError::NoPath => "Solution not found.\n",
                };
                println!("{}", advice.red());
                self.reports.push(SolveReport {
                    command: line.to_string(),
                    start,
                    outcome: SolveOutcome::Failed { reason: e.to_string() },
                });
            }
        }
    }

    fn check_goal(&self) {
        if matches!(self.current, Some(board) if board.is_goal()) {
            println!("{}", "CONGRATS, you have reached the goal and solved the puzzle!".green());
        }
    }

    fn write_reports(&self, input: &Path) {
        if self.reports.is_empty() {
            return;
        }

        let output = input.with_extension("answers.json");
        match serde_json::to_string_pretty(&self.reports) {
            Ok(json) => match fs::write(&output, json) {
                Ok(()) => println!(
                    "{}",
                    format!("saved {} solve reports to {}", self.reports.len(), output.display()).green()
                ),
                Err(e) => println!("{}", format!("could not write {}: {}", output.display(), e).red()),
            },
            Err(e) => println!("{}", format!("could not serialize solve reports: {}", e).red()),
        }
    }
}

fn print_solution(start: &Board, records: &[MoveRecord]) {
    println!("Start state is: {}\n", start);

    for record in records {
        println!("Move Number: {}", record.move_number);
        println!("Current State: {}", record.state);
        println!("Move Direction: {}", record.direction);
        println!("Previous State: {}\n", record.previous);
    }

    println!("Solved in {} moves", records.len());
}

fn invalid_command() {
    println!(
        "{}",
        "INVALID COMMAND: Please enter a valid command and parameter if one is necessary".red()
    );
}

fn wrong_input_type() {
    println!("{}", "INVALID ARGUMENT: Argument to this command must be an Integer".red());
}

fn prompt() {
    print!(">> ");
    let _ = io::stdout().flush();
}

fn main() {
    let mut session = Session::new();

    let args: Vec<String> = env::args().skip(1).collect();
    if let [path] = args.as_slice() {
        if path.ends_with(".txt") {
            let path = Path::new(path);
            match read_commands(path) {
                Ok(commands) => {
                    for command in &commands {
                        session.process(command);
                    }
                    session.write_reports(path);
                }
                Err(e) => {
                    println!("{}", format!("Unable to open file '{}': {}", path.display(), e).red())
                }
            }
        }
    }

    let stdin = io::stdin();
    prompt();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if !line.trim().is_empty() {
            session.process(&line);
        }
        prompt();
    }
}
