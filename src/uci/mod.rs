//! Universal Chess Interface front end.
//!
//! A single reader loop reads lines from standard input, dispatches parsed
//! commands, and runs searches on a background worker thread so `stop` can
//! interrupt a `go` in progress. The search tree itself stays single
//! threaded and `Rc`-based; only the stop flag crosses the thread boundary.

pub mod command;
pub mod info;
pub mod options;

use std::io::{self, BufRead, Write};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use command::{parse_go_params, parse_uci_command, UciCommand};

use crate::encode::EncoderVersion;
use crate::eval::cache::CachedEvaluator;
use crate::eval::StubEvaluator;
use crate::position::{fen, Position};
use crate::search::time_manager::{budget_ms, TimeManagerKind};
use crate::search::{select_move, SearchBudget, SearchConfig};
use crate::sync::StopFlag;

const EVAL_CACHE_CAPACITY: usize = 1 << 16;

struct SearchWorker {
    handle: JoinHandle<()>,
    stop: StopFlag,
}

/// Owns UCI session state: current position, tunable search config, and the
/// handle of a search running on a background thread, if any.
pub struct Session {
    position: Position,
    config: SearchConfig,
    time_kind: TimeManagerKind,
    worker: Option<SearchWorker>,
}

impl Session {
    pub fn new() -> Session {
        Session {
            position: Position::startpos(),
            config: SearchConfig::default(),
            time_kind: TimeManagerKind::Simple,
            worker: None,
        }
    }

    fn stop_and_join(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.set();
            let _ = worker.handle.join();
        }
    }

    fn apply_position(&mut self, parts: &[String]) {
        let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
        let mut i = 1;
        if i >= parts.len() {
            return;
        }
        if parts[i] == "startpos" {
            self.position = Position::startpos();
            i += 1;
        } else if parts[i] == "fen" {
            if i + 6 >= parts.len() {
                return;
            }
            let fen_str = parts[i + 1..i + 7].join(" ");
            match fen::parse(&fen_str) {
                Ok(pos) => self.position = pos,
                Err(e) => {
                    log::warn!("invalid fen in position command: {e}");
                    return;
                }
            }
            i += 7;
        } else {
            return;
        }

        if i < parts.len() && parts[i] == "moves" {
            i += 1;
            while i < parts.len() {
                match fen::parse_move_string(&self.position, parts[i]) {
                    Some(mv) => {
                        self.position.make_move(mv);
                    }
                    None => log::warn!("invalid move in position command: {}", parts[i]),
                }
                i += 1;
            }
        }
    }

    fn start_go(&mut self, parts: &[String]) {
        self.stop_and_join();

        let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
        let go = parse_go_params(&parts);

        let white_to_move = self.position.side == crate::types::Color::White;
        let (time_left, increment) = if white_to_move {
            (go.wtime, go.winc)
        } else {
            (go.btime, go.binc)
        };

        let budget = if go.infinite {
            SearchBudget::default()
        } else if let Some(mt) = go.movetime {
            SearchBudget { time_limit_ms: Some(mt) }
        } else if let Some(time_left) = time_left {
            let ms = budget_ms(
                self.time_kind,
                time_left,
                increment.unwrap_or(0),
                self.position.total_moves,
                None,
            );
            SearchBudget { time_limit_ms: Some(ms) }
        } else {
            SearchBudget::default()
        };

        let position = self.position.clone();
        let mut config = self.config;
        config.num_visits = go.nodes.unwrap_or(0) as u32;
        if go.infinite {
            config.num_rounds = 0;
        }
        let stop = StopFlag::new();
        let stop_for_worker = stop.clone();

        log::info!("starting search: {} legal moves known, config={:?}", position.total_moves, config);

        let handle = thread::spawn(move || {
            let start = Instant::now();
            let mut cache = CachedEvaluator::new(StubEvaluator::new(0.0), EncoderVersion::V1, EVAL_CACHE_CAPACITY);
            cache.disable_underpromotion = config.disable_underpromotion;
            cache.policy_softmax_temp = config.policy_softmax_temp;

            match select_move(&position, &mut cache, &config, &stop_for_worker, budget) {
                Ok(outcome) => {
                    let elapsed_ms = start.elapsed().as_millis() as u64;
                    println!("{}", info::format_info_line(&outcome, elapsed_ms, outcome.best_move));
                    println!("bestmove {}", outcome.best_move);
                }
                Err(e) => {
                    log::error!("search failed: {e}");
                    println!("bestmove 0000");
                }
            }
            let _ = io::stdout().flush();
        });

        self.worker = Some(SearchWorker { handle, stop });
    }

    pub fn handle_command(&mut self, cmd: UciCommand) -> bool {
        match cmd {
            UciCommand::Uci => {
                options::print_id_and_options(&self.config);
            }
            UciCommand::IsReady => {
                println!("readyok");
            }
            UciCommand::UciNewGame => {
                self.stop_and_join();
                self.position = Position::startpos();
            }
            UciCommand::Position(parts) => self.apply_position(&parts),
            UciCommand::Go(parts) => self.start_go(&parts),
            UciCommand::SetOption(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                if let Some((name, value)) = options::parse_setoption(&parts) {
                    if let Err(e) = options::apply_setoption(&mut self.config, &name, value.as_deref()) {
                        log::warn!("setoption rejected: {e}");
                    }
                }
            }
            UciCommand::Stop => self.stop_and_join(),
            UciCommand::Quit => {
                self.stop_and_join();
                return false;
            }
            UciCommand::Unknown(line) => {
                log::debug!("unrecognized uci command: {line}");
            }
        }
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

struct LineQueue {
    lines: parking_lot::Mutex<std::collections::VecDeque<String>>,
    closed: parking_lot::Mutex<bool>,
    available: parking_lot::Condvar,
}

impl LineQueue {
    fn new() -> LineQueue {
        LineQueue {
            lines: parking_lot::Mutex::new(std::collections::VecDeque::new()),
            closed: parking_lot::Mutex::new(false),
            available: parking_lot::Condvar::new(),
        }
    }

    fn push(&self, line: String) {
        self.lines.lock().push_back(line);
        self.available.notify_one();
    }

    fn close(&self) {
        *self.closed.lock() = true;
        self.available.notify_one();
    }

    /// Blocks until a line is available or the reader thread has hit EOF.
    fn pop(&self) -> Option<String> {
        let mut guard = self.lines.lock();
        loop {
            if let Some(line) = guard.pop_front() {
                return Some(line);
            }
            if *self.closed.lock() {
                return None;
            }
            self.available.wait(&mut guard);
        }
    }
}

/// Reads UCI commands from standard input until `quit` or end of input,
/// dispatching each to a `Session`. A dedicated reader thread feeds lines
/// into a `parking_lot`-guarded queue so the dispatch loop can keep draining
/// `stop`/`quit` while a `go` search runs in its own worker thread without
/// either thread blocking on the other.
pub fn run_uci_loop() {
    let queue = std::sync::Arc::new(LineQueue::new());
    let reader_queue = queue.clone();
    let reader = thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => reader_queue.push(l),
                Err(e) => {
                    log::error!("stdin read error: {e}");
                    break;
                }
            }
        }
        reader_queue.close();
    });

    let mut session = Session::new();
    while let Some(line) = queue.pop() {
        let Some(cmd) = parse_uci_command(&line) else {
            continue;
        };
        if !session.handle_command(cmd) {
            break;
        }
        let _ = io::stdout().flush();
    }

    // Don't join `reader`: on `quit` it may still be blocked on a stdin read
    // the GUI never follows up with EOF for. The process exit takes it down.
    drop(reader);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_resets_to_startpos_after_moves() {
        let mut session = Session::new();
        session.handle_command(parse_uci_command("position startpos moves e2e4").unwrap());
        assert_ne!(session.position.hash, Position::startpos().hash);
        session.handle_command(parse_uci_command("ucinewgame").unwrap());
        assert_eq!(session.position.hash, Position::startpos().hash);
    }

    #[test]
    fn setoption_updates_round_budget() {
        let mut session = Session::new();
        session.handle_command(parse_uci_command("setoption name playouts value 50").unwrap());
        assert_eq!(session.config.num_rounds, 50);
    }

    #[test]
    fn quit_returns_false() {
        let mut session = Session::new();
        assert!(!session.handle_command(parse_uci_command("quit").unwrap()));
    }
}
