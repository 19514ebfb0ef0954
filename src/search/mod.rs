pub mod node;
mod noise;
mod params;
pub mod time_manager;

use std::rc::Rc;
use std::time::Instant;

use rand::Rng;

use crate::error::Result;
use crate::eval::cache::CachedEvaluator;
use crate::eval::Evaluator;
use crate::sync::StopFlag;
use crate::types::Move;

pub use node::{terminal_value, Branch, Node, NodeRef};
pub use params::{FpuMode, SearchConfig, DIRICHLET_CONCENTRATION, DIRICHLET_WEIGHT};
pub use time_manager::TimeManagerKind;

/// Budget signals a `select_move` call may be given; any combination may be
/// active at once, and the first one satisfied stops the search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchBudget {
    pub time_limit_ms: Option<u64>,
}

pub struct SearchOutcome {
    pub best_move: Move,
    pub nodes: u64,
    pub rounds: u32,
    pub cumulative_depth: u64,
    pub seldepth: u32,
    /// Expected value of the chosen move, from the root side's perspective.
    pub q: f32,
}

fn cpuct(config: &SearchConfig, n: u32) -> f32 {
    if config.cpuct_factor != 0.0 {
        config.cpuct + config.cpuct_factor * ((n as f32 + config.cpuct_base) / config.cpuct_base).ln()
    } else {
        config.cpuct
    }
}

fn fpu_value(node: &Node, mode: FpuMode) -> f32 {
    match mode {
        FpuMode::Absolute(v) => v,
        FpuMode::Reduction(v) => {
            let visited_prior_sum: f32 = node
                .branches
                .values()
                .filter(|b| b.visit_count > 0)
                .map(|b| b.prior)
                .sum();
            node.expected_value_avg - v * visited_prior_sum.sqrt()
        }
    }
}

fn select_branch(node: &Node, config: &SearchConfig) -> Move {
    let c = cpuct(config, node.visit_count);
    let fpu = fpu_value(node, config.fpu);
    let sqrt_n = (node.visit_count as f32).sqrt();

    let mut best_move = None;
    let mut best_score = f32::NEG_INFINITY;
    for (mv, branch) in node.branches.iter() {
        let q = branch.expected_value(fpu);
        let score = q + c * branch.prior * sqrt_n / (1.0 + branch.visit_count as f32);
        if score > best_score {
            best_score = score;
            best_move = Some(*mv);
        }
    }
    best_move.expect("select_branch called on a node with no branches")
}

fn apply_root_noise(root: &NodeRef, config: &SearchConfig) {
    let mut node = root.borrow_mut();
    let n = node.branches.len();
    if n == 0 {
        return;
    }
    let alpha = DIRICHLET_CONCENTRATION * 19.0 * 19.0 / n as f64;
    let mut rng = rand::thread_rng();
    let sample = noise::sample_dirichlet(&mut rng, alpha, n);
    for (branch, noise_i) in node.branches.values_mut().zip(sample) {
        branch.prior = (1.0 - DIRICHLET_WEIGHT) * branch.prior + DIRICHLET_WEIGHT * noise_i;
    }
}

/// Runs one full `select_move` search: repeated PUCT playouts from a freshly
/// built root, until a stop/time/visit/round budget fires, then emits the
/// most-visited (or temperature-sampled, for early game moves) root move.
pub fn select_move<E: Evaluator>(
    root_position: &crate::position::Position,
    evaluator: &mut CachedEvaluator<E>,
    config: &SearchConfig,
    stop: &StopFlag,
    budget: SearchBudget,
) -> Result<SearchOutcome> {
    let start = Instant::now();

    let root_eval = evaluator.evaluate(root_position)?;
    let root_terminal = root_position.is_over();
    let root_value = if root_terminal {
        terminal_value(root_position)
    } else {
        root_eval.value
    };
    let root = Node::new_root(root_position.clone(), root_value, root_eval.priors);

    if config.add_noise && !root_terminal {
        apply_root_noise(&root, config);
    }

    let mut rounds = 0u32;
    let mut nodes = 1u64;
    let mut cumulative_depth = 0u64;
    let mut seldepth = 0u32;

    while !root.borrow().terminal {
        if stop.is_set() {
            break;
        }
        if let Some(limit) = budget.time_limit_ms {
            if start.elapsed().as_millis() as u64 >= limit {
                break;
            }
        }
        if config.num_visits > 0 && root.borrow().visit_count.saturating_sub(1) >= config.num_visits {
            break;
        }
        if config.num_rounds > 0 && rounds >= config.num_rounds {
            break;
        }

        let depth = playout(&root, evaluator, config)?;
        cumulative_depth += depth as u64;
        seldepth = seldepth.max(depth);
        nodes += 1;
        rounds += 1;
    }

    let best_move = choose_move(&root, root_position.total_moves, config);
    let q = root
        .borrow()
        .branches
        .get(&best_move)
        .map(|b| b.expected_value(root.borrow().expected_value_avg))
        .unwrap_or(0.0);

    Ok(SearchOutcome {
        best_move,
        nodes,
        rounds,
        cumulative_depth,
        seldepth,
        q,
    })
}

/// Descends from `root` by PUCT selection, expands one leaf (or backs up a
/// terminal node's forced value), and backs the result up to the root.
/// Returns the depth of the path walked, for `info seldepth`.
fn playout<E: Evaluator>(
    root: &NodeRef,
    evaluator: &mut CachedEvaluator<E>,
    config: &SearchConfig,
) -> Result<u32> {
    let mut path: Vec<(NodeRef, Move)> = Vec::new();
    let mut current = root.clone();

    loop {
        if current.borrow().terminal {
            break;
        }
        let mv = select_branch(&current.borrow(), config);
        let child = current.borrow().children.get(&mv).cloned();
        match child {
            Some(next) => {
                path.push((current.clone(), mv));
                current = next;
            }
            None => {
                path.push((current.clone(), mv));
                break;
            }
        }
    }

    let depth = path.len() as u32;

    let v = if current.borrow().terminal {
        // `current`'s own value is from its own side-to-move's perspective;
        // negate once to express it from its parent's perspective before
        // backing up, matching the freshly-expanded-leaf case below.
        -current.borrow().value_nn
    } else {
        let (parent, mv) = path.last().cloned().expect(
            "descent always pushes at least one (node, move) pair before reaching an unexpanded branch",
        );
        let mut child_pos = parent.borrow().position.clone();
        child_pos.make_move(mv);
        let eval = evaluator.evaluate(&child_pos)?;
        let terminal = child_pos.is_over();
        let child_value = if terminal {
            terminal_value(&child_pos)
        } else {
            eval.value
        };
        let child = Node::new(
            child_pos,
            child_value,
            eval.priors,
            Rc::downgrade(&parent),
            Some(mv),
        );
        parent.borrow_mut().children.insert(mv, child);
        -child_value
    };

    let mut v = v;
    for (node, mv) in path.iter().rev() {
        node.borrow_mut().record_visit(mv, v);
        v = -v;
    }

    Ok(depth)
}

fn choose_move(root: &NodeRef, total_moves: u32, config: &SearchConfig) -> Move {
    let node = root.borrow();
    if total_moves < config.num_randomized_moves {
        let total_visits: u32 = node.branches.values().map(|b| b.visit_count).sum();
        if total_visits > 0 {
            let mut pick = rand::thread_rng().gen_range(0..total_visits);
            for (mv, branch) in node.branches.iter() {
                if pick < branch.visit_count {
                    return *mv;
                }
                pick -= branch.visit_count;
            }
        }
    }
    node.branches
        .iter()
        .max_by_key(|(_, b)| b.visit_count)
        .map(|(mv, _)| *mv)
        .unwrap_or_else(|| {
            // No visits at all (search aborted immediately, or a terminal
            // root with no legal moves): fall back to a random legal move,
            // or the null move if there is none.
            let legal = crate::position::movegen::generate_legal_moves(&node.position);
            let mv = legal.iter().next().copied().unwrap_or(Move::none());
            mv
        })
}
