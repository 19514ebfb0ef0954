use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::position::Position;
use crate::types::{Color, Move};

#[derive(Debug, Clone, Copy)]
pub struct Branch {
    pub prior: f32,
    pub visit_count: u32,
    pub total_value: f32,
}

impl Branch {
    pub fn new(prior: f32) -> Branch {
        Branch {
            prior,
            visit_count: 0,
            total_value: 0.0,
        }
    }

    /// `fpu` is the value assumed for this branch while it remains unvisited.
    pub fn expected_value(&self, fpu: f32) -> f32 {
        if self.visit_count == 0 {
            fpu
        } else {
            self.total_value / self.visit_count as f32
        }
    }
}

pub type NodeRef = Rc<RefCell<Node>>;

pub struct Node {
    pub position: Position,
    pub value_nn: f32,
    pub visit_count: u32,
    pub expected_value_avg: f32,
    pub terminal: bool,
    pub parent: Weak<RefCell<Node>>,
    pub last_move: Option<Move>,
    pub branches: HashMap<Move, Branch>,
    pub children: HashMap<Move, NodeRef>,
}

/// `±1`/`0` value for a position already known to be `is_over()`, from the
/// perspective of the side to move at that position.
pub fn terminal_value(pos: &Position) -> f32 {
    match pos.winner() {
        Some(Color::Both) | None => 0.0,
        Some(winner) if winner == pos.side => 1.0,
        Some(_) => -1.0,
    }
}

impl Node {
    pub fn new_root(position: Position, value: f32, priors: HashMap<Move, f32>) -> NodeRef {
        Node::new(position, value, priors, Weak::new(), None)
    }

    pub fn new(
        position: Position,
        value: f32,
        priors: HashMap<Move, f32>,
        parent: Weak<RefCell<Node>>,
        last_move: Option<Move>,
    ) -> NodeRef {
        let terminal = position.is_over();
        let branches = priors
            .into_iter()
            .map(|(mv, prior)| (mv, Branch::new(prior)))
            .collect();
        Rc::new(RefCell::new(Node {
            position,
            value_nn: value,
            visit_count: 1,
            expected_value_avg: value,
            terminal,
            parent,
            last_move,
            branches,
            children: HashMap::new(),
        }))
    }

    pub fn prior(&self, mv: &Move) -> f32 {
        self.branches.get(mv).map(|b| b.prior).unwrap_or(0.0)
    }

    pub fn visit_count(&self, mv: &Move) -> u32 {
        self.branches.get(mv).map(|b| b.visit_count).unwrap_or(0)
    }

    /// Running-average update for one backed-up value `v` arriving via
    /// `mv`. Terminal nodes (reached directly, with no outgoing move at this
    /// level) only bump `visit_count`.
    pub fn record_visit(&mut self, mv: &Move, v: f32) {
        self.visit_count += 1;
        self.expected_value_avg += (v - self.expected_value_avg) / self.visit_count as f32;
        if let Some(branch) = self.branches.get_mut(mv) {
            branch.visit_count += 1;
            branch.total_value += v;
        }
    }
}
