// Drill-down navigation with the transition lock.
use crate::model::{Layer, MAX_PATH_LEN};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Advance(usize),
    Retreat,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigator {
    path: Vec<usize>,
    /// Set while the fade between layers runs; navigation input is ignored meanwhile.
    pending: Option<Move>,
}

impl Navigator {
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn layer(&self) -> Layer {
        Layer::from_depth(self.path.len()).unwrap_or(Layer::Four)
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Locks navigation and queues a drill into cell `idx`. False if ignored.
    pub fn begin_advance(&mut self, idx: usize) -> bool {
        if self.pending.is_some() || self.path.len() >= MAX_PATH_LEN {
            return false;
        }
        self.pending = Some(Move::Advance(idx));
        true
    }

    pub fn begin_retreat(&mut self) -> bool {
        if self.pending.is_some() || self.path.is_empty() {
            return false;
        }
        self.pending = Some(Move::Retreat);
        true
    }

    /// Applies the queued move and releases the lock. False when nothing was pending.
    pub fn complete_transition(&mut self) -> bool {
        match self.pending.take() {
            Some(Move::Advance(idx)) => {
                self.path.push(idx);
                true
            }
            Some(Move::Retreat) => {
                self.path.pop();
                true
            }
            None => false,
        }
    }

    pub fn advance(&mut self, idx: usize) -> bool {
        self.begin_advance(idx) && self.complete_transition()
    }

    pub fn retreat(&mut self) -> bool {
        self.begin_retreat() && self.complete_transition()
    }
}
