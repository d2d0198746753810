pub trait Stats {
    /// A non-terminal state whose children were searched.
    fn record_state_expanded(&mut self, depth: usize);
    /// A terminal state that produced a score.
    fn record_state_scored(&mut self, depth: usize);
}

#[derive(Debug, Default)]
pub struct NullStats;

impl Stats for NullStats {
    fn record_state_expanded(&mut self, _depth: usize) {}
    fn record_state_scored(&mut self, _depth: usize) {}
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct SimpleStats {
    pub state_expanded_count: u64,
    pub state_scored_count: u64,
    pub max_depth: usize,
}

impl SimpleStats {
    pub fn states_visited(&self) -> u64 {
        self.state_expanded_count + self.state_scored_count
    }
}

impl Stats for SimpleStats {
    fn record_state_expanded(&mut self, depth: usize) {
        self.state_expanded_count += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    fn record_state_scored(&mut self, depth: usize) {
        self.state_scored_count += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}
