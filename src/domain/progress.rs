use log::info;

/// Track progress through a sport's events
pub struct EventProgress {
    total: usize,
    decided: usize,
    pending: usize,
}

impl EventProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            decided: 0,
            pending: 0,
        }
    }

    pub fn increment_decided(&mut self) {
        self.decided += 1;
        self.log_progress();
    }

    pub fn increment_pending(&mut self) {
        self.pending += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.decided + self.pending
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!(
                "  → Progress: {}/{} events ({} decided, {} pending)",
                current, self.total, self.decided, self.pending
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % 5 == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}
