use std::collections::BTreeSet;

use serde::Serialize;

/// One requested artifact within a scan request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTask {
    pub index: usize,
    pub file_name: String,
    pub done: bool,
}

/// Per-request bookkeeping: which files are done and which are still pending.
#[derive(Debug, Clone)]
pub struct ScanState {
    tasks: Vec<FileTask>,
    pending: BTreeSet<usize>,
    rounds: u32,
}

impl ScanState {
    pub fn new(files: &[String]) -> Self {
        let tasks: Vec<FileTask> = files
            .iter()
            .enumerate()
            .map(|(index, file_name)| FileTask { index, file_name: file_name.clone(), done: false })
            .collect();
        let pending = (0..tasks.len()).collect();
        Self { tasks, pending, rounds: 0 }
    }

    /// Files still to attempt, in request order.
    pub fn pending_tasks(&self) -> Vec<FileTask> {
        self.pending.iter().map(|&i| self.tasks[i].clone()).collect()
    }

    /// Record one task's outcome. A failure leaves the file pending.
    pub fn record(&mut self, index: usize, succeeded: bool) {
        if succeeded && self.pending.remove(&index) {
            self.tasks[index].done = true;
        }
    }

    pub fn finish_round(&mut self) {
        self.rounds += 1;
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed(&self) -> usize {
        self.tasks.len() - self.pending.len()
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn outcome(&self) -> ScanOutcome {
        ScanOutcome {
            total: self.total(),
            completed: self.completed(),
            rounds: self.rounds,
        }
    }
}

/// Aggregate result of a scan request. Deliberately carries no per-file detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    pub total: usize,
    pub completed: usize,
    pub rounds: u32,
}

impl ScanOutcome {
    pub fn is_success(&self) -> bool {
        self.completed == self.total
    }
}
