use std::collections::{HashSet, VecDeque};

use crate::task::{Task, TaskStatus};

/// Ordered pending queue with readiness selection.
///
/// A task is ready once every id in its dependency list is in the completed
/// set. Selection preserves declaration order and ignores the priority field.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    pending: VecDeque<Task>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, task: Task) {
        self.pending.push_back(task);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.pending.iter()
    }

    /// Non-mutating readiness view. Two calls without an intervening
    /// mutation return the same subsequence.
    pub fn peek_ready<'a>(&'a self, completed: &HashSet<String>) -> Vec<&'a Task> {
        self.pending
            .iter()
            .filter(|t| Self::is_ready(t, completed))
            .collect()
    }

    /// Remove and return every ready task, in queue order.
    ///
    /// Removal happens atomically with the scan, so a task can never be
    /// selected twice within one tick.
    pub fn drain_ready(&mut self, completed: &HashSet<String>) -> Vec<Task> {
        let mut ready = Vec::new();
        let mut remaining = VecDeque::with_capacity(self.pending.len());

        for task in self.pending.drain(..) {
            if Self::is_ready(&task, completed) {
                ready.push(task);
            } else {
                remaining.push_back(task);
            }
        }

        self.pending = remaining;
        ready
    }

    fn is_ready(task: &Task, completed: &HashSet<String>) -> bool {
        task.status == TaskStatus::Pending
            && task.dependencies.iter().all(|dep| completed.contains(dep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> Task {
        Task::new(id, format!("task {id}"), "worker")
            .with_dependencies(deps.iter().map(|s| s.to_string()).collect())
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn drains_only_satisfied_tasks_in_order() {
        let mut queue = ReadyQueue::new();
        queue.push_back(task("a", &[]));
        queue.push_back(task("b", &["a"]));
        queue.push_back(task("c", &[]));

        let ready = queue.drain_ready(&HashSet::new());
        assert_eq!(ids(&ready), vec!["a", "c"]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn completion_unlocks_dependents() {
        let mut queue = ReadyQueue::new();
        queue.push_back(task("b", &["a"]));

        let mut completed = HashSet::new();
        assert!(queue.drain_ready(&completed).is_empty());

        completed.insert("a".to_string());
        let ready = queue.drain_ready(&completed);
        assert_eq!(ids(&ready), vec!["b"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn peek_is_idempotent() {
        let mut queue = ReadyQueue::new();
        queue.push_back(task("a", &[]));
        queue.push_back(task("b", &["a"]));

        let completed = HashSet::new();
        let first: Vec<String> = queue
            .peek_ready(&completed)
            .iter()
            .map(|t| t.id.clone())
            .collect();
        let second: Vec<String> = queue
            .peek_ready(&completed)
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["a"]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn non_pending_tasks_are_skipped() {
        let mut in_progress = task("a", &[]);
        in_progress.transition(TaskStatus::InProgress).unwrap();

        let mut queue = ReadyQueue::new();
        queue.push_back(in_progress);
        assert!(queue.drain_ready(&HashSet::new()).is_empty());
    }
}
