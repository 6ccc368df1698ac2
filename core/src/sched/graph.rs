use std::collections::{HashMap, HashSet};

use crate::error::SchedulerError;
use crate::task::TaskLike;

/// Dependency graph over a declared task universe.
///
/// Holds only ids and edges; the tasks themselves stay owned by the runner.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// task_id -> ids it depends on
    edges: HashMap<String, Vec<String>>,

    /// task_id -> ids that depend on it
    reverse_edges: HashMap<String, Vec<String>>,

    /// Declaration order, for stable diagnostics
    order: Vec<String>,
}

impl DependencyGraph {
    /// Build the graph, rejecting duplicate ids.
    pub fn from_tasks<T: TaskLike>(tasks: &[T]) -> Result<Self, SchedulerError> {
        let mut edges = HashMap::new();
        let mut reverse_edges: HashMap<String, Vec<String>> = HashMap::new();
        let mut order = Vec::new();

        for task in tasks {
            if edges.contains_key(task.id()) {
                return Err(SchedulerError::DuplicateTaskId(task.id().to_string()));
            }

            let task_id = task.id().to_string();
            let dependencies = task.dependencies().to_vec();

            for dep in &dependencies {
                reverse_edges
                    .entry(dep.clone())
                    .or_default()
                    .push(task_id.clone());
            }
            edges.insert(task_id.clone(), dependencies);
            order.push(task_id);
        }

        Ok(Self {
            edges,
            reverse_edges,
            order,
        })
    }

    /// Validate the declared universe before any task is admitted.
    ///
    /// Rejects dependencies on ids that exist nowhere in the universe, then
    /// runs a feasibility check (Kahn) over the remaining edges: if some
    /// subset of tasks can never reach in-degree zero, a cycle exists and is
    /// reported with the stuck task ids. Either way the caller gets an error
    /// before the run loop starts instead of a loop that never terminates.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        for task_id in &self.order {
            for dep in &self.edges[task_id] {
                if !self.edges.contains_key(dep) {
                    return Err(SchedulerError::DependencyNotFound {
                        task_id: task_id.clone(),
                        missing_dep: dep.clone(),
                    });
                }
            }
        }

        self.check_feasibility()
    }

    /// Kahn-style feasibility check, O(V + E).
    ///
    /// Peels off zero in-degree nodes until none remain; any leftover nodes
    /// sit on a cycle.
    fn check_feasibility(&self) -> Result<(), SchedulerError> {
        let mut in_degree: HashMap<&str, usize> = self
            .order
            .iter()
            .map(|id| (id.as_str(), self.edges[id].len()))
            .collect();

        let mut frontier: Vec<&str> = self
            .order
            .iter()
            .map(String::as_str)
            .filter(|id| in_degree[id] == 0)
            .collect();

        let mut resolved: HashSet<&str> = HashSet::new();

        while let Some(id) = frontier.pop() {
            resolved.insert(id);
            if let Some(dependents) = self.reverse_edges.get(id) {
                for dependent in dependents {
                    let degree = in_degree
                        .get_mut(dependent.as_str())
                        .ok_or_else(|| SchedulerError::Internal(format!(
                            "reverse edge to unknown task '{dependent}'"
                        )))?;
                    *degree -= 1;
                    if *degree == 0 {
                        frontier.push(dependent.as_str());
                    }
                }
            }
        }

        if resolved.len() == self.order.len() {
            return Ok(());
        }

        let stuck: Vec<&str> = self
            .order
            .iter()
            .map(String::as_str)
            .filter(|id| !resolved.contains(id))
            .collect();
        Err(SchedulerError::CircularDependency(stuck.join(" -> ")))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
