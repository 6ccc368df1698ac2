//! End-to-end runner behavior: ordering, retries, deadlock rejection, and
//! observer delivery.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::json;

use conductor_core::api::{
    worker_fn, ExecutionReport, ObserverError, ProgressObserver, SchedulerError,
    SequentialRunner, Task, TaskPriority, TaskStatus, WorkError,
};

fn task(id: &str, deps: &[&str]) -> Task {
    Task::new(id, format!("task {id}"), "worker")
        .with_dependencies(deps.iter().map(|s| s.to_string()).collect())
}

/// Observer that stores every report it receives.
#[derive(Clone, Default)]
struct Recorder {
    reports: Arc<Mutex<Vec<ExecutionReport>>>,
}

impl ProgressObserver for Recorder {
    fn on_progress(&self, report: &ExecutionReport) -> Result<(), ObserverError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

struct AlwaysFails;

impl ProgressObserver for AlwaysFails {
    fn on_progress(&self, _report: &ExecutionReport) -> Result<(), ObserverError> {
        Err(ObserverError::Failed("observer blew up".to_string()))
    }
}

#[tokio::test]
async fn fanout_scenario_completes_in_dependency_order() {
    let mut runner = SequentialRunner::with_session_id("fanout");
    runner.add_tasks(vec![task("a", &[]), task("b", &["a"]), task("c", &["a"])]);

    let recorder = Recorder::default();
    runner.register_observer("recorder", Box::new(recorder.clone()));

    // The worker checks the readiness invariant from the inside: every
    // dependency of the task it receives must already have succeeded.
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let done: Arc<Mutex<HashSet<String>>> = Arc::new(Mutex::new(HashSet::new()));
    let seen_w = seen.clone();
    let done_w = done.clone();
    let worker = worker_fn(move |task: Task| {
        let seen = seen_w.clone();
        let done = done_w.clone();
        async move {
            assert_eq!(task.status, TaskStatus::InProgress);
            {
                let done = done.lock().unwrap();
                for dep in &task.dependencies {
                    assert!(done.contains(dep), "task {} ran before dep {dep}", task.id);
                }
            }
            seen.lock().unwrap().push(task.id.clone());
            done.lock().unwrap().insert(task.id.clone());
            Ok(json!({ "ok": true }))
        }
    });

    let final_report = runner.run(&worker).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["a", "b", "c"]);
    assert_eq!(final_report.total_tasks, 3);
    assert_eq!(final_report.completed_tasks, 3);
    assert_eq!(final_report.failed_tasks, 0);
    assert_eq!(final_report.overall_progress, 100.0);
    assert_eq!(final_report.current_phase, "Integration & Completion");

    // Tick 1 ran a; tick 2 ran b and c together; plus the final report.
    let reports = recorder.reports.lock().unwrap();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].completed_tasks, 1);
    assert_eq!(reports[1].completed_tasks, 3);
}

#[tokio::test]
async fn retry_law_attempts_budget_plus_one() {
    let mut runner = SequentialRunner::with_session_id("retry");
    runner.add_task(task("d", &[]).with_max_retry_attempts(2));

    let attempts = Arc::new(Mutex::new(0u32));
    let attempts_w = attempts.clone();
    let worker = worker_fn(move |_task: Task| {
        let attempts = attempts_w.clone();
        async move {
            *attempts.lock().unwrap() += 1;
            Err(WorkError::Failed("simulated outage".to_string()))
        }
    });

    let final_report = runner.run(&worker).await.unwrap();

    assert_eq!(*attempts.lock().unwrap(), 3);
    assert_eq!(final_report.failed_tasks, 1);
    assert_eq!(final_report.completed_tasks, 0);
    assert_eq!(final_report.issues_encountered.len(), 1);

    let export = runner.export();
    let failed = &export.tasks[0];
    assert_eq!(failed.status, TaskStatus::Failed);
    assert_eq!(failed.retry_count, 2);
    // One timestamped entry per failed attempt: two retries, one final.
    assert_eq!(failed.error_log.len(), 3);

    let retries = runner
        .execution_log()
        .events()
        .iter()
        .filter(|e| e.event_type == "task_retry")
        .count();
    let failures = runner
        .execution_log()
        .events()
        .iter()
        .filter(|e| e.event_type == "task_failed")
        .count();
    assert_eq!((retries, failures), (2, 1));
}

#[tokio::test]
async fn dangling_dependency_is_rejected_before_execution() {
    let mut runner = SequentialRunner::with_session_id("dangling");
    runner.add_tasks(vec![task("a", &[]), task("b", &["never-declared"])]);

    let ran = Arc::new(Mutex::new(false));
    let ran_w = ran.clone();
    let worker = worker_fn(move |_task: Task| {
        let ran = ran_w.clone();
        async move {
            *ran.lock().unwrap() = true;
            Ok(json!({}))
        }
    });

    match runner.run(&worker).await {
        Err(SchedulerError::DependencyNotFound {
            task_id,
            missing_dep,
        }) => {
            assert_eq!(task_id, "b");
            assert_eq!(missing_dep, "never-declared");
        }
        other => panic!("expected DependencyNotFound, got {other:?}"),
    }
    assert!(!*ran.lock().unwrap());
}

#[tokio::test]
async fn dependency_cycle_is_rejected_before_execution() {
    let mut runner = SequentialRunner::with_session_id("cycle");
    runner.add_tasks(vec![task("a", &["c"]), task("b", &["a"]), task("c", &["b"])]);

    let worker = worker_fn(|_task: Task| async move { Ok(json!({})) });
    let err = runner.run(&worker).await.unwrap_err();
    assert!(matches!(err, SchedulerError::CircularDependency(_)));
    assert!(err.is_configuration());
}

#[tokio::test]
async fn progress_is_monotonic_across_reports() {
    let mut runner = SequentialRunner::with_session_id("monotonic");
    runner.add_tasks(vec![
        task("a", &[]),
        task("b", &["a"]).with_max_retry_attempts(1),
        task("c", &["a"]),
        task("d", &["c"]),
    ]);

    let recorder = Recorder::default();
    runner.register_observer("recorder", Box::new(recorder.clone()));

    // b always fails; everything else succeeds.
    let worker = worker_fn(|task: Task| async move {
        if task.id == "b" {
            Err(WorkError::Failed("flaky".to_string()))
        } else {
            Ok(json!({}))
        }
    });

    runner.run(&worker).await.unwrap();

    let reports = recorder.reports.lock().unwrap();
    assert!(reports.len() >= 2);
    let mut last = 0;
    for report in reports.iter() {
        let finished = report.completed_tasks + report.failed_tasks;
        assert!(finished >= last, "finished count regressed");
        last = finished;
    }
    let final_report = reports.last().unwrap();
    assert_eq!(final_report.completed_tasks, 3);
    assert_eq!(final_report.failed_tasks, 1);
}

#[tokio::test]
async fn failing_observer_does_not_abort_or_starve_others() {
    let mut runner = SequentialRunner::with_session_id("observers");
    runner.add_tasks(vec![task("a", &[]), task("b", &["a"])]);

    let recorder = Recorder::default();
    runner.register_observer("bomb", Box::new(AlwaysFails));
    runner.register_observer("recorder", Box::new(recorder.clone()));

    let worker = worker_fn(|_task: Task| async move { Ok(json!({})) });
    let final_report = runner.run(&worker).await.unwrap();

    assert_eq!(final_report.completed_tasks, 2);
    // The recorder saw every report despite the bomb firing first each time.
    assert_eq!(recorder.reports.lock().unwrap().len(), 3);

    let observer_failures = runner
        .execution_log()
        .events()
        .iter()
        .filter(|e| e.event_type == "observer_failed")
        .count();
    assert_eq!(observer_failures, 3);
}

#[tokio::test]
async fn priority_never_reorders_ready_tasks() {
    let mut runner = SequentialRunner::with_session_id("fifo");
    runner.add_tasks(vec![
        task("low-first", &[]).with_priority(TaskPriority::Low),
        task("critical-second", &[]).with_priority(TaskPriority::Critical),
    ]);

    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_w = seen.clone();
    let worker = worker_fn(move |task: Task| {
        let seen = seen_w.clone();
        async move {
            seen.lock().unwrap().push(task.id.clone());
            Ok(json!({}))
        }
    });

    runner.run(&worker).await.unwrap();
    assert_eq!(*seen.lock().unwrap(), vec!["low-first", "critical-second"]);
}
