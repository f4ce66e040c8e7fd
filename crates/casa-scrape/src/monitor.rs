//! Process monitor store.

use crate::process::{AdminProcess, ProcessStatus};
use crate::tick::advance;
use casa_core::resolve_effective;
use chrono::{Local, NaiveTime};

/// Outcome of one tick across all processes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Processes that were running before the tick
    pub advanced: usize,
    /// Processes that reached a terminal state on this tick
    pub completed: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessCounts {
    pub total: usize,
    pub queued: usize,
    pub running: usize,
    pub success: usize,
    pub failed: usize,
}

/// Owns the process collection and the inspected process.
#[derive(Debug, Clone)]
pub struct ProcessMonitor {
    processes: Vec<AdminProcess>,
    inspected_id: Option<String>,
    generation: u64,
}

impl ProcessMonitor {
    /// Create a monitor inspecting the first process.
    pub fn new(processes: Vec<AdminProcess>) -> Self {
        let inspected_id = processes.first().map(|p| p.id.clone());
        Self {
            processes,
            inspected_id,
            generation: 0,
        }
    }

    pub fn processes(&self) -> &[AdminProcess] {
        &self.processes
    }

    /// Incremented whenever the collection is replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, id: &str) -> Option<&AdminProcess> {
        self.processes.iter().find(|p| p.id == id)
    }

    pub fn has_running(&self) -> bool {
        self.processes
            .iter()
            .any(|p| p.status == ProcessStatus::Running)
    }

    /// Inspect a process. Unknown ids fall back to the first process.
    pub fn select_process(&mut self, id: &str) {
        self.inspected_id = Some(id.to_string());
    }

    /// Inspect the process `offset` positions away, wrapping around.
    pub fn step_selection(&mut self, offset: isize) {
        if self.processes.is_empty() {
            return;
        }
        let len = self.processes.len() as isize;
        let current = self
            .inspected_id()
            .and_then(|id| self.processes.iter().position(|p| p.id == id))
            .unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(len) as usize;
        self.inspected_id = Some(self.processes[next].id.clone());
    }

    /// Effective inspected id: the chosen one if it exists, else the first.
    pub fn inspected_id(&self) -> Option<&str> {
        resolve_effective(&self.processes, self.inspected_id.as_deref(), true)
    }

    pub fn selected(&self) -> Option<&AdminProcess> {
        let id = self.inspected_id()?;
        self.get(id)
    }

    /// Advance every running process using the local wall clock.
    pub fn tick(&mut self) -> TickReport {
        self.tick_at(Local::now().time())
    }

    /// Advance every running process, stamping log lines with `at`.
    ///
    /// The collection is replaced as a whole, and only when something ran.
    pub fn tick_at(&mut self, at: NaiveTime) -> TickReport {
        let mut report = TickReport::default();

        let next: Vec<AdminProcess> = self
            .processes
            .iter()
            .map(|p| {
                if p.status != ProcessStatus::Running {
                    return p.clone();
                }
                report.advanced += 1;
                let updated = advance(p, at);
                if updated.status.is_terminal() {
                    report.completed.push(updated.id.clone());
                }
                updated
            })
            .collect();

        if report.advanced > 0 {
            self.processes = next;
            self.generation += 1;
        }

        for id in &report.completed {
            tracing::info!(process = %id, "scrape process completed");
        }

        report
    }

    /// Newline-joined log text for a process, ending with a newline.
    pub fn export_logs(&self, id: &str) -> Option<String> {
        let process = self.get(id)?;
        let mut text = process.logs.join("\n");
        text.push('\n');
        Some(text)
    }

    pub fn counts(&self) -> ProcessCounts {
        let mut counts = ProcessCounts::default();
        for process in &self.processes {
            match process.status {
                ProcessStatus::Queued => counts.queued += 1,
                ProcessStatus::Running => counts.running += 1,
                ProcessStatus::Success => counts.success += 1,
                ProcessStatus::Failed => counts.failed += 1,
            }
        }
        counts.total = self.processes.len();
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(id: &str, status: &str, count: u64) -> AdminProcess {
        let json = format!(
            r#"{{"id": "{id}", "title": "Job {id}", "status": "{status}",
                "scraped_count": {count}, "started_at": "2025-01-10T09:00:00Z",
                "url": "https://example.com/{id}"}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    fn sample() -> ProcessMonitor {
        ProcessMonitor::new(vec![
            process("proc_001", "running", 0),
            process("proc_002", "success", 140),
            process("proc_003", "running", 139),
            process("proc_004", "failed", 12),
        ])
    }

    fn at() -> NaiveTime {
        NaiveTime::from_hms_milli_opt(12, 0, 0, 5).unwrap()
    }

    #[test]
    fn test_initially_inspects_first() {
        let monitor = sample();
        assert_eq!(monitor.inspected_id(), Some("proc_001"));
    }

    #[test]
    fn test_select_and_fallback() {
        let mut monitor = sample();
        monitor.select_process("proc_003");
        assert_eq!(monitor.inspected_id(), Some("proc_003"));
        assert_eq!(monitor.selected().map(|p| p.title.as_str()), Some("Job proc_003"));

        monitor.select_process("proc_999");
        assert_eq!(monitor.inspected_id(), Some("proc_001"));
    }

    #[test]
    fn test_empty_monitor() {
        let mut monitor = ProcessMonitor::new(vec![]);
        assert!(monitor.inspected_id().is_none());
        assert!(monitor.selected().is_none());
        let report = monitor.tick_at(at());
        assert_eq!(report.advanced, 0);
        assert_eq!(monitor.generation(), 0);
        monitor.step_selection(1);
        assert!(monitor.inspected_id().is_none());
    }

    #[test]
    fn test_tick_advances_only_running() {
        let mut monitor = sample();
        let before = monitor.processes().to_vec();

        let report = monitor.tick_at(at());
        assert_eq!(report.advanced, 2);
        assert_eq!(report.completed, vec!["proc_003".to_string()]);
        assert_eq!(monitor.generation(), 1);

        let after = monitor.processes();
        assert_eq!(after[0].scraped_count, 2);
        assert_eq!(after[1], before[1]);
        assert_eq!(after[2].status, ProcessStatus::Success);
        assert_eq!(after[2].scraped_count, 140);
        assert_eq!(after[3], before[3]);
    }

    #[test]
    fn test_idle_tick_keeps_generation() {
        let mut monitor = ProcessMonitor::new(vec![process("proc_002", "success", 140)]);
        monitor.tick_at(at());
        assert_eq!(monitor.generation(), 0);
        assert!(!monitor.has_running());
    }

    #[test]
    fn test_runs_to_completion() {
        let mut monitor = sample();
        for _ in 0..200 {
            monitor.tick_at(at());
        }
        let counts = monitor.counts();
        assert_eq!(counts.running, 0);
        assert_eq!(counts.success, 3);
        assert_eq!(counts.failed, 1);
        assert!(monitor.processes().iter().all(|p| p.logs.len() <= 220));
    }

    #[test]
    fn test_export_logs() {
        let mut monitor = sample();
        monitor.tick_at(at());
        monitor.tick_at(at());

        let text = monitor.export_logs("proc_001").unwrap();
        assert_eq!(
            text,
            "[12:00:00.005] Extracted 2 new cards (total 2)\n\
             [12:00:00.005] Extracted 2 new cards (total 4)\n"
        );
        // Export is a pure projection
        assert_eq!(monitor.generation(), 2);

        assert_eq!(monitor.export_logs("proc_004").as_deref(), Some("\n"));
        assert!(monitor.export_logs("nope").is_none());
    }

    #[test]
    fn test_step_selection_wraps() {
        let mut monitor = sample();
        monitor.step_selection(-1);
        assert_eq!(monitor.inspected_id(), Some("proc_004"));
        monitor.step_selection(2);
        assert_eq!(monitor.inspected_id(), Some("proc_002"));
    }

    #[test]
    fn test_counts() {
        let counts = sample().counts();
        assert_eq!(counts.total, 4);
        assert_eq!(counts.running, 2);
        assert_eq!(counts.success, 1);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.queued, 0);
    }
}
