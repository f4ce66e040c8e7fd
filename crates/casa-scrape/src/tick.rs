//! One simulated step of a scrape process.

use crate::process::{AdminProcess, ProcessStatus, ScrapeKind};
use chrono::NaiveTime;

/// Maximum log lines kept per process; older lines are dropped.
pub const LOG_CAPACITY: usize = 220;

/// Process that visits listing detail pages when no kind is set explicitly.
pub const DETAILS_PROCESS_ID: &str = "proc_005";

/// Step text once a process has reached its ceiling.
pub const COMPLETED_STEP: &str = "Completed";

pub(crate) fn default_kind_for(id: &str) -> ScrapeKind {
    if id == DETAILS_PROCESS_ID {
        ScrapeKind::Details
    } else {
        ScrapeKind::Results
    }
}

/// Per-process increment in `1..=3`, fixed by the last character of the id.
pub fn bump_for(id: &str) -> u64 {
    id.chars()
        .last()
        .map(|c| u64::from(c as u32) % 3 + 1)
        .unwrap_or(1)
        .max(1)
}

/// Log prefix with millisecond precision, e.g. `[09:41:07.052]`.
pub fn log_stamp(at: NaiveTime) -> String {
    at.format("[%H:%M:%S%.3f]").to_string()
}

fn push_log(logs: &mut Vec<String>, line: String) {
    logs.push(line);
    if logs.len() > LOG_CAPACITY {
        let excess = logs.len() - LOG_CAPACITY;
        logs.drain(..excess);
    }
}

/// Advance a process by one tick at wall-clock time `at`.
///
/// Non-running processes are returned unchanged. A running process gains
/// `bump_for(id)` items and exactly one log line; reaching the ceiling of its
/// kind moves it to `Success` with the count pinned to the ceiling.
pub fn advance(process: &AdminProcess, at: NaiveTime) -> AdminProcess {
    if process.status != ProcessStatus::Running {
        return process.clone();
    }

    let kind = process.kind();
    let max = kind.ceiling();
    let bump = bump_for(&process.id);
    let next_count = process.scraped_count.saturating_add(bump);
    let shown = next_count.min(max);
    let stamp = log_stamp(at);

    let mut next = process.clone();

    if next_count >= max {
        next.status = ProcessStatus::Success;
        next.current_step = COMPLETED_STEP.to_string();
        next.scraped_count = max;
        push_log(&mut next.logs, format!("{stamp} Done ✅"));
    } else {
        next.current_step = kind.step_text(shown);
        next.scraped_count = next_count;
        push_log(&mut next.logs, format!("{stamp} {}", kind.log_text(bump, shown)));
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(id: &str, count: u64) -> AdminProcess {
        let json = format!(
            r#"{{"id": "{id}", "title": "Caracas apartments", "status": "running",
                "current_step": "Opening search page", "scraped_count": {count},
                "started_at": "2025-01-10T09:00:00Z", "url": "https://example.com/search"}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    fn at() -> NaiveTime {
        NaiveTime::from_hms_milli_opt(9, 41, 7, 52).unwrap()
    }

    #[test]
    fn test_bump_for() {
        // '0' = 48, 48 % 3 = 0
        assert_eq!(bump_for("proc_000"), 1);
        // '1' = 49 -> 2
        assert_eq!(bump_for("proc_001"), 2);
        // '2' = 50 -> 3
        assert_eq!(bump_for("proc_002"), 3);
        assert_eq!(bump_for(""), 1);
    }

    #[test]
    fn test_log_stamp() {
        assert_eq!(log_stamp(at()), "[09:41:07.052]");
    }

    #[test]
    fn test_results_tick() {
        let p = running("proc_001", 10);
        let next = advance(&p, at());

        assert_eq!(next.status, ProcessStatus::Running);
        assert_eq!(next.scraped_count, 12);
        assert_eq!(next.current_step, "Parsing results list (items 12/140)");
        assert_eq!(next.logs, vec!["[09:41:07.052] Extracted 2 new cards (total 12)"]);
        // Input untouched
        assert_eq!(p.scraped_count, 10);
    }

    #[test]
    fn test_details_tick() {
        let p = running("proc_005", 3);
        let next = advance(&p, at());

        // '5' = 53, 53 % 3 = 2 -> bump 3
        assert_eq!(next.scraped_count, 6);
        assert_eq!(next.current_step, "Visiting listing details (6/40)");
        assert_eq!(next.logs, vec!["[09:41:07.052] Parsed details: price, beds, baths"]);
    }

    #[test]
    fn test_bump_one_progression_until_completion() {
        // '3' = 51, 51 % 3 = 0 -> bump 1
        let initial = 130;
        let mut p = running("proc_003", initial);
        for n in 1..=15u64 {
            p = advance(&p, at());
            assert_eq!(p.scraped_count, (initial + n).min(140));
        }
        assert_eq!(p.status, ProcessStatus::Success);
    }

    #[test]
    fn test_completion_appends_one_line() {
        let mut p = running("proc_004", 139);
        p.logs = vec!["[09:00:00.000] boot".to_string()];

        let next = advance(&p, at());
        assert_eq!(next.status, ProcessStatus::Success);
        assert_eq!(next.scraped_count, 140);
        assert_eq!(next.current_step, "Completed");
        assert_eq!(next.logs.len(), p.logs.len() + 1);
        assert_eq!(next.logs.last().unwrap(), "[09:41:07.052] Done ✅");
    }

    #[test]
    fn test_overshoot_pins_to_ceiling() {
        // bump 3 from 38 overshoots the details ceiling of 40
        let p = running("proc_005", 38);
        let next = advance(&p, at());
        assert_eq!(next.status, ProcessStatus::Success);
        assert_eq!(next.scraped_count, 40);
    }

    #[test]
    fn test_terminal_is_noop() {
        let mut p = running("proc_001", 140);
        p.status = ProcessStatus::Success;
        assert_eq!(advance(&p, at()), p);

        p.status = ProcessStatus::Failed;
        assert_eq!(advance(&p, at()), p);

        p.status = ProcessStatus::Queued;
        assert_eq!(advance(&p, at()), p);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut p = running("proc_000", 0);
        p.kind = Some(ScrapeKind::Results);
        p.logs = (0..LOG_CAPACITY).map(|i| format!("line {i}")).collect();

        let next = advance(&p, at());
        assert_eq!(next.logs.len(), LOG_CAPACITY);
        assert_eq!(next.logs[0], "line 1");
        assert!(next.logs.last().unwrap().ends_with("Extracted 1 new cards (total 1)"));
    }

    #[test]
    fn test_count_never_decreases_while_running() {
        let mut p = running("proc_002", 0);
        let mut last = p.scraped_count;
        for _ in 0..100 {
            p = advance(&p, at());
            assert!(p.scraped_count >= last);
            assert!(p.logs.len() <= LOG_CAPACITY);
            last = p.scraped_count;
        }
        assert_eq!(p.status, ProcessStatus::Success);
    }
}
