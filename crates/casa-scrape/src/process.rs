//! Scrape process records.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use casa_core::Identified;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Process lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    /// Waiting for a worker
    Queued,
    /// Advanced on every tick
    Running,
    /// Reached its ceiling
    Success,
    /// Terminal; nothing in the simulation produces it
    Failed,
}

impl ProcessStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Queued => "Queued",
            Self::Running => "Running",
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Queued => "◐",
            Self::Running => "●",
            Self::Success => "✓",
            Self::Failed => "✗",
        }
    }

    /// Terminal processes are never advanced again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

/// Scrape job category, which fixes the item ceiling and message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeKind {
    /// Paging through search results
    Results,
    /// Visiting individual listing pages
    Details,
}

impl ScrapeKind {
    /// Item count at which the process completes.
    pub fn ceiling(&self) -> u64 {
        match self {
            Self::Results => 140,
            Self::Details => 40,
        }
    }

    /// Progress text for `current_step`.
    pub fn step_text(&self, count: u64) -> String {
        let max = self.ceiling();
        match self {
            Self::Results => format!("Parsing results list (items {count}/{max})"),
            Self::Details => format!("Visiting listing details ({count}/{max})"),
        }
    }

    /// Log message (without timestamp) for one advance of `bump` items.
    pub fn log_text(&self, bump: u64, count: u64) -> String {
        match self {
            Self::Results => format!("Extracted {bump} new cards (total {count})"),
            Self::Details => "Parsed details: price, beds, baths".to_string(),
        }
    }
}

/// What the preview pane can show for a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview<'a> {
    /// Decoded `data:` URL
    Inline { mime: String, bytes: usize },
    /// Remote screenshot
    Remote(&'a str),
    /// Nothing captured yet
    Placeholder,
}

/// A simulated background scrape job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProcess {
    /// Unique identifier
    pub id: String,

    pub title: String,

    pub status: ProcessStatus,

    /// Human-readable progress description
    #[serde(default)]
    pub current_step: String,

    /// Items scraped so far
    #[serde(default)]
    pub scraped_count: u64,

    pub started_at: DateTime<Utc>,

    /// Page the headless browser is on
    pub url: String,

    #[serde(default)]
    pub screenshot_url: Option<String>,

    /// Inline `data:<mime>;base64,<payload>` capture
    #[serde(default)]
    pub screenshot_data_url: Option<String>,

    #[serde(default)]
    pub screenshot_hint: String,

    /// Most recent log lines, oldest first
    #[serde(default)]
    pub logs: Vec<String>,

    /// Explicit category; derived from the id when absent
    #[serde(default)]
    pub kind: Option<ScrapeKind>,
}

impl Identified for AdminProcess {
    fn id(&self) -> &str {
        &self.id
    }
}

impl AdminProcess {
    /// Scrape category, defaulting by identity.
    pub fn kind(&self) -> ScrapeKind {
        self.kind
            .unwrap_or_else(|| crate::tick::default_kind_for(&self.id))
    }

    /// Completion fraction in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let max = self.kind().ceiling();
        (self.scraped_count.min(max) as f64) / max as f64
    }

    /// Resolve the preview, preferring an inline capture over a remote one.
    pub fn preview(&self) -> Preview<'_> {
        if let Some(ref data_url) = self.screenshot_data_url {
            match decode_data_url(data_url) {
                Some((mime, bytes)) => return Preview::Inline { mime, bytes },
                None => tracing::warn!(id = %self.id, "ignoring malformed screenshot data URL"),
            }
        }
        match self.screenshot_url.as_deref() {
            Some(url) if !url.is_empty() => Preview::Remote(url),
            _ => Preview::Placeholder,
        }
    }
}

/// Decode a base64 `data:` URL into its mime type and payload size.
fn decode_data_url(data_url: &str) -> Option<(String, usize)> {
    let rest = data_url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    let mime = if mime.is_empty() {
        "text/plain".to_string()
    } else {
        mime.to_string()
    };
    Some((mime, bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(id: &str) -> AdminProcess {
        let json = format!(
            r#"{{"id": "{id}", "title": "Scrape", "status": "running",
                "started_at": "2025-01-10T09:00:00Z", "url": "https://example.com"}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_deserialize_defaults() {
        let p = process("proc_001");
        assert_eq!(p.status, ProcessStatus::Running);
        assert_eq!(p.scraped_count, 0);
        assert!(p.logs.is_empty());
        assert!(p.kind.is_none());
        assert_eq!(p.kind(), ScrapeKind::Results);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!ProcessStatus::Queued.is_terminal());
        assert!(!ProcessStatus::Running.is_terminal());
        assert!(ProcessStatus::Success.is_terminal());
        assert!(ProcessStatus::Failed.is_terminal());
        assert_eq!(ProcessStatus::Failed.label(), "Failed");
    }

    #[test]
    fn test_failed_status_round_trips() {
        let status: ProcessStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(status, ProcessStatus::Failed);
    }

    #[test]
    fn test_kind_text() {
        assert_eq!(ScrapeKind::Results.step_text(12), "Parsing results list (items 12/140)");
        assert_eq!(ScrapeKind::Details.step_text(7), "Visiting listing details (7/40)");
        assert_eq!(ScrapeKind::Results.log_text(3, 15), "Extracted 3 new cards (total 15)");
    }

    #[test]
    fn test_explicit_kind_wins() {
        let mut p = process("proc_005");
        assert_eq!(p.kind(), ScrapeKind::Details);
        p.kind = Some(ScrapeKind::Results);
        assert_eq!(p.kind(), ScrapeKind::Results);
    }

    #[test]
    fn test_progress_clamps() {
        let mut p = process("proc_001");
        p.scraped_count = 70;
        assert!((p.progress() - 0.5).abs() < f64::EPSILON);
        p.scraped_count = 1000;
        assert!((p.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_preview_prefers_inline() {
        let mut p = process("proc_001");
        assert_eq!(p.preview(), Preview::Placeholder);

        p.screenshot_url = Some("https://cdn.example.com/shot.png".to_string());
        assert_eq!(p.preview(), Preview::Remote("https://cdn.example.com/shot.png"));

        // "hello" in base64
        p.screenshot_data_url = Some("data:image/png;base64,aGVsbG8=".to_string());
        assert_eq!(
            p.preview(),
            Preview::Inline {
                mime: "image/png".to_string(),
                bytes: 5
            }
        );
    }

    #[test]
    fn test_malformed_inline_falls_through() {
        let mut p = process("proc_001");
        p.screenshot_data_url = Some("data:image/png,not-base64".to_string());
        assert_eq!(p.preview(), Preview::Placeholder);

        p.screenshot_data_url = Some("data:image/png;base64,%%%".to_string());
        p.screenshot_url = Some("https://cdn.example.com/x.png".to_string());
        assert_eq!(p.preview(), Preview::Remote("https://cdn.example.com/x.png"));
    }
}
