//! Scrape process monitor for casa.
//!
//! Background scrape jobs are simulated: a periodic tick advances every
//! running process, appends to its bounded log and detects completion.

pub mod export;
pub mod monitor;
pub mod process;
pub mod store;
pub mod tick;

pub use export::LogExporter;
pub use monitor::{ProcessCounts, ProcessMonitor, TickReport};
pub use process::{AdminProcess, Preview, ProcessStatus, ScrapeKind};
pub use store::{ScrapeError, load_processes, parse_processes};
pub use tick::{DETAILS_PROCESS_ID, LOG_CAPACITY, advance, bump_for, log_stamp};
