//! Periodic driver for the scrape simulation.
//!
//! The driver task never touches app state. It only sends events, which the
//! UI thread drains and applies between frames.

use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};

/// Timing for the driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Interval between process ticks.
    pub tick_period: Duration,
    /// One-shot delay before the loading view is replaced by live data.
    pub loading_delay: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(1100),
            loading_delay: Duration::from_millis(900),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEvent {
    /// The loading delay elapsed (sent once)
    Loaded,
    /// Advance every running process
    Tick,
}

/// Handle to the running driver task.
pub struct TickDriver {
    handle: JoinHandle<()>,
    receiver: UnboundedReceiver<DriverEvent>,
}

impl TickDriver {
    /// Spawn the driver on the current tokio runtime.
    pub fn start(config: DriverConfig) -> Self {
        let (tx, receiver) = unbounded_channel();
        let handle = tokio::spawn(run(config, tx));
        Self { handle, receiver }
    }

    /// Next pending event, without blocking.
    pub fn try_recv(&mut self) -> Option<DriverEvent> {
        self.receiver.try_recv().ok()
    }

    /// Stop the driver. No further events are produced.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(config: DriverConfig, tx: UnboundedSender<DriverEvent>) {
    let loading = sleep(config.loading_delay);
    tokio::pin!(loading);
    let mut loaded = false;

    let mut ticker = interval(config.tick_period);
    // Skip the first tick (fires immediately)
    ticker.tick().await;

    loop {
        let event = tokio::select! {
            _ = &mut loading, if !loaded => {
                loaded = true;
                DriverEvent::Loaded
            }
            _ = ticker.tick() => DriverEvent::Tick,
        };

        if tx.send(event).is_err() {
            tracing::debug!("driver receiver dropped, stopping");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(driver: &mut TickDriver) -> Vec<DriverEvent> {
        std::iter::from_fn(|| driver.try_recv()).collect()
    }

    #[test]
    fn test_default_config() {
        let config = DriverConfig::default();
        assert_eq!(config.tick_period, Duration::from_millis(1100));
        assert_eq!(config.loading_delay, Duration::from_millis(900));
    }

    #[tokio::test]
    async fn test_loaded_once_then_ticks() {
        let mut driver = TickDriver::start(DriverConfig {
            tick_period: Duration::from_millis(20),
            loading_delay: Duration::from_millis(5),
        });

        sleep(Duration::from_millis(150)).await;
        let events = drain(&mut driver);

        assert_eq!(events.first(), Some(&DriverEvent::Loaded));
        assert_eq!(events.iter().filter(|e| **e == DriverEvent::Loaded).count(), 1);
        assert!(events.iter().filter(|e| **e == DriverEvent::Tick).count() >= 2);
    }

    #[tokio::test]
    async fn test_stop_ends_events() {
        let mut driver = TickDriver::start(DriverConfig {
            tick_period: Duration::from_millis(10),
            loading_delay: Duration::from_millis(0),
        });
        sleep(Duration::from_millis(40)).await;
        driver.stop();
        sleep(Duration::from_millis(20)).await;
        drain(&mut driver);

        sleep(Duration::from_millis(50)).await;
        assert!(driver.try_recv().is_none());
    }
}
