//! Timing source for the scan simulator.

use std::future::Future;
use std::time::Duration;

/// Something the simulator can wait on between steps.
pub trait ScanClock {
    fn wait(&self, delay: Duration) -> impl Future<Output = ()> + Send;
}

/// Real delays via the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl ScanClock for TokioClock {
    fn wait(&self, delay: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(delay)
    }
}

/// Returns immediately. Lets a scan be stepped through without real time
/// passing.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantClock;

impl ScanClock for InstantClock {
    fn wait(&self, _delay: Duration) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}
