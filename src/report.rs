//! Probe results

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// The outcome of one completed timer chain.
///
/// A probe always runs to completion; whether it met its deadline is a
/// separate question, answered by [`verify`](Report::verify) or
/// [`within_deadline`](Report::within_deadline).
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Name of the run, from the configuration.
    pub label: String,
    /// Number of fire-and-rearm cycles performed.
    pub ticks: u32,
    /// Timer interval used for each cycle.
    pub interval: Duration,
    /// Wall-clock time from first arm to final tick.
    pub elapsed: Duration,
    /// Wall-clock budget the chain was expected to meet.
    pub deadline: Duration,
}

impl Report {
    /// Mean wall-clock cost of one fire-and-rearm cycle.
    pub fn mean_tick(&self) -> Duration {
        if self.ticks == 0 {
            Duration::ZERO
        } else {
            self.elapsed / self.ticks
        }
    }

    /// Whether the chain completed within its deadline.
    pub fn within_deadline(&self) -> bool {
        self.elapsed <= self.deadline
    }

    /// Turn a missed deadline into an error.
    pub fn verify(&self) -> crate::Result<()> {
        if self.within_deadline() {
            Ok(())
        } else {
            Err(crate::Error::DeadlineExceeded {
                elapsed: self.elapsed,
                deadline: self.deadline,
            })
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ticks at {:?} in {:?} (mean {:?}/tick, deadline {:?}) {}",
            self.label,
            self.ticks,
            self.interval,
            self.elapsed,
            self.mean_tick(),
            self.deadline,
            if self.within_deadline() {
                "ok"
            } else {
                "deadline missed"
            }
        )
    }
}
