//! tickbench, a timer-latency harness for callback-based event loops
//!
//! This crate checks how quickly a host event loop can drive a chain of
//! single-shot timer firings. A probe arms a timer with a fixed interval;
//! every firing increments a counter and re-arms the timer until a target
//! number of ticks is reached. The wall-clock time of the whole chain is
//! then compared against a deadline: 1,000 ticks of a 1 ms timer are
//! expected to finish within 1 second on a healthy loop.
//!
//! The event loop itself is supplied by [`calloop`]; this crate only
//! consumes it, the way a GUI test harness consumes its toolkit's loop.
//!
//! ## How to use it
//!
//! ```no_run
//! use tickbench::{App, HarnessConfig};
//!
//! fn main() -> tickbench::Result<()> {
//!     let config = HarnessConfig::load("tickbench.yml")?;
//!
//!     // Create the application object. Only one may exist per process.
//!     let mut app = App::try_new()?;
//!
//!     // Let the loop settle, then run the timer chain.
//!     app.warm_up(config.warmup_pumps)?;
//!     let report = app.run_probe(&config.probe_spec())?;
//!
//!     println!("{}", report);
//!     report.verify()
//! }
//! ```

#![warn(missing_docs)]

pub use self::app::App;
pub use self::config::{HarnessConfig, ProbeSpec};
pub use self::error::{Error, Result};
pub use self::probe::TickCount;
pub use self::report::Report;

mod app;
mod config;
mod error;
mod probe;
mod report;

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, MutexGuard};

    static APP_LOCK: Mutex<()> = Mutex::new(());

    // Tests creating an App must hold this; the App slot is process-wide and
    // the test harness runs threads in parallel.
    pub(crate) fn app_lock() -> MutexGuard<'static, ()> {
        APP_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
