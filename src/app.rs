//! Application bootstrap
//!
//! [`App`] owns the process's event loop, the way a GUI application object
//! owns its framework's loop. At most one `App` may exist in a process at a
//! time; the slot is released when it is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use calloop::EventLoop;

use crate::config::ProbeSpec;
use crate::probe::{self, TickCount};
use crate::report::Report;

static APP_ALIVE: AtomicBool = AtomicBool::new(false);

/// The application object owning the host event loop.
pub struct App {
    event_loop: EventLoop<'static, TickCount>,
    counter: TickCount,
}

impl App {
    /// Create the application and its event loop.
    ///
    /// Fails with [`Error::AlreadyRunning`](crate::Error::AlreadyRunning) if
    /// another `App` is alive in this process.
    pub fn try_new() -> crate::Result<App> {
        if APP_ALIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(crate::Error::AlreadyRunning);
        }
        match EventLoop::try_new() {
            Ok(event_loop) => Ok(App {
                event_loop,
                counter: TickCount::default(),
            }),
            Err(err) => {
                APP_ALIVE.store(false, Ordering::Release);
                Err(err.into())
            }
        }
    }

    /// Process currently pending events without blocking.
    pub fn pump(&mut self) -> crate::Result<()> {
        self.event_loop
            .dispatch(Some(Duration::ZERO), &mut self.counter)?;
        Ok(())
    }

    /// Pump the event loop `n` times, letting it settle before a
    /// measurement.
    pub fn warm_up(&mut self, n: u32) -> crate::Result<()> {
        log::debug!("[tickbench] warming up with {} pumps", n);
        for _ in 0..n {
            self.pump()?;
        }
        Ok(())
    }

    /// Run a fire-and-rearm timer chain to completion and report on it.
    pub fn run_probe(&mut self, spec: &ProbeSpec) -> crate::Result<Report> {
        probe::run(&mut self.event_loop, &mut self.counter, spec)
    }

    /// Ticks counted by the most recent probe.
    pub fn ticks_fired(&self) -> u32 {
        self.counter.get()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        APP_ALIVE.store(false, Ordering::Release);
    }
}
