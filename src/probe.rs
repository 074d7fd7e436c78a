//! The re-arm timer chain
//!
//! A probe inserts a single-shot timer into the host event loop. Each time
//! the timer fires, the callback increments a shared [`TickCount`] and
//! re-arms the timer with the same interval, until the configured number of
//! ticks has been reached. The loop is then driven until the chain
//! completes, and the wall-clock time of the whole chain is recorded.

use std::time::Instant;

use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;

use crate::config::ProbeSpec;
use crate::report::Report;

/// Number of timer firings observed so far.
///
/// Monotonically non-decreasing, bounded by the probe's tick target.
#[derive(Debug, Default)]
pub struct TickCount {
    fired: u32,
}

impl TickCount {
    /// The number of ticks counted so far.
    pub fn get(&self) -> u32 {
        self.fired
    }

    pub(crate) fn bump(&mut self) -> u32 {
        self.fired += 1;
        self.fired
    }

    pub(crate) fn reset(&mut self) {
        self.fired = 0;
    }
}

pub(crate) fn run(
    event_loop: &mut EventLoop<'static, TickCount>,
    counter: &mut TickCount,
    spec: &ProbeSpec,
) -> crate::Result<Report> {
    counter.reset();
    let target = spec.ticks;
    let interval = spec.interval;

    // The clock starts when the timer is first armed, as the insertion
    // itself is part of the measured chain.
    let started = Instant::now();
    let token = event_loop
        .handle()
        .insert_source(
            Timer::from_duration(interval),
            move |_deadline, _: &mut (), count: &mut TickCount| {
                if count.bump() < target {
                    TimeoutAction::ToDuration(interval)
                } else {
                    TimeoutAction::Drop
                }
            },
        )
        .map_err(calloop::Error::from)?;

    let outcome = drive(event_loop, counter, target);
    // The source removes itself on the final tick; this only cleans up after
    // a dispatch error mid-chain.
    event_loop.handle().remove(token);
    outcome?;
    let elapsed = started.elapsed();

    log::debug!(
        "[tickbench] chain of {} ticks at {:?} completed in {:?}",
        target,
        interval,
        elapsed
    );

    Ok(Report {
        label: spec.label.clone(),
        ticks: target,
        interval,
        elapsed,
        deadline: spec.deadline,
    })
}

fn drive(
    event_loop: &mut EventLoop<'static, TickCount>,
    counter: &mut TickCount,
    target: u32,
) -> crate::Result<()> {
    while counter.get() < target {
        // Block until the next firing rather than busy-polling; the timer is
        // always armed while the chain is incomplete, so every dispatch makes
        // progress.
        event_loop.dispatch(None, counter)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::test_util::app_lock;
    use crate::{App, ProbeSpec};

    fn spec(ticks: u32, interval: Duration, deadline: Duration) -> ProbeSpec {
        ProbeSpec {
            label: "test".into(),
            interval,
            ticks,
            deadline,
        }
    }

    #[test]
    fn chain_counts_to_target() {
        let _guard = app_lock();
        let mut app = App::try_new().unwrap();

        let report = app
            .run_probe(&spec(5, Duration::from_millis(1), Duration::from_secs(30)))
            .unwrap();

        assert_eq!(report.ticks, 5);
        assert_eq!(app.ticks_fired(), 5);
        report.verify().unwrap();
    }

    #[test]
    fn immediate_rearm_is_allowed() {
        let _guard = app_lock();
        let mut app = App::try_new().unwrap();

        let report = app
            .run_probe(&spec(100, Duration::ZERO, Duration::from_secs(30)))
            .unwrap();

        assert_eq!(report.ticks, 100);
        report.verify().unwrap();
    }

    #[test]
    fn counter_resets_between_runs() {
        let _guard = app_lock();
        let mut app = App::try_new().unwrap();

        let probe = spec(3, Duration::ZERO, Duration::from_secs(30));
        app.run_probe(&probe).unwrap();
        app.run_probe(&probe).unwrap();

        // a second run starts from zero rather than accumulating
        assert_eq!(app.ticks_fired(), 3);
    }

    #[test]
    fn impossible_deadline_fails_verification() {
        let _guard = app_lock();
        let mut app = App::try_new().unwrap();

        // 5 ticks of 20 ms cannot finish within 1 ms, on any machine
        let report = app
            .run_probe(&spec(5, Duration::from_millis(20), Duration::from_millis(1)))
            .unwrap();

        assert!(!report.within_deadline());
        assert!(matches!(
            report.verify(),
            Err(crate::Error::DeadlineExceeded { .. })
        ));
    }
}
