use std::time::Duration;

/// Errors arising while bootstrapping the application, loading its
/// configuration, or running a timer probe.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A second application object was created while one was still alive.
    #[error("another App already owns the event loop for this process")]
    AlreadyRunning,

    /// The host event loop failed while being created or dispatched.
    #[error("underlying event loop error")]
    Loop(#[from] calloop::Error),

    /// A configuration file could not be read or written.
    #[error("configuration file error")]
    Config(#[from] confy::ConfyError),

    /// The configuration does not describe a runnable probe.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A report could not be serialized for output.
    #[error("report serialization error")]
    Serialize(#[from] serde_json::Error),

    /// A completed timer chain took longer than its wall-clock budget.
    #[error("timer chain took {elapsed:?}, deadline was {deadline:?}")]
    DeadlineExceeded {
        /// Measured wall-clock time of the chain.
        elapsed: Duration,
        /// The budget the chain was expected to meet.
        deadline: Duration,
    },
}

/// A shorthand for results returned by this crate.
pub type Result<T> = core::result::Result<T, Error>;
