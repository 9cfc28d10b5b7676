//! Wait Mechanisms
//!
//! Poll-waits against the live DOM. A wait repeatedly probes a condition
//! until it holds or the deadline passes, sleeping `poll_interval` between
//! probes. The deadline is the only temporal bound: there is no cancellation
//! beyond it.
//!
//! Driver errors raised while probing are not swallowed; they end the wait
//! immediately and propagate to the caller.

use crate::config::Globals;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{PageError, PageResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};

// =============================================================================
// WAIT CONDITIONS
// =============================================================================

/// Element conditions a wait can poll for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitCondition {
    /// At least one node matches
    Present,
    /// No node matches
    Absent,
    /// The first match is displayed
    Visible,
    /// Nothing displayed matches (absent counts as hidden)
    Hidden,
}

impl WaitCondition {
    /// Probe the condition once
    pub async fn probe(&self, driver: &dyn Driver, locator: &Locator) -> PageResult<bool> {
        match self {
            Self::Present => Ok(driver.element_count(locator).await? > 0),
            Self::Absent => Ok(driver.element_count(locator).await? == 0),
            Self::Visible => driver.is_displayed(locator).await,
            Self::Hidden => Ok(!driver.is_displayed(locator).await?),
        }
    }

    /// Human-readable name used in failure messages
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for a single wait call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Deadline measured from the first probe
    pub timeout: Duration,
    /// Sleep between probes
    pub poll_interval: Duration,
    /// Whether a timeout fails the step or yields `false`
    pub abort_on_failure: bool,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::from_globals(&Globals::default())
    }
}

impl WaitOptions {
    /// Options taken from global configuration
    #[must_use]
    pub const fn from_globals(globals: &Globals) -> Self {
        Self {
            timeout: globals.timeout(),
            poll_interval: globals.poll_interval(),
            abort_on_failure: globals.abort_on_assertion_failure,
        }
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout in milliseconds
    #[must_use]
    pub const fn with_timeout_ms(self, timeout_ms: u64) -> Self {
        self.with_timeout(Duration::from_millis(timeout_ms))
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set whether a timeout fails the step
    #[must_use]
    pub const fn with_abort_on_failure(mut self, abort: bool) -> Self {
        self.abort_on_failure = abort;
        self
    }

    /// Shorthand for `with_abort_on_failure(false)`
    #[must_use]
    pub const fn tolerant(self) -> Self {
        self.with_abort_on_failure(false)
    }
}

// =============================================================================
// WAIT OUTCOME
// =============================================================================

/// Tri-state result of a poll-wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The condition held before the deadline
    Satisfied,
    /// The deadline passed and the caller asked for failure
    TimedOutFailed,
    /// The deadline passed and the caller opted out of failure
    TimedOutTolerated,
}

impl WaitOutcome {
    /// Whether the condition held
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied)
    }

    /// Collapse into the component-level contract: `Ok(true)` satisfied,
    /// `Ok(false)` tolerated, `Err(AssertionFailed)` failed
    pub fn into_result(self, description: &str, timeout: Duration) -> PageResult<bool> {
        match self {
            Self::Satisfied => Ok(true),
            Self::TimedOutTolerated => Ok(false),
            Self::TimedOutFailed => Err(PageError::assertion(format!(
                "timed out after {}ms waiting for {description}",
                timeout.as_millis()
            ))),
        }
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Poll `probe` until it returns `true` or the deadline passes.
pub async fn poll_until<F, Fut>(mut probe: F, options: &WaitOptions) -> PageResult<WaitOutcome>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PageResult<bool>>,
{
    let start = Instant::now();

    loop {
        if probe().await? {
            return Ok(WaitOutcome::Satisfied);
        }

        let elapsed = start.elapsed();
        if elapsed >= options.timeout {
            return Ok(if options.abort_on_failure {
                WaitOutcome::TimedOutFailed
            } else {
                WaitOutcome::TimedOutTolerated
            });
        }

        sleep(options.poll_interval.min(options.timeout - elapsed)).await;
    }
}

/// Result of one assertion check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionCheckResult {
    /// Assertion passed
    Pass,
    /// Assertion failed with a description of what was observed
    Fail(String),
}

impl AssertionCheckResult {
    /// Pass when `condition` holds, otherwise fail with `message()`
    pub fn check(condition: bool, message: impl FnOnce() -> String) -> Self {
        if condition {
            Self::Pass
        } else {
            Self::Fail(message())
        }
    }
}

/// Re-run `check` until it passes; fail with the last observation otherwise.
///
/// Assertions always fail on timeout, independent of `abort_on_failure`.
pub async fn expect_eventually<F, Fut>(mut check: F, options: &WaitOptions) -> PageResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PageResult<AssertionCheckResult>>,
{
    let start = Instant::now();

    loop {
        let last = match check().await? {
            AssertionCheckResult::Pass => return Ok(()),
            AssertionCheckResult::Fail(message) => message,
        };

        let elapsed = start.elapsed();
        if elapsed >= options.timeout {
            return Err(PageError::assertion(last));
        }

        sleep(options.poll_interval.min(options.timeout - elapsed)).await;
    }
}
