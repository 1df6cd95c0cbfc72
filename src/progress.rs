//! Progress reporting for batch runs.

/// Sender for reporting batch progress.
///
/// Wraps a callback that receives an integer percentage (0-100). The callback
/// is invoked from worker tasks, so it must be `Send + Sync`; the batch
/// coordinator serializes its reports, so percentages are monotonically
/// non-decreasing.
pub struct ProgressSender {
    callback: Box<dyn Fn(u32) + Send + Sync>,
}

impl ProgressSender {
    /// Create a new sender from the given callback.
    pub fn new(callback: impl Fn(u32) + Send + Sync + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Create a no-op sender that discards all progress reports.
    pub fn noop() -> Self {
        Self {
            callback: Box::new(|_| {}),
        }
    }

    /// Report progress.
    pub fn send(&self, percent: u32) {
        (self.callback)(percent);
    }
}

impl std::fmt::Debug for ProgressSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSender").finish_non_exhaustive()
    }
}
