use std::time::Duration;

/// Quiet period after the last keystroke before a search is emitted.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Revision-tagged bookkeeping for coalescing search-box edits.
///
/// Every edit bumps the revision and replaces the pending text. A timer fired
/// for an older revision finds a newer edit and emits nothing, so only the
/// last value before a quiet period is released, and it is released once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDebounce {
    revision: u64,
    pending: Option<String>,
    quiet: Duration,
}

impl Default for InputDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl InputDebounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            revision: 0,
            pending: None,
            quiet,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Records an edit and returns the revision its timer must carry.
    pub fn record(&mut self, text: String) -> u64 {
        self.revision += 1;
        self.pending = Some(text);
        self.revision
    }

    /// Releases the pending text if `revision` is still the latest edit.
    pub fn take_if_current(&mut self, revision: u64) -> Option<String> {
        if revision == self.revision {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drops any pending text and invalidates outstanding timers.
    pub fn discard(&mut self) {
        self.revision += 1;
        self.pending = None;
    }
}
