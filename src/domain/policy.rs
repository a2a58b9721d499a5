use super::WatcherState;

/// How a run moved the consecutive-failure counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureTransition {
    /// Clean run, counter was already zero.
    None,
    /// Failed run, counter bumped but still below the threshold.
    Incremented { failure_count: u32 },
    /// Clean run after earlier failures; counter back to zero.
    Reset,
    /// Failed run hit the threshold; service turned off and counter cleared.
    Disabled,
}

impl FailureTransition {
    pub fn changed_state(&self) -> bool {
        !matches!(self, FailureTransition::None)
    }
}

impl WatcherState {
    /// Applies run-level failure accounting once per run, however many items failed.
    pub fn record_run(&mut self, had_errors: bool) -> FailureTransition {
        if !had_errors {
            if self.failure_count > 0 {
                self.failure_count = 0;
                return FailureTransition::Reset;
            }
            return FailureTransition::None;
        }

        self.failure_count = self.failure_count.saturating_add(1);
        if self.failure_count >= self.effective_max_failures() {
            self.enabled = false;
            self.failure_count = 0;
            return FailureTransition::Disabled;
        }
        FailureTransition::Incremented {
            failure_count: self.failure_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(failure_count: u32, max_failures: u32) -> WatcherState {
        let mut s = WatcherState::new(vec![], max_failures);
        s.failure_count = failure_count;
        s
    }

    #[test]
    fn clean_run_with_zero_counter_is_a_noop() {
        let mut s = state(0, 3);
        assert_eq!(s.record_run(false), FailureTransition::None);
        assert_eq!(s.failure_count, 0);
        assert!(s.enabled);
    }

    #[test]
    fn clean_run_resets_counter() {
        let mut s = state(2, 3);
        assert_eq!(s.record_run(false), FailureTransition::Reset);
        assert_eq!(s.failure_count, 0);
    }

    #[test]
    fn failed_run_increments_by_one() {
        let mut s = state(0, 3);
        assert_eq!(
            s.record_run(true),
            FailureTransition::Incremented { failure_count: 1 }
        );
        assert!(s.enabled);
    }

    #[test]
    fn reaching_threshold_disables_and_clears() {
        let mut s = state(2, 3);
        assert_eq!(s.record_run(true), FailureTransition::Disabled);
        assert!(!s.enabled);
        assert_eq!(s.failure_count, 0);
    }

    #[test]
    fn counter_above_threshold_still_disables() {
        let mut s = state(7, 3);
        assert_eq!(s.record_run(true), FailureTransition::Disabled);
    }
}
