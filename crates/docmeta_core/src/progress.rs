/// Highest percentage an estimate may show before the response arrives.
const MAX_ESTIMATE: u8 = 99;

/// Strategy used to approximate upload progress while a transfer is in flight.
///
/// Only the arrival of a response moves the indicator to 100%; estimates are
/// capped at `ceiling` (and never above 99).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEstimator {
    /// Advance by `step` on every clock tick.
    FixedStep { step: u8, ceiling: u8 },
    /// Follow bytes-sent events reported by the transport.
    ByteCount { ceiling: u8 },
}

impl Default for ProgressEstimator {
    fn default() -> Self {
        Self::FixedStep {
            step: 5,
            ceiling: 90,
        }
    }
}

impl ProgressEstimator {
    /// Whether this estimator is driven by the progress clock.
    pub fn needs_clock(&self) -> bool {
        matches!(self, Self::FixedStep { .. })
    }

    pub fn on_tick(&self, current: u8) -> u8 {
        match *self {
            Self::FixedStep { step, ceiling } => {
                let next = current.saturating_add(step).min(cap(ceiling));
                next.max(current)
            }
            Self::ByteCount { .. } => current,
        }
    }

    pub fn on_bytes_sent(&self, current: u8, sent: u64, total: Option<u64>) -> u8 {
        match *self {
            Self::ByteCount { ceiling } => {
                let Some(total) = total.filter(|t| *t > 0) else {
                    return current;
                };
                let percent = (sent.min(total) * 100 / total) as u8;
                percent.min(cap(ceiling)).max(current)
            }
            Self::FixedStep { .. } => current,
        }
    }
}

fn cap(ceiling: u8) -> u8 {
    ceiling.min(MAX_ESTIMATE)
}

#[cfg(test)]
mod tests {
    use super::ProgressEstimator;

    #[test]
    fn fixed_step_stops_at_ceiling() {
        let estimator = ProgressEstimator::default();
        let mut percent = 0;
        for _ in 0..40 {
            percent = estimator.on_tick(percent);
        }
        assert_eq!(percent, 90);
    }

    #[test]
    fn ceiling_never_reaches_complete() {
        let estimator = ProgressEstimator::FixedStep {
            step: 50,
            ceiling: 100,
        };
        assert_eq!(estimator.on_tick(60), 99);
    }

    #[test]
    fn byte_count_is_monotonic_and_ignores_ticks() {
        let estimator = ProgressEstimator::ByteCount { ceiling: 90 };
        assert_eq!(estimator.on_tick(10), 10);
        assert_eq!(estimator.on_bytes_sent(0, 50, Some(100)), 50);
        assert_eq!(estimator.on_bytes_sent(50, 20, Some(100)), 50);
        assert_eq!(estimator.on_bytes_sent(50, 100, Some(100)), 90);
        assert_eq!(estimator.on_bytes_sent(5, 100, None), 5);
    }
}
