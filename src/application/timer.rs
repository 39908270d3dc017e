use std::time::Duration;

/// Identity of one started timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Repeating timer driven by frame deltas.
///
/// Fires at most once per [`advance`](AnimationTimer::advance); time beyond
/// one extra period is dropped instead of queued.
#[derive(Clone, Debug)]
pub struct AnimationTimer {
    handle: TimerHandle,
    period: Duration,
    elapsed: Duration,
}

impl AnimationTimer {
    pub fn new(handle: TimerHandle, period: Duration) -> Self {
        Self {
            handle,
            period: period.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
        }
    }

    pub fn handle(&self) -> TimerHandle {
        self.handle
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Add frame time; returns `true` when the timer fires
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed += delta;
        if self.elapsed < self.period {
            return false;
        }
        self.elapsed -= self.period;
        if self.elapsed >= self.period {
            self.elapsed = Duration::ZERO;
        }
        true
    }
}
