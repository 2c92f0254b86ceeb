/// One-pending-token frame scheduling.
///
/// Scroll events arrive in bursts, but only the most recently scheduled recomputation needs to
/// run at the next frame boundary. Arming an already-armed gate replaces the pending payload,
/// so a burst coalesces into a single unit of work per [`take`](Self::take).
#[derive(Clone, Debug, Default)]
pub struct FrameGate<T> {
    pending: Option<T>,
}

impl<T> FrameGate<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedules `payload`, replacing anything already pending.
    pub fn arm(&mut self, payload: T) {
        self.pending = Some(payload);
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Claims the pending payload, disarming the gate.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }
}

/// A minimal rate limiter: at most one `ready` per interval.
///
/// Time is injected by the caller as a millisecond timestamp, so this works the same under a
/// real clock or a simulated one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Throttle {
    interval_ms: u64,
    last: Option<u64>,
}

impl Throttle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    /// Returns `true` (and records the call) when at least `interval_ms` has elapsed since the
    /// last accepted call.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last {
            if last.saturating_add(self.interval_ms) > now_ms {
                return false;
            }
        }
        self.last = Some(now_ms);
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
