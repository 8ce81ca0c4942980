//! Kinetic scrolling: exponential-moving-average velocity tracking during a
//! drag, then per-frame deltas decaying exponentially from the release
//! velocity.

/// Minimum spacing between velocity samples. Ticks arriving faster than this
/// are ignored so frame-rate jitter does not distort the estimate.
pub(crate) const TRACK_INTERVAL_MS: u64 = 20;

/// Release velocities at or below this magnitude (px per sample interval) do
/// not start a coast.
pub(crate) const THROW_THRESHOLD: f64 = 10.0;

/// Decay time constant for the coast, in milliseconds.
pub(crate) const TIME_CONSTANT_MS: f64 = 325.0;

/// A coast ends once its per-frame delta decays to this magnitude.
pub(crate) const STOP_DELTA: f64 = 0.5;

/// Estimates drag velocity from accumulated scroll deltas.
///
/// Deltas are recorded as they arrive and folded into the estimate on each
/// [`sample`](Self::sample), no more than once per [`TRACK_INTERVAL_MS`]. The
/// estimate is an exponential moving average weighted toward the newest
/// interval, so a finger that stops just before release kills the throw.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VelocityTracker {
    vx: f64,
    vy: f64,
    total_x: f64,
    total_y: f64,
    last_sample_ms: u64,
}

impl VelocityTracker {
    pub fn new(now_ms: u64) -> Self {
        Self {
            vx: 0.0,
            vy: 0.0,
            total_x: 0.0,
            total_y: 0.0,
            last_sample_ms: now_ms,
        }
    }

    /// Accumulates a scroll delta since the last sample.
    pub fn record(&mut self, delta_x: f64, delta_y: f64) {
        self.total_x += delta_x;
        self.total_y += delta_y;
    }

    /// Folds accumulated deltas into the velocity estimate. A no-op when
    /// called within [`TRACK_INTERVAL_MS`] of the previous sample.
    pub fn sample(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_sample_ms) < TRACK_INTERVAL_MS {
            return;
        }
        let elapsed = (now_ms - self.last_sample_ms + 1) as f64;
        let scale = 10.0 * TRACK_INTERVAL_MS as f64 / elapsed;
        self.vx = 0.8 * (scale * self.total_x) + 0.2 * self.vx;
        self.vy = 0.8 * (scale * self.total_y) + 0.2 * self.vy;
        self.total_x = 0.0;
        self.total_y = 0.0;
        self.last_sample_ms = now_ms;
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    /// Per-axis coast amplitude for the current velocity, zero where the
    /// magnitude is within [`THROW_THRESHOLD`].
    pub fn throw_amplitude(&self) -> (f64, f64) {
        let throw = |v: f64| if v.abs() > THROW_THRESHOLD { 0.8 * v } else { 0.0 };
        (throw(self.vx), throw(self.vy))
    }
}

/// An in-flight kinetic coast: the release velocity decays exponentially and
/// is applied as the scroll delta of every frame.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coast {
    amplitude_x: f64,
    amplitude_y: f64,
    start_ms: u64,
}

/// One step of a coast: the scroll delta to apply now.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoastStep {
    pub delta_x: f64,
    pub delta_y: f64,
    /// Set on the final step. That step's sub-threshold delta is still meant
    /// to be applied; afterwards the coast emits nothing.
    pub done: bool,
}

impl Coast {
    /// Starts a coast, or `None` when both amplitudes are zero.
    pub fn new(amplitude_x: f64, amplitude_y: f64, start_ms: u64) -> Option<Self> {
        if amplitude_x == 0.0 && amplitude_y == 0.0 {
            return None;
        }
        Some(Self {
            amplitude_x,
            amplitude_y,
            start_ms,
        })
    }

    /// The step for `now_ms`: the amplitude decayed by the elapsed time,
    /// emitted as this frame's scroll delta. `done` is set once both axes
    /// have decayed within [`STOP_DELTA`]; that final small delta is applied
    /// and the coast ends.
    pub fn step(&self, now_ms: u64) -> CoastStep {
        let elapsed = now_ms.saturating_sub(self.start_ms) as f64;
        let decay = (-elapsed / TIME_CONSTANT_MS).exp();
        let delta_x = self.amplitude_x * decay;
        let delta_y = self.amplitude_y * decay;
        CoastStep {
            delta_x,
            delta_y,
            done: delta_x.abs() <= STOP_DELTA && delta_y.abs() <= STOP_DELTA,
        }
    }
}
