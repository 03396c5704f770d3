use instant::Instant;

/// Arguments handed to the per-frame callback.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTick {
    /// Seconds since the first frame.
    pub elapsed: f32,
    /// Seconds since the previous frame (0 on the first one).
    pub delta: f32,
    /// Latest committed scroll progress in `[0, 1]`.
    pub scroll_amount: f32,
}

/// Monotonic frame clock. Starts on the first tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    start: Option<Instant>,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now`, returning `(elapsed, delta)` in seconds.
    pub fn tick_at(&mut self, now: Instant) -> (f32, f32) {
        let start = *self.start.get_or_insert(now);
        let last = self.last.replace(now).unwrap_or(now);
        (seconds_between(start, now), seconds_between(last, now))
    }
}

#[inline]
fn seconds_between(earlier: Instant, later: Instant) -> f32 {
    if later > earlier {
        (later - earlier).as_secs_f32()
    } else {
        0.0
    }
}

pub type FrameCallback<S> = Box<dyn FnMut(FrameTick, &mut S)>;

/// Host-agnostic frame scheduler state.
///
/// The host primitive (`requestAnimationFrame` on the web) calls [`step`]
/// and then submits `scene` for presentation. The loop owns the continuation
/// flag: after [`stop`] no further step runs the callback.
///
/// [`step`]: FrameLoop::step
/// [`stop`]: FrameLoop::stop
pub struct FrameLoop<S> {
    clock: FrameClock,
    callback: Option<FrameCallback<S>>,
    scroll_amount: f32,
    running: bool,
    frames: u64,
}

impl<S> Default for FrameLoop<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FrameLoop<S> {
    pub fn new() -> Self {
        Self {
            clock: FrameClock::new(),
            callback: None,
            scroll_amount: 0.0,
            running: true,
            frames: 0,
        }
    }

    /// Install the per-frame callback, dropping any previous one.
    pub fn register_frame_callback(&mut self, callback: impl FnMut(FrameTick, &mut S) + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn update_scroll_amount(&mut self, amount: f32) {
        self.scroll_amount = if amount.is_finite() {
            amount.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    #[inline]
    pub fn scroll_amount(&self) -> f32 {
        self.scroll_amount
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Run one iteration: advance the clock and invoke the callback.
    /// Returns the tick for the caller to present, or `None` once stopped.
    pub fn step(&mut self, now: Instant, scene: &mut S) -> Option<FrameTick> {
        if !self.running {
            return None;
        }
        let (elapsed, delta) = self.clock.tick_at(now);
        let tick = FrameTick {
            elapsed,
            delta,
            scroll_amount: self.scroll_amount,
        };
        if let Some(callback) = self.callback.as_mut() {
            callback(tick, scene);
        }
        self.frames += 1;
        Some(tick)
    }
}
