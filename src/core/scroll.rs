use crate::constants::SCROLL_PROGRESS_EPSILON;
use crate::core::profile::CapabilityProfile;
use smallvec::SmallVec;

/// Scrollable document extent, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollExtent {
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollExtent {
    pub fn new(document_height: f64, viewport_height: f64) -> Self {
        Self {
            document_height,
            viewport_height,
        }
    }

    #[inline]
    pub fn max_scroll(&self) -> f64 {
        self.document_height - self.viewport_height
    }
}

/// Latest committed scroll sample. Overwritten on every dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub scroll_y: f64,
    pub progress: f32,
}

impl ScrollState {
    pub fn sample(scroll_y: f64, extent: ScrollExtent) -> Self {
        let scroll_y = if scroll_y.is_finite() {
            scroll_y.max(0.0)
        } else {
            0.0
        };
        Self {
            scroll_y,
            progress: scroll_progress(scroll_y, extent),
        }
    }
}

/// Normalized scroll progress in `[0, 1]`.
///
/// A document that cannot scroll (max scroll zero or negative) reports 0.
/// Non-finite inputs also report 0, so the result is never NaN.
pub fn scroll_progress(scroll_y: f64, extent: ScrollExtent) -> f32 {
    let max_scroll = extent.max_scroll();
    if !(max_scroll > 0.0) || !scroll_y.is_finite() {
        return 0.0;
    }
    let p = scroll_y / max_scroll.max(SCROLL_PROGRESS_EPSILON);
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0) as f32
    }
}

/// Outcome of an animation-frame gate check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GateDecision {
    /// Deliver this state now.
    Dispatch(ScrollState),
    /// A state is pending but the minimum interval has not elapsed yet;
    /// request another frame.
    Hold,
    /// Nothing pending.
    Idle,
}

/// Coalescing window plus once-per-frame gate with last-write-wins.
///
/// The first input of a burst opens a window at its own timestamp. Later
/// inputs only replace the pending state. The newest state is dispatched on
/// the first animation frame at least `min_interval_ms` after the window
/// opened, so inputs closer together than the interval yield one dispatch.
/// The newest input is always delivered eventually.
#[derive(Clone, Debug)]
pub struct ScrollThrottle {
    min_interval_ms: f64,
    window_start_ms: Option<f64>,
    pending: Option<ScrollState>,
    frame_requested: bool,
}

impl ScrollThrottle {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms: min_interval_ms.max(0.0),
            window_start_ms: None,
            pending: None,
            frame_requested: false,
        }
    }

    pub fn for_profile(profile: CapabilityProfile) -> Self {
        Self::new(profile.scroll_throttle_ms())
    }

    #[inline]
    pub fn min_interval_ms(&self) -> f64 {
        self.min_interval_ms
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a new input seen at `now_ms`. Returns `true` when the caller
    /// must request an animation frame (at most one request is outstanding).
    pub fn on_input(&mut self, state: ScrollState, now_ms: f64) -> bool {
        self.pending = Some(state);
        if self.window_start_ms.is_none() {
            self.window_start_ms = Some(now_ms);
        }
        if self.frame_requested {
            false
        } else {
            self.frame_requested = true;
            true
        }
    }

    /// Called from the requested animation frame with a monotonic timestamp.
    pub fn on_frame(&mut self, now_ms: f64) -> GateDecision {
        self.frame_requested = false;
        let Some(state) = self.pending else {
            return GateDecision::Idle;
        };
        let ready = match self.window_start_ms {
            None => true,
            // a timestamp going backwards closes the window instead of stalling it
            Some(start) => now_ms < start || now_ms - start >= self.min_interval_ms,
        };
        if ready {
            self.pending = None;
            self.window_start_ms = None;
            GateDecision::Dispatch(state)
        } else {
            self.frame_requested = true;
            GateDecision::Hold
        }
    }
}

pub type ScrollSubscriber = Box<dyn FnMut(ScrollState)>;

/// Typed scroll event channel: throttled input in, `{scroll_y, progress}`
/// out to every subscriber in registration order.
pub struct ScrollSignal {
    throttle: ScrollThrottle,
    subscribers: SmallVec<[ScrollSubscriber; 4]>,
    current: ScrollState,
    dispatched: u64,
}

impl ScrollSignal {
    pub fn new(profile: CapabilityProfile) -> Self {
        Self::with_throttle(ScrollThrottle::for_profile(profile))
    }

    pub fn with_throttle(throttle: ScrollThrottle) -> Self {
        Self {
            throttle,
            subscribers: SmallVec::new(),
            current: ScrollState::default(),
            dispatched: 0,
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(ScrollState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Feed a raw scroll sample seen at `now_ms`. Returns `true` when an
    /// animation frame must be requested for the dispatch gate.
    pub fn on_scroll(&mut self, scroll_y: f64, extent: ScrollExtent, now_ms: f64) -> bool {
        self.throttle
            .on_input(ScrollState::sample(scroll_y, extent), now_ms)
    }

    /// Deliver a sample immediately, outside the throttle. Used once at
    /// startup to pick up a restored scroll position.
    pub fn prime(&mut self, scroll_y: f64, extent: ScrollExtent) {
        self.deliver(ScrollState::sample(scroll_y, extent));
    }

    /// Run the gate for this frame. Returns `true` when another frame is
    /// needed because a state is still held back.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        match self.throttle.on_frame(now_ms) {
            GateDecision::Dispatch(state) => {
                self.deliver(state);
                false
            }
            GateDecision::Hold => true,
            GateDecision::Idle => false,
        }
    }

    fn deliver(&mut self, state: ScrollState) {
        self.current = state;
        self.dispatched += 1;
        for subscriber in self.subscribers.iter_mut() {
            subscriber(state);
        }
    }

    /// Last dispatched state.
    #[inline]
    pub fn current(&self) -> ScrollState {
        self.current
    }

    #[inline]
    pub fn dispatch_count(&self) -> u64 {
        self.dispatched
    }
}
