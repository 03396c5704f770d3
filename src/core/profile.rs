use crate::constants::{
    CONSTRAINED_MAX_WIDTH, OVERLAY_COUNT_CONSTRAINED, OVERLAY_COUNT_FULL,
    POINT_COUNT_CONSTRAINED, POINT_COUNT_FULL, SCROLL_THROTTLE_MS,
};

/// User agent fragments that mark a handheld / low-power device.
const CONSTRAINED_AGENTS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Coarse device classification, resolved once at startup and passed to
/// everything that sizes resources or schedules work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CapabilityProfile {
    #[default]
    Full,
    Constrained,
}

impl CapabilityProfile {
    pub fn detect(viewport_width: f64, user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        let handheld = CONSTRAINED_AGENTS.iter().any(|needle| ua.contains(needle));
        if handheld || viewport_width < CONSTRAINED_MAX_WIDTH {
            CapabilityProfile::Constrained
        } else {
            CapabilityProfile::Full
        }
    }

    #[inline]
    pub fn is_constrained(self) -> bool {
        self == CapabilityProfile::Constrained
    }

    /// Number of points in the GPU point cloud.
    pub fn point_count(self) -> usize {
        match self {
            CapabilityProfile::Full => POINT_COUNT_FULL,
            CapabilityProfile::Constrained => POINT_COUNT_CONSTRAINED,
        }
    }

    /// Number of screen-space overlay particles.
    pub fn overlay_count(self) -> usize {
        match self {
            CapabilityProfile::Full => OVERLAY_COUNT_FULL,
            CapabilityProfile::Constrained => OVERLAY_COUNT_CONSTRAINED,
        }
    }

    /// Minimum time between two scroll dispatches, in milliseconds.
    pub fn scroll_throttle_ms(self) -> f64 {
        match self {
            CapabilityProfile::Full => SCROLL_THROTTLE_MS,
            CapabilityProfile::Constrained => SCROLL_THROTTLE_MS * 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CapabilityProfile::Full => "full",
            CapabilityProfile::Constrained => "constrained",
        }
    }
}
