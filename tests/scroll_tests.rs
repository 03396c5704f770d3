// Host-side tests for scroll progress and the dispatch throttle.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod profile {
        include!("../src/core/profile.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
}

use self::core::profile::CapabilityProfile;
use self::core::scroll::*;
use std::cell::RefCell;
use std::rc::Rc;

fn state(y: f64) -> ScrollState {
    ScrollState::sample(y, ScrollExtent::new(1800.0, 800.0))
}

#[test]
fn progress_is_zero_at_top() {
    assert_eq!(scroll_progress(0.0, ScrollExtent::new(1000.0, 800.0)), 0.0);
}

#[test]
fn progress_clamps_past_the_bottom() {
    // overscroll on some platforms reports y beyond the max
    assert_eq!(scroll_progress(2000.0, ScrollExtent::new(1800.0, 800.0)), 1.0);
    assert_eq!(scroll_progress(-50.0, ScrollExtent::new(1800.0, 800.0)), 0.0);
}

#[test]
fn progress_is_linear_inside_the_range() {
    let p = scroll_progress(500.0, ScrollExtent::new(1800.0, 800.0));
    assert!((p - 0.5).abs() < 1e-6);
}

#[test]
fn progress_without_scrollable_height_is_zero() {
    assert_eq!(scroll_progress(0.0, ScrollExtent::new(800.0, 800.0)), 0.0);
    assert_eq!(scroll_progress(120.0, ScrollExtent::new(600.0, 800.0)), 0.0);
}

#[test]
fn progress_is_never_nan() {
    let cases = [
        (f64::NAN, ScrollExtent::new(1800.0, 800.0)),
        (f64::INFINITY, ScrollExtent::new(1800.0, 800.0)),
        (100.0, ScrollExtent::new(f64::NAN, 800.0)),
        (100.0, ScrollExtent::new(1800.0, f64::NAN)),
        (0.0, ScrollExtent::new(0.0, 0.0)),
    ];
    for (y, extent) in cases {
        let p = scroll_progress(y, extent);
        assert!(!p.is_nan(), "NaN for y={} extent={:?}", y, extent);
        assert!((0.0..=1.0).contains(&p));
    }
}

#[test]
fn sample_floors_negative_scroll() {
    let s = state(-10.0);
    assert_eq!(s.scroll_y, 0.0);
    assert_eq!(s.progress, 0.0);
}

#[test]
fn throttle_requests_one_frame_per_burst() {
    let mut t = ScrollThrottle::new(16.0);
    assert!(t.on_input(state(10.0), 0.0));
    assert!(!t.on_input(state(20.0), 1.0));
    assert!(!t.on_input(state(30.0), 2.0));
    assert!(t.has_pending());
}

#[test]
fn throttle_coalesces_to_latest_value() {
    let mut t = ScrollThrottle::new(16.0);
    t.on_input(state(100.0), 1000.0);
    t.on_input(state(400.0), 1004.0);
    assert_eq!(t.on_frame(1008.0), GateDecision::Hold);
    match t.on_frame(1016.0) {
        GateDecision::Dispatch(s) => assert_eq!(s.scroll_y, 400.0),
        other => panic!("expected dispatch, got {:?}", other),
    }
    assert!(!t.has_pending());
    assert_eq!(t.on_frame(1032.0), GateDecision::Idle);
}

#[test]
fn throttle_window_opens_at_first_input() {
    let mut t = ScrollThrottle::new(16.0);
    assert!(t.on_input(state(100.0), 0.0));
    assert_eq!(t.on_frame(3.0), GateDecision::Hold);
    // a held state keeps its frame request outstanding
    assert!(!t.on_input(state(200.0), 5.0));
    assert_eq!(t.on_frame(11.0), GateDecision::Hold);
    // measured from the first input at 0, not from the second at 5
    match t.on_frame(16.0) {
        GateDecision::Dispatch(s) => assert_eq!(s.scroll_y, 200.0),
        other => panic!("expected dispatch, got {:?}", other),
    }
}

#[test]
fn throttle_next_burst_opens_a_fresh_window() {
    let mut t = ScrollThrottle::new(16.0);
    t.on_input(state(100.0), 0.0);
    assert!(matches!(t.on_frame(16.0), GateDecision::Dispatch(_)));

    assert!(t.on_input(state(200.0), 40.0));
    assert_eq!(t.on_frame(48.0), GateDecision::Hold);
    assert!(matches!(t.on_frame(56.0), GateDecision::Dispatch(_)));
}

#[test]
fn throttle_closes_window_when_clock_goes_backwards() {
    let mut t = ScrollThrottle::new(16.0);
    t.on_input(state(100.0), 5000.0);
    assert!(matches!(t.on_frame(10.0), GateDecision::Dispatch(_)));
    assert!(!t.has_pending());
}

#[test]
fn constrained_profile_doubles_interval() {
    assert_eq!(ScrollThrottle::for_profile(CapabilityProfile::Full).min_interval_ms(), 16.0);
    assert_eq!(
        ScrollThrottle::for_profile(CapabilityProfile::Constrained).min_interval_ms(),
        32.0
    );

    let mut t = ScrollThrottle::for_profile(CapabilityProfile::Constrained);
    t.on_input(state(1.0), 0.0);
    assert_eq!(t.on_frame(20.0), GateDecision::Hold);
    assert!(matches!(t.on_frame(32.0), GateDecision::Dispatch(_)));
}

fn recorded(signal: &mut ScrollSignal) -> Rc<RefCell<Vec<f64>>> {
    let seen: Rc<RefCell<Vec<f64>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    signal.subscribe(move |s| sink.borrow_mut().push(s.scroll_y));
    seen
}

/// Drive the gate on an 8 ms vsync until nothing is held back.
fn run_frames(signal: &mut ScrollSignal, mut now_ms: f64) -> f64 {
    while signal.on_frame(now_ms) {
        now_ms += 8.0;
    }
    now_ms
}

#[test]
fn signal_notifies_subscribers_in_order() {
    let seen: Rc<RefCell<Vec<(u8, f32)>>> = Rc::new(RefCell::new(Vec::new()));
    let mut signal = ScrollSignal::new(CapabilityProfile::Full);
    for id in 0..3u8 {
        let seen = seen.clone();
        signal.subscribe(move |s| seen.borrow_mut().push((id, s.progress)));
    }
    let extent = ScrollExtent::new(1800.0, 800.0);
    assert!(signal.on_scroll(250.0, extent, 0.0));
    assert!(!signal.on_frame(16.0));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(seen.iter().all(|(_, p)| (*p - 0.25).abs() < 1e-6));
}

#[test]
fn two_inputs_inside_interval_dispatch_once_with_later_value() {
    let mut signal = ScrollSignal::new(CapabilityProfile::Full);
    let seen = recorded(&mut signal);
    let extent = ScrollExtent::new(1800.0, 800.0);

    assert!(signal.on_scroll(100.0, extent, 0.0));
    // a vsync lands between the two inputs
    assert!(signal.on_frame(3.0));
    assert!(!signal.on_scroll(200.0, extent, 5.0));
    run_frames(&mut signal, 11.0);

    assert_eq!(*seen.borrow(), vec![200.0]);
    assert_eq!(signal.dispatch_count(), 1);
}

#[test]
fn burst_delivers_only_final_state() {
    let mut signal = ScrollSignal::new(CapabilityProfile::Full);
    let seen = recorded(&mut signal);
    let extent = ScrollExtent::new(1800.0, 800.0);

    for (i, y) in [10.0, 20.0, 30.0, 40.0, 50.0].into_iter().enumerate() {
        signal.on_scroll(y, extent, i as f64 * 2.0);
    }
    run_frames(&mut signal, 4.0);

    assert_eq!(*seen.borrow(), vec![50.0]);
    assert_eq!(signal.dispatch_count(), 1);
    assert_eq!(signal.current().scroll_y, 50.0);
}

#[test]
fn last_input_of_a_long_scroll_is_delivered() {
    let mut signal = ScrollSignal::new(CapabilityProfile::Full);
    let seen = recorded(&mut signal);
    let extent = ScrollExtent::new(1800.0, 800.0);

    // 1 ms input cadence, 8 ms vsync, for 100 ms
    let mut frame_at = 8.0;
    for ms in 0..100 {
        let now = ms as f64;
        signal.on_scroll(now * 5.0, extent, now);
        if now >= frame_at {
            signal.on_frame(now);
            frame_at += 8.0;
        }
    }
    run_frames(&mut signal, frame_at);

    let seen = seen.borrow();
    assert_eq!(seen.last().copied(), Some(495.0));
    // one dispatch per 16 ms window at most
    assert!(seen.len() <= 100 / 16 + 1, "{} dispatches", seen.len());
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn prime_delivers_without_waiting() {
    let mut signal = ScrollSignal::new(CapabilityProfile::Full);
    let seen = recorded(&mut signal);
    signal.prime(300.0, ScrollExtent::new(1800.0, 800.0));

    assert_eq!(*seen.borrow(), vec![300.0]);
    assert!((signal.current().progress - 0.3).abs() < 1e-6);
    assert!(!signal.on_frame(0.0));
}

#[test]
fn current_starts_at_default() {
    let signal = ScrollSignal::new(CapabilityProfile::Full);
    assert_eq!(signal.current(), ScrollState::default());
    assert_eq!(signal.dispatch_count(), 0);
}
