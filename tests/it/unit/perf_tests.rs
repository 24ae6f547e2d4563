//! Unit tests for perf module.

use flowcanvas::perf::{ScopedTimer, TARGET_FRAME_MS, timed, warn_if_slow};

#[test]
fn test_timed_returns_value_and_duration() {
    let (value, elapsed) = timed(|| 6 * 7);
    assert_eq!(value, 42);
    assert!(elapsed >= 0.0);
}

#[test]
fn test_warn_if_slow_passes_value_through() {
    let value = warn_if_slow("sum", 1000.0, || (1..=10).sum::<i32>());
    assert_eq!(value, 55);
}

#[test]
fn test_scoped_timer_label_and_elapsed() {
    let timer = ScopedTimer::with_budget("test_op", 1000.0);
    assert_eq!(timer.label(), "test_op");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_nested_timers_track_depth() {
    let outer = ScopedTimer::frame("outer");
    let inner = ScopedTimer::with_budget("inner", TARGET_FRAME_MS);
    assert_eq!(inner.depth(), outer.depth() + 1);
    drop(inner);

    let sibling = ScopedTimer::frame("sibling");
    assert_eq!(sibling.depth(), outer.depth() + 1);
}

#[test]
fn test_profile_scope_macro() {
    flowcanvas::profile_scope!("macro_scope");
    flowcanvas::profile_scope!("macro_scope_with_budget", 5.0);
}
