use super::*;

#[test]
fn fixed_rate_is_exact_multiple_of_frame_interval() {
    let p = TimingPolicy::FixedRate;
    for k in 0..50u64 {
        let t = p.timestamp_ms(FrameIndex(k), 10.0, Duration::from_secs(999));
        assert_eq!(t, (k * 100) as f64);
    }
    assert_eq!(p.timestamp_ms(FrameIndex(3), 8.0, Duration::ZERO), 375.0);
}

#[test]
fn fixed_rate_at_inexact_interval_matches_index_times_1000_over_fps() {
    let p = TimingPolicy::FixedRate;
    for k in [1u64, 5, 29, 30, 1000] {
        let t = p.timestamp_ms(FrameIndex(k), 30.0, Duration::ZERO);
        assert_eq!(t, k as f64 * 1000.0 / 30.0);
    }
    assert_eq!(p.timestamp_ms(FrameIndex(30), 30.0, Duration::ZERO), 1000.0);
}

#[test]
fn wall_clock_ignores_frame_index() {
    let p = TimingPolicy::WallClock;
    let t = p.timestamp_ms(FrameIndex(42), 60.0, Duration::from_millis(1500));
    assert_eq!(t, 1500.0);
    assert_eq!(p.timestamp_ms(FrameIndex(0), 60.0, Duration::ZERO), 0.0);
}

#[test]
fn capture_selects_fixed_rate() {
    assert_eq!(TimingPolicy::for_capture(true), TimingPolicy::FixedRate);
    assert_eq!(TimingPolicy::for_capture(false), TimingPolicy::WallClock);
}
