use super::*;

#[test]
fn manual_scheduler_keeps_one_pending_tick() {
    let mut s = ManualScheduler::new();
    assert_eq!(s.poll(), None);

    let a = s.request();
    let b = s.request();
    assert_ne!(a, b);
    assert!(s.is_pending());
    assert_eq!(s.poll(), Some(b));
    assert_eq!(s.poll(), None);
}

#[test]
fn cancel_only_affects_matching_handle() {
    let mut s = ManualScheduler::new();
    let a = s.request();
    let b = s.request();
    s.cancel(a);
    assert!(s.is_pending());
    s.cancel(b);
    assert!(!s.is_pending());
    assert_eq!(s.poll(), None);
}

#[test]
fn paced_scheduler_spaces_ticks_by_interval() {
    let mut s = PacedScheduler::new(Duration::from_millis(5));
    let started = Instant::now();
    for _ in 0..4 {
        s.request();
        assert!(s.poll().is_some());
    }
    // First tick fires immediately, the other three wait one interval each.
    assert!(started.elapsed() >= Duration::from_millis(15));
}

#[test]
fn paced_scheduler_rate_falls_back_on_invalid_input() {
    assert_eq!(
        PacedScheduler::with_rate(0.0).interval(),
        PacedScheduler::DEFAULT_INTERVAL
    );
    assert_eq!(
        PacedScheduler::with_rate(50.0).interval(),
        Duration::from_millis(20)
    );
}
