use super::*;

#[test]
fn starts_at_right_edge() {
    let a = TickerAnimator::new(1920.0, 800.0, 4.0).unwrap();
    assert_eq!(a.scroll_x(), 1920.0);
}

#[test]
fn moves_linearly_until_first_wrap() {
    let mut a = TickerAnimator::new(1920.0, 800.0, 4.0).unwrap();
    for n in 1..680u64 {
        let x = a.advance();
        assert_eq!(x, 1920.0 - 4.0 * n as f64);
    }
}

#[test]
fn wraps_after_exactly_680_transitions() {
    let mut a = TickerAnimator::new(1920.0, 800.0, 4.0).unwrap();
    for _ in 0..679 {
        a.advance();
    }
    assert_eq!(a.scroll_x(), -796.0);
    assert_eq!(a.advance(), 1920.0);
    assert_eq!(a.period(), Some(680));
}

#[test]
fn position_at_matches_iteration() {
    let mut a = TickerAnimator::new(1920.0, 800.0, 4.0).unwrap();
    let pure = a;
    for n in 0..3000u64 {
        assert_eq!(pure.position_at(FrameIndex(n)), a.scroll_x(), "frame {n}");
        a.advance();
    }
}

#[test]
fn reachable_states_stay_inside_bounds() {
    for (text_w, step) in [(800.0, 4.0), (813.5, 7.0), (10.0, 333.0), (0.0, 1.0)] {
        let mut a = TickerAnimator::new(1920.0, text_w, step).unwrap();
        for _ in 0..5000 {
            let x = a.advance();
            assert!(x > -text_w - step, "{x} for text {text_w} step {step}");
            assert!(x > -text_w || text_w == 0.0 && x > 0.0);
            assert!(x <= 1920.0);
        }
    }
}

#[test]
fn zero_step_never_moves() {
    let mut a = TickerAnimator::new(1920.0, 800.0, 0.0).unwrap();
    for _ in 0..10 {
        assert_eq!(a.advance(), 1920.0);
    }
    assert_eq!(a.period(), None);
    assert_eq!(a.position_at(FrameIndex(12345)), 1920.0);
}

#[test]
fn invalid_parameters_are_rejected() {
    assert!(TickerAnimator::new(0.0, 1.0, 1.0).is_err());
    assert!(TickerAnimator::new(100.0, -1.0, 1.0).is_err());
    assert!(TickerAnimator::new(100.0, 1.0, f64::NAN).is_err());
    assert!(TickerAnimator::new(100.0, 1.0, -4.0).is_err());
}

#[test]
fn rebinding_text_width_restarts() {
    let mut a = TickerAnimator::new(100.0, 10.0, 5.0).unwrap();
    a.advance();
    let a = a.with_text_width(50.0).unwrap();
    assert_eq!(a.scroll_x(), 100.0);
    assert_eq!(a.period(), Some(30));
}
