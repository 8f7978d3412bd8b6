//! Unit tests for timer.rs (explicit instants, no sleeping)

use super::*;

const EPS: f32 = 1e-4;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_new_timer_is_zeroed() {
    let timer = Timer::starting_at(Instant::now());
    assert_eq!(timer.time(), 0.0);
    assert_eq!(timer.global_time(), 0.0);
    assert_eq!(timer.delta_time(), 0.0);
    assert!(!timer.is_pause());
}

#[test]
fn test_response_advances_times() {
    let t0 = Instant::now();
    let mut timer = Timer::starting_at(t0);

    timer.response_at(t0 + ms(100));
    timer.response_at(t0 + ms(250));

    assert!((timer.global_time() - 0.25).abs() < EPS);
    assert!((timer.global_delta_time() - 0.15).abs() < EPS);
    assert!((timer.time() - 0.25).abs() < EPS);
    assert!((timer.delta_time() - 0.15).abs() < EPS);
}

#[test]
fn test_pause_freezes_animation_time() {
    let t0 = Instant::now();
    let mut timer = Timer::starting_at(t0);
    timer.response_at(t0 + ms(100));

    timer.toggle_pause();
    timer.response_at(t0 + ms(600));
    assert!(timer.is_pause());
    assert_eq!(timer.delta_time(), 0.0);
    assert!((timer.time() - 0.1).abs() < EPS);
    assert!((timer.global_time() - 0.6).abs() < EPS);

    timer.set_pause(false);
    timer.response_at(t0 + ms(700));
    assert!((timer.delta_time() - 0.1).abs() < EPS);
    // 700 ms elapsed, 500 ms of it paused
    assert!((timer.time() - 0.2).abs() < EPS);
}

#[test]
fn test_fps_recomputed_each_second() {
    let t0 = Instant::now();
    let mut timer = Timer::starting_at(t0);
    for i in 1..=50 {
        timer.response_at(t0 + ms(i * 20));
    }
    assert!((timer.fps() - 50.0).abs() < 0.01);

    for i in 1..=25 {
        timer.response_at(t0 + ms(1000 + i * 40));
    }
    assert!((timer.fps() - 25.0).abs() < 0.01);
}

#[test]
fn test_instant_before_last_is_clamped() {
    let t0 = Instant::now();
    let mut timer = Timer::starting_at(t0 + ms(10));
    timer.response_at(t0);
    assert_eq!(timer.global_delta_time(), 0.0);
    assert_eq!(timer.global_time(), 0.0);
}
