use super::*;

fn at_y(y: f32, t_ms: u64) -> TouchSample {
    TouchSample::new(0.0, y, t_ms)
}

fn pull_to(controller: &mut PullToRefreshController, distance: f32) -> PullMove {
    controller.on_touch_start(at_y(100.0, 0), 0.0);
    controller.on_touch_move(at_y(100.0 + distance, 50), 0.0)
}

#[test]
fn release_short_of_threshold_resets_without_refresh() {
    let mut controller = PullToRefreshController::default();

    pull_to(&mut controller, 79.0);
    assert_eq!(controller.phase(), PullPhase::Pulling);

    assert_eq!(controller.on_touch_end(), PullRelease::Reset);
    assert_eq!(controller.phase(), PullPhase::Idle);
    assert_eq!(controller.pull_distance(), 0.0);
}

#[test]
fn release_at_threshold_requests_refresh() {
    let mut controller = PullToRefreshController::default();

    pull_to(&mut controller, 80.0);
    assert_eq!(controller.on_touch_end(), PullRelease::Refresh);

    let state = controller.state();
    assert!(state.is_refreshing);
    assert!(!state.is_pulling);
    assert_eq!(state.pull_progress, 1.0);
}

#[test]
fn scrolled_surface_never_starts_a_pull() {
    let mut controller = PullToRefreshController::default();

    controller.on_touch_start(at_y(100.0, 0), 5.0);
    let movement = controller.on_touch_move(at_y(300.0, 50), 0.0);

    assert_eq!(movement, PullMove::default());
    assert_eq!(controller.phase(), PullPhase::Idle);
    assert_eq!(controller.on_touch_end(), PullRelease::Ignored);
}

#[test]
fn scrolling_away_mid_pull_freezes_distance() {
    let mut controller = PullToRefreshController::default();

    pull_to(&mut controller, 40.0);
    let movement = controller.on_touch_move(at_y(190.0, 80), 12.0);

    assert!(!movement.prevent_default);
    assert_eq!(controller.pull_distance(), 40.0);
}

#[test]
fn distance_is_clamped_to_max_pull() {
    let mut controller = PullToRefreshController::default();

    let movement = pull_to(&mut controller, 400.0);

    assert_eq!(movement.pull_distance, 120.0);
    assert_eq!(controller.pull_progress(), 1.0);
}

#[test]
fn prevent_default_only_past_small_drag() {
    let mut controller = PullToRefreshController::default();

    assert!(!pull_to(&mut controller, 10.0).prevent_default);
    assert!(controller.on_touch_move(at_y(111.0, 60), 0.0).prevent_default);
}

#[test]
fn upward_drag_does_not_enter_pulling() {
    let mut controller = PullToRefreshController::default();

    let movement = pull_to(&mut controller, -30.0);

    assert_eq!(movement, PullMove::default());
    assert_eq!(controller.phase(), PullPhase::Idle);
}

#[test]
fn dragging_back_above_start_keeps_last_pull() {
    let mut controller = PullToRefreshController::default();

    pull_to(&mut controller, 100.0);
    let movement = controller.on_touch_move(at_y(95.0, 90), 0.0);

    assert!(!movement.prevent_default);
    assert_eq!(movement.pull_distance, 100.0);
    assert_eq!(controller.phase(), PullPhase::Pulling);
    assert_eq!(controller.pull_distance(), 100.0);
    assert_eq!(controller.on_touch_end(), PullRelease::Refresh);
}

#[test]
fn partial_drag_back_lowers_distance() {
    let mut controller = PullToRefreshController::default();

    pull_to(&mut controller, 100.0);
    controller.on_touch_move(at_y(160.0, 90), 0.0);

    assert_eq!(controller.pull_distance(), 60.0);
    assert_eq!(controller.on_touch_end(), PullRelease::Reset);
}

#[test]
fn invalid_config_is_rejected_before_any_move() {
    let negative = PullConfig {
        threshold_px: -1.0,
        ..PullConfig::default()
    };
    let nan = PullConfig {
        max_pull_factor: f32::NAN,
        ..PullConfig::default()
    };

    assert_eq!(
        PullToRefreshController::new(negative).err(),
        Some(ConfigError::NonPositive("pull.threshold_px"))
    );
    assert_eq!(
        PullToRefreshController::new(nan).err(),
        Some(ConfigError::NotFinite("pull.max_pull_factor"))
    );
}

#[test]
fn progress_tracks_fraction_of_threshold() {
    let mut controller = PullToRefreshController::default();

    pull_to(&mut controller, 20.0);

    assert_eq!(controller.pull_progress(), 0.25);
    assert_eq!(controller.state().pull_progress, 0.25);
}

#[test]
fn refreshing_tracks_start_but_ignores_moves() {
    let mut controller = PullToRefreshController::default();
    pull_to(&mut controller, 90.0);
    assert_eq!(controller.on_touch_end(), PullRelease::Refresh);

    controller.on_touch_start(at_y(100.0, 200), 0.0);
    let movement = controller.on_touch_move(at_y(300.0, 250), 0.0);
    assert_eq!(movement, PullMove::default());
    assert_eq!(controller.on_touch_end(), PullRelease::Ignored);
    assert_eq!(controller.phase(), PullPhase::Refreshing);
}

#[test]
fn finish_refresh_returns_to_idle() {
    let mut controller = PullToRefreshController::default();
    pull_to(&mut controller, 100.0);
    controller.on_touch_end();

    controller.finish_refresh();

    assert_eq!(controller.state(), PullState::default());
}

#[test]
fn touch_held_through_settle_can_pull_again() {
    let mut controller = PullToRefreshController::default();
    pull_to(&mut controller, 100.0);
    controller.on_touch_end();

    controller.on_touch_start(at_y(50.0, 300), 0.0);
    controller.finish_refresh();
    controller.on_touch_move(at_y(140.0, 400), 0.0);

    assert_eq!(controller.phase(), PullPhase::Pulling);
    assert_eq!(controller.on_touch_end(), PullRelease::Refresh);
}

#[test]
fn finish_refresh_outside_refresh_is_noop() {
    let mut controller = PullToRefreshController::default();
    pull_to(&mut controller, 30.0);

    controller.finish_refresh();

    assert_eq!(controller.phase(), PullPhase::Pulling);
    assert_eq!(controller.pull_distance(), 30.0);
}

#[test]
fn teardown_drops_pull_but_not_refresh() {
    let mut controller = PullToRefreshController::default();
    pull_to(&mut controller, 50.0);
    controller.teardown();
    controller.teardown();
    assert_eq!(controller.state(), PullState::default());

    pull_to(&mut controller, 85.0);
    controller.on_touch_end();
    controller.teardown();
    assert!(controller.state().is_refreshing);
}

#[test]
fn restart_mid_pull_discards_old_distance() {
    let mut controller = PullToRefreshController::default();
    pull_to(&mut controller, 70.0);

    controller.on_touch_start(at_y(200.0, 100), 0.0);

    assert_eq!(controller.phase(), PullPhase::Idle);
    assert_eq!(controller.pull_distance(), 0.0);
    controller.on_touch_move(at_y(230.0, 150), 0.0);
    assert_eq!(controller.pull_distance(), 30.0);
}

#[test]
fn custom_threshold_is_honoured() {
    let mut controller = PullToRefreshController::new(PullConfig {
        threshold_px: 40.0,
        ..PullConfig::default()
    })
    .expect("valid config");

    let movement = pull_to(&mut controller, 100.0);

    assert_eq!(movement.pull_distance, 60.0);
    assert_eq!(controller.on_touch_end(), PullRelease::Refresh);
    assert_eq!(controller.config().threshold_px, 40.0);
}
