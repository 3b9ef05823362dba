//! Per-frame simulation tick
//!
//! Core game loop. The host calls [`tick`] once per animation frame; motion is
//! per tick, only the countdown uses wall-clock `dt`.

use rand::Rng;

use super::hit;
use super::physics;
use super::spawn::{spawn_chance, spawn_target};
use super::state::{ClickMarker, GamePhase, GameSession};
use crate::consts::*;
use crate::presenter::Presenter;

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, dt: f32, presenter: &mut impl Presenter) {
    report_phase(session, presenter);

    match session.phase {
        GamePhase::Countdown => advance_countdown(session, dt, presenter),
        GamePhase::Running => run_frame(session, presenter),
        GamePhase::Idle | GamePhase::GameOver | GamePhase::Completed => {}
    }

    report_phase(session, presenter);
}

/// Tell the presenter about a phase change made since the last report
fn report_phase(session: &mut GameSession, presenter: &mut impl Presenter) {
    if session.phase == session.reported_phase {
        return;
    }
    session.reported_phase = session.phase;
    presenter.on_phase_change(session.phase);

    let stats = &session.stats;
    match session.phase {
        GamePhase::GameOver => presenter.on_game_over(stats.score, stats.level),
        GamePhase::Completed => presenter.on_quit(stats.score, stats.level),
        _ => {}
    }
}

fn advance_countdown(session: &mut GameSession, dt: f32, presenter: &mut impl Presenter) {
    if session.announced_countdown != Some(session.countdown_remaining) {
        session.announced_countdown = Some(session.countdown_remaining);
        presenter.on_countdown(session.countdown_remaining);
    }

    session.countdown_elapsed += dt.max(0.0);
    while session.countdown_elapsed >= COUNTDOWN_STEP_SECS {
        session.countdown_elapsed -= COUNTDOWN_STEP_SECS;
        session.countdown_remaining = session.countdown_remaining.saturating_sub(1);

        if session.countdown_remaining == 0 {
            session.begin_run();
            let stats = &session.stats;
            presenter.update_stats(stats.score, stats.hp, stats.level);
            return;
        }

        session.announced_countdown = Some(session.countdown_remaining);
        presenter.on_countdown(session.countdown_remaining);
    }
}

fn run_frame(session: &mut GameSession, presenter: &mut impl Presenter) {
    // Lives are checked before anything moves, so the tick that drops hp to
    // zero still gets drawn
    if session.stats.is_defeated() {
        log::info!(
            "Game over (score {}, level {})",
            session.stats.score,
            session.stats.level
        );
        session.phase = GamePhase::GameOver;
        session.pending_taps.clear();
        return;
    }

    session.time_ticks += 1;
    let scale = session.stats.current_scale;
    let level = session.stats.level;

    if session.rng.random::<f32>() < spawn_chance(&session.tuning, level, scale) {
        let id = session.next_target_id();
        let target = spawn_target(&mut session.rng, &session.tuning, level, scale, id);
        session.targets.push(target);
    }

    physics::step(&mut session.targets, &session.tuning, scale);

    presenter.render_frame(&session.targets, session.click_marker.as_ref());

    resolve_taps(session, presenter);
}

fn resolve_taps(session: &mut GameSession, presenter: &mut impl Presenter) {
    let taps = std::mem::take(&mut session.pending_taps);
    for point in taps {
        let Some(index) = hit::resolve(point, &session.targets) else {
            session.click_marker = Some(ClickMarker { pos: point, hit: false });
            continue;
        };

        let target = &mut session.targets[index];
        target.active = false;
        log::debug!("Hit #{} {}", target.id, target.kind.as_str());

        session.stats.apply_hit(target.kind);
        session.click_marker = Some(ClickMarker { pos: point, hit: true });
        presenter.on_hit(target);

        let stats = &mut session.stats;
        presenter.update_stats(stats.score, stats.hp, stats.level);
        if let Some(level) = stats.check_level_up() {
            presenter.on_level_up(level);
            presenter.update_stats(stats.score, stats.hp, stats.level);
        }
    }
}
