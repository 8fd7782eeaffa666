//! Pure round logic.
//!
//! Every public function takes an immutable reference to the current
//! `RoundState` (and, where needed, an RNG handle or the round clock) and
//! returns a brand-new `RoundState`.  Side effects are limited to the
//! injected RNG.  Once a round is over these functions return it unchanged.

use std::time::Duration;

use rand::Rng;

use crate::config::Settings;
use crate::difficulty::{spawn_count, Difficulty};
use crate::entities::{GameStatus, Point, RoundState, Target};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh round: zeroed counters, level 1, no targets.
pub fn init_state(settings: &Settings) -> RoundState {
    log::info!("Round started ({} s)", settings.round_secs);
    RoundState {
        targets: Vec::new(),
        bursts: Vec::new(),
        score: 0,
        shots: 0,
        hits: 0,
        level: 1,
        difficulty: Difficulty::new(settings.spawn_start_ms),
        elapsed: Duration::ZERO,
        status: GameStatus::Running,
        settings: settings.clone(),
    }
}

// ── Event-driven transitions ─────────────────────────────────────────────────

/// Spawn-timer tick: add one or two targets depending on the level.
pub fn spawn_tick(state: &RoundState, rng: &mut impl Rng) -> RoundState {
    if state.is_over() {
        return state.clone();
    }

    let mut targets = state.targets.clone();
    for _ in 0..spawn_count(state.level) {
        let target = Target::spawn(rng, state.difficulty.speed_scale);
        log::debug!(
            "Spawned r={} at ({:.0}, {:.0})",
            target.radius,
            target.x,
            target.y
        );
        targets.push(target);
    }

    RoundState {
        targets,
        ..state.clone()
    }
}

/// Fire at `point`.  The most recently spawned target under the point is
/// removed; overlapping targets below it survive.  A miss only costs the shot.
pub fn shoot(state: &RoundState, point: Point) -> RoundState {
    if state.is_over() {
        return state.clone();
    }

    let shots = state.shots + 1;
    let Some(index) = state.targets.iter().rposition(|t| t.hit_test(point)) else {
        log::debug!("Miss at ({:.0}, {:.0})", point.x, point.y);
        return RoundState {
            shots,
            ..state.clone()
        };
    };

    let mut targets = state.targets.clone();
    let mut hit = targets.remove(index);
    hit.flash();
    log::debug!("Hit at ({:.0}, {:.0})", point.x, point.y);

    let mut bursts = state.bursts.clone();
    bursts.push(hit);

    RoundState {
        targets,
        bursts,
        shots,
        hits: state.hits + 1,
        score: state.score + 1,
        ..state.clone()
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance one frame.  `elapsed` is the time since the round started.
///
/// Moves every target, fades bursts, re-evaluates the level, then ends the
/// round if the clock has run out or the miss limit has been reached.
pub fn tick(state: &RoundState, elapsed: Duration) -> RoundState {
    if state.is_over() {
        return state.clone();
    }

    // ── 1. Move targets ──────────────────────────────────────────────────────
    let mut targets = state.targets.clone();
    for target in &mut targets {
        target.advance();
    }

    // ── 2. Fade bursts, dropping the finished ones ──────────────────────────
    let bursts: Vec<Target> = state
        .bursts
        .iter()
        .cloned()
        .filter_map(|mut b| {
            b.advance();
            (b.hit_flash > 0).then_some(b)
        })
        .collect();

    // ── 3. Level-up ──────────────────────────────────────────────────────────
    let settings = &state.settings;
    let (level, difficulty) = match state.difficulty.maybe_level_up(
        state.level,
        state.score,
        settings.level_step,
        settings.spawn_min_ms,
    ) {
        Some(up) => {
            log::info!(
                "Level {} (spawn every {} ms, speed x{:.2})",
                up.level,
                up.difficulty.spawn_interval_ms,
                up.difficulty.speed_scale
            );
            (up.level, up.difficulty)
        }
        None => (state.level, state.difficulty),
    };

    // ── 4. Round end ─────────────────────────────────────────────────────────
    let out_of_time = elapsed >= settings.round_time();
    let out_of_misses = settings
        .max_misses
        .is_some_and(|limit| state.misses() >= limit);

    let status = if out_of_time || out_of_misses {
        log::info!(
            "Round over: score={} shots={} hits={} accuracy={:.1}%",
            state.score,
            state.shots,
            state.hits,
            state.accuracy()
        );
        GameStatus::GameOver
    } else {
        GameStatus::Running
    };

    RoundState {
        targets,
        bursts,
        level,
        difficulty,
        elapsed: elapsed.min(settings.round_time()),
        status,
        ..state.clone()
    }
}
