//! Game loop runner.
//!
//! [`run_game`] drives [`Judge::play_turn`] until a wolf catches the player
//! or the turn cap is reached, then packages the result as a
//! [`GameOutcome`]. The render hook gets a full redraw before the first
//! turn and incremental updates after every mutation.

use chrono::Utc;
use herding_types::{EndReason, GameOutcome};
use tracing::info;
use uuid::Uuid;

use crate::decision::Player;
use crate::error::GameError;
use crate::judge::{Judge, MoveOutcome};
use crate::render::RenderHook;

/// Play a game to completion.
///
/// # Errors
///
/// Returns [`GameError`] if a turn fails unrecoverably.
pub fn run_game(
    judge: &mut Judge,
    player: &mut dyn Player,
    hook: &mut dyn RenderHook,
) -> Result<GameOutcome, GameError> {
    let run_id = Uuid::now_v7();
    let started_at = Utc::now();

    info!(
        %run_id,
        seed = judge.seed(),
        width = judge.board().width(),
        height = judge.board().height(),
        cows = judge.initial_cows(),
        max_turns = judge.max_turns(),
        "Game starting"
    );

    judge.redraw(hook);

    while !judge.is_finished() {
        if let MoveOutcome::Caught { at } = judge.play_turn(player, hook)? {
            info!(turn = judge.session().turns, at = %at, "Wolf caught the player");
        }
    }

    let session = judge.session();
    let outcome = GameOutcome {
        run_id,
        seed: judge.seed(),
        end_reason: judge.end_reason().unwrap_or(EndReason::TurnLimit),
        turns: session.turns,
        cows_delivered: session.cows_delivered,
        cows_lost: session.cows_lost,
        cows_remaining: judge.cows_remaining(),
        has_flag: session.has_flag,
        score: session.score(),
        started_at,
        finished_at: Utc::now(),
    };

    log_game_end(&outcome);
    Ok(outcome)
}

/// Log a finished game at info level.
pub fn log_game_end(outcome: &GameOutcome) {
    let elapsed_ms = outcome
        .finished_at
        .signed_duration_since(outcome.started_at)
        .num_milliseconds();
    info!(
        run_id = %outcome.run_id,
        end_reason = ?outcome.end_reason,
        turns = outcome.turns,
        delivered = outcome.cows_delivered,
        lost = outcome.cows_lost,
        remaining = outcome.cows_remaining,
        score = %outcome.score,
        elapsed_ms,
        "Game ended"
    );
}

impl Judge {
    /// Play to completion with `player`. See [`run_game`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if a turn fails unrecoverably.
    pub fn run(
        &mut self,
        player: &mut dyn Player,
        hook: &mut dyn RenderHook,
    ) -> Result<GameOutcome, GameError> {
        run_game(self, player, hook)
    }
}
