//! Render hook seam.
//!
//! The simulation never draws anything. After every mutating operation
//! (placement, player move, cow relocation, cow removal) the judge drains
//! the board's change log and hands it to a [`RenderHook`]. Renderers live
//! outside this crate and subscribe by implementing the trait.

use herding_types::Position;
use herding_world::Board;

/// Receiver for board change notifications.
pub trait RenderHook {
    /// Called with the board after a mutation and the positions that
    /// changed. `changed` is never empty.
    fn on_change(&mut self, board: &Board, changed: &[Position]);
}

/// A render hook that ignores every change.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRenderHook;

impl RenderHook for NoOpRenderHook {
    fn on_change(&mut self, _board: &Board, _changed: &[Position]) {}
}

/// Drain the board's change log into `hook`, skipping empty batches.
pub fn flush(board: &mut Board, hook: &mut dyn RenderHook) {
    let changed = board.take_changes();
    if !changed.is_empty() {
        hook.on_change(board, &changed);
    }
}
