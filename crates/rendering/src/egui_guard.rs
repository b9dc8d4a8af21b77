//! Egui input guard: prevents click-through from the side panel to the map.
//!
//! When egui is handling pointer input, map-level input systems (panning,
//! marker picking) should skip processing.

use bevy_egui::EguiContexts;

/// Returns `true` when egui wants the pointer — i.e. the cursor is over the
/// info panel or egui is actively handling a drag/click.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}
