//! Interactive ticket board.
//!
//! Layering mirrors the rest of the crate: `state` owns board-level UI
//! state on top of the ticket store, `events` turns keys into state
//! mutations or actions, `app` runs the terminal lifecycle and spawns
//! backend calls, `theme` holds the palettes. All four page regions are
//! re-rendered from the same projection on every frame.

mod app;
mod events;
mod state;
mod theme;

pub use app::BoardApp;

use crate::context::AppContext;
use crate::error::AppResult;

/// Run the board until the user quits.
pub async fn run(ctx: &AppContext) -> AppResult<()> {
    BoardApp::new(ctx).run().await
}
