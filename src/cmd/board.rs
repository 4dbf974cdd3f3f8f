use crate::context::AppContext;
use crate::error::AppResult;
use crate::tui;

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    tui::run(ctx).await
}
