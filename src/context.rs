use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::TicketTrackerService;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub tracker: Arc<dyn TicketTrackerService>,
}

impl AppContext {
    pub fn new(config: AppConfig, tracker: Arc<dyn TicketTrackerService>) -> Self {
        Self { config, tracker }
    }
}
