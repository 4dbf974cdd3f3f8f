use async_trait::async_trait;

use crate::domain::ticket::Ticket;
use crate::error::AppResult;

#[async_trait]
pub trait TicketTrackerService: Send + Sync {
    async fn list_tickets(&self) -> AppResult<Vec<Ticket>>;
    async fn get_ticket(&self, id: u64) -> AppResult<Ticket>;
    async fn create_ticket(&self, ticket: &Ticket) -> AppResult<()>;
    async fn update_ticket(&self, ticket: &Ticket) -> AppResult<()>;
    async fn delete_ticket(&self, id: u64) -> AppResult<()>;
}
