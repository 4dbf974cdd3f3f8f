use async_trait::async_trait;
use reqwest::{Client, Response, header::ACCEPT};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::services::TicketTrackerService;

/// REST client for the ticket tracker backend.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_endpoint(&self) -> String {
        format!("{}/tickets", self.base_url)
    }

    fn ticket_endpoint(&self, id: u64) -> String {
        format!("{}/tickets/{}", self.base_url, id)
    }

    /// Converts a non-success response into a `Backend` error, pulling the
    /// `detail` field out of the JSON body when the backend provides one.
    async fn backend_error(response: Response) -> AppError {
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        warn!(status = status.as_u16(), ?detail, "tracker request failed");
        AppError::Backend {
            status: status.as_u16(),
            detail,
        }
    }

    async fn expect_success(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::backend_error(response).await)
        }
    }

    fn network(err: reqwest::Error) -> AppError {
        AppError::Network(format!("failed to call tracker: {err}"))
    }
}

#[async_trait]
impl TicketTrackerService for ApiClient {
    async fn list_tickets(&self) -> AppResult<Vec<Ticket>> {
        let url = self.collection_endpoint();
        debug!(%url, "listing tickets");
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(Self::network)?;
        let response = Self::expect_success(response).await?;
        response
            .json::<Vec<Ticket>>()
            .await
            .map_err(|err| AppError::Network(format!("failed to parse tracker response: {err}")))
    }

    async fn get_ticket(&self, id: u64) -> AppResult<Ticket> {
        let url = self.ticket_endpoint(id);
        debug!(%url, "fetching ticket");
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(Self::network)?;
        let response = Self::expect_success(response).await?;
        response
            .json::<Ticket>()
            .await
            .map_err(|err| AppError::Network(format!("failed to parse tracker response: {err}")))
    }

    async fn create_ticket(&self, ticket: &Ticket) -> AppResult<()> {
        let url = self.collection_endpoint();
        debug!(%url, id = ticket.id, "creating ticket");
        let response = self
            .http
            .post(&url)
            .json(ticket)
            .send()
            .await
            .map_err(Self::network)?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn update_ticket(&self, ticket: &Ticket) -> AppResult<()> {
        let url = self.ticket_endpoint(ticket.id);
        debug!(%url, "updating ticket");
        let response = self
            .http
            .put(&url)
            .json(ticket)
            .send()
            .await
            .map_err(Self::network)?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn delete_ticket(&self, id: u64) -> AppResult<()> {
        let url = self.ticket_endpoint(id);
        debug!(%url, "deleting ticket");
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(Self::network)?;
        Self::expect_success(response).await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}
