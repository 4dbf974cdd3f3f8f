use crate::domain::ticket::TicketDraft;
use crate::error::AppError;
use crate::services::TicketTrackerService;
use crate::store::Notice;

/// Result of driving a draft through the submission flow:
/// validate, then create-or-update, then report.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// A required field was missing; no request was made.
    Invalid(String),
    Created(u64),
    Updated(u64),
    Rejected { updating: bool, error: AppError },
}

impl SubmitOutcome {
    pub fn notice(&self) -> Notice {
        match self {
            SubmitOutcome::Invalid(message) => Notice::error(message.clone()),
            SubmitOutcome::Created(_) => Notice::info("Ticket created."),
            SubmitOutcome::Updated(_) => Notice::info("Ticket updated."),
            SubmitOutcome::Rejected { error, .. } => {
                Notice::error(error.user_message("Request failed"))
            }
        }
    }

    pub fn saved_id(&self) -> Option<u64> {
        match self {
            SubmitOutcome::Created(id) | SubmitOutcome::Updated(id) => Some(*id),
            _ => None,
        }
    }
}

/// Saves a draft. `exists` is the membership snapshot taken from the
/// in-memory list at submit time: an id already in the list means update,
/// anything else means create. Validation failures return before any
/// network traffic; request failures leave the caller's state untouched
/// so the form keeps its values.
pub async fn submit_ticket(
    tracker: &dyn TicketTrackerService,
    exists: bool,
    draft: TicketDraft,
) -> SubmitOutcome {
    let ticket = match draft.validate() {
        Ok(ticket) => ticket,
        Err(err) => return SubmitOutcome::Invalid(err.to_string()),
    };

    let id = ticket.id;
    let result = if exists {
        tracker.update_ticket(&ticket).await
    } else {
        tracker.create_ticket(&ticket).await
    };

    match result {
        Ok(()) if exists => SubmitOutcome::Updated(id),
        Ok(()) => SubmitOutcome::Created(id),
        Err(error) => SubmitOutcome::Rejected {
            updating: exists,
            error,
        },
    }
}

#[derive(Debug)]
pub enum RemoveOutcome {
    /// Nothing was selected; no request was made.
    NothingSelected,
    Removed(u64),
    Rejected { id: u64, error: AppError },
}

impl RemoveOutcome {
    pub fn notice(&self) -> Notice {
        match self {
            RemoveOutcome::NothingSelected => Notice::error(AppError::NoSelection.to_string()),
            RemoveOutcome::Removed(_) => Notice::info("Ticket deleted."),
            RemoveOutcome::Rejected { error, .. } => {
                Notice::error(error.user_message("Delete failed"))
            }
        }
    }
}

/// Deletes the selected ticket. Confirmation happens at the UI layer
/// before this is called; a null selection short-circuits without touching
/// the backend.
pub async fn remove_ticket(
    tracker: &dyn TicketTrackerService,
    selected: Option<u64>,
) -> RemoveOutcome {
    let Some(id) = selected else {
        return RemoveOutcome::NothingSelected;
    };

    match tracker.delete_ticket(id).await {
        Ok(()) => RemoveOutcome::Removed(id),
        Err(error) => RemoveOutcome::Rejected { id, error },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::ticket::{Status, Ticket};
    use crate::error::AppResult;
    use crate::store::Severity;

    /// Records which backend operation was issued, if any.
    #[derive(Default)]
    struct RecordingTracker {
        calls: Mutex<Vec<String>>,
        fail_with: Mutex<Option<AppError>>,
    }

    impl RecordingTracker {
        fn failing(error: AppError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Mutex::new(Some(error)),
            }
        }

        fn record(&self, call: impl Into<String>) -> AppResult<()> {
            self.calls.lock().unwrap().push(call.into());
            match self.fail_with.lock().unwrap().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TicketTrackerService for RecordingTracker {
        async fn list_tickets(&self) -> AppResult<Vec<Ticket>> {
            self.record("list")?;
            Ok(Vec::new())
        }

        async fn get_ticket(&self, id: u64) -> AppResult<Ticket> {
            self.record(format!("get {id}"))?;
            Err(AppError::Backend {
                status: 404,
                detail: None,
            })
        }

        async fn create_ticket(&self, ticket: &Ticket) -> AppResult<()> {
            self.record(format!("create {}", ticket.id))
        }

        async fn update_ticket(&self, ticket: &Ticket) -> AppResult<()> {
            self.record(format!("update {}", ticket.id))
        }

        async fn delete_ticket(&self, id: u64) -> AppResult<()> {
            self.record(format!("delete {id}"))
        }
    }

    fn draft(id: u64) -> TicketDraft {
        TicketDraft {
            id,
            title: "Fix login bug".to_string(),
            description: "Password rejected".to_string(),
            assignee: "Dima".to_string(),
            status: Status::Open,
            priority: "high".to_string(),
        }
    }

    #[tokio::test]
    async fn existing_id_issues_update() {
        let tracker = RecordingTracker::default();
        let outcome = submit_ticket(&tracker, true, draft(4)).await;
        assert!(matches!(outcome, SubmitOutcome::Updated(4)));
        assert_eq!(tracker.calls(), vec!["update 4"]);
    }

    #[tokio::test]
    async fn unknown_id_issues_create() {
        let tracker = RecordingTracker::default();
        let outcome = submit_ticket(&tracker, false, draft(9)).await;
        assert!(matches!(outcome, SubmitOutcome::Created(9)));
        assert_eq!(tracker.calls(), vec!["create 9"]);
    }

    #[tokio::test]
    async fn invalid_draft_makes_no_request() {
        let tracker = RecordingTracker::default();
        let mut bad = draft(1);
        bad.title = "   ".to_string();
        let outcome = submit_ticket(&tracker, false, bad).await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(
            outcome.notice().message,
            "Please fill all required fields."
        );
        assert!(tracker.calls().is_empty());
    }

    #[tokio::test]
    async fn backend_detail_surfaces_in_rejection_notice() {
        let tracker = RecordingTracker::failing(AppError::Backend {
            status: 409,
            detail: Some("Ticket already exists".to_string()),
        });
        let outcome = submit_ticket(&tracker, false, draft(2)).await;
        let notice = outcome.notice();
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, "Ticket already exists");
    }

    #[tokio::test]
    async fn remove_without_selection_makes_no_request() {
        let tracker = RecordingTracker::default();
        let outcome = remove_ticket(&tracker, None).await;
        assert!(matches!(outcome, RemoveOutcome::NothingSelected));
        assert_eq!(outcome.notice().message, "No ticket selected.");
        assert!(tracker.calls().is_empty());
    }

    #[tokio::test]
    async fn remove_deletes_the_selected_id() {
        let tracker = RecordingTracker::default();
        let outcome = remove_ticket(&tracker, Some(5)).await;
        assert!(matches!(outcome, RemoveOutcome::Removed(5)));
        assert_eq!(tracker.calls(), vec!["delete 5"]);
        assert_eq!(outcome.notice().message, "Ticket deleted.");
    }

    #[tokio::test]
    async fn remove_failure_uses_delete_fallback_message() {
        let tracker = RecordingTracker::failing(AppError::Backend {
            status: 500,
            detail: None,
        });
        let outcome = remove_ticket(&tracker, Some(5)).await;
        assert_eq!(outcome.notice().message, "Delete failed with status 500");
    }
}
