use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_PRIORITY: &str = "normal";

/// Cycle order for the form's priority field. The client otherwise treats
/// priority as an opaque string, so unknown values pass through untouched.
pub const PRIORITY_CYCLE: [&str; 3] = ["low", "normal", "high"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Done => "done",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "open" => Some(Status::Open),
            "in_progress" => Some(Status::InProgress),
            "done" => Some(Status::Done),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Status::Open => Status::InProgress,
            Status::InProgress => Status::Done,
            Status::Done => Status::Open,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Status::Open => Status::Done,
            Status::InProgress => Status::Open,
            Status::Done => Status::InProgress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: String,
    pub assignee: String,
}

/// Editable form payload. Text fields hold whatever the user typed;
/// `validate` trims and enforces required-field presence.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDraft {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub assignee: String,
    pub status: Status,
    pub priority: String,
}

impl TicketDraft {
    pub fn blank(id: u64) -> Self {
        Self {
            id,
            title: String::new(),
            description: String::new(),
            assignee: String::new(),
            status: Status::Open,
            priority: DEFAULT_PRIORITY.to_string(),
        }
    }

    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id,
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            assignee: ticket.assignee.clone(),
            status: ticket.status,
            priority: ticket.priority.clone(),
        }
    }

    pub fn validate(&self) -> AppResult<Ticket> {
        let title = self.title.trim();
        let description = self.description.trim();
        let assignee = self.assignee.trim();

        if title.is_empty() || description.is_empty() || assignee.is_empty() {
            return Err(AppError::Validation(
                "Please fill all required fields.".to_string(),
            ));
        }

        Ok(Ticket {
            id: self.id,
            title: title.to_string(),
            description: description.to_string(),
            status: self.status,
            priority: self.priority.clone(),
            assignee: assignee.to_string(),
        })
    }

    pub fn cycle_priority(&mut self, forward: bool) {
        let known = PRIORITY_CYCLE;
        let pos = known.iter().position(|p| *p == self.priority);
        self.priority = match (pos, forward) {
            (Some(i), true) => known[(i + 1) % known.len()].to_string(),
            (Some(i), false) => known[(i + known.len() - 1) % known.len()].to_string(),
            // Unknown value: leave the cycle at a known starting point.
            (None, _) => DEFAULT_PRIORITY.to_string(),
        };
    }
}
