//! Pure projection of client state into the four board regions.
//!
//! Nothing in here talks to a terminal or the network: the board UI and
//! the console commands both paint whatever `project` returns, so every
//! rendering rule lives in one testable place.

use crate::domain::ticket::{Status, Ticket, TicketDraft};

/// The card gallery shows at most this many tickets, newest first.
pub const CARD_LIMIT: usize = 6;

#[derive(Debug, Clone)]
pub struct BoardView {
    pub summary: Summary,
    pub cards: Vec<Card>,
    pub rows: Vec<Row>,
    pub form: FormView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl Summary {
    pub fn headline(&self) -> String {
        if self.total == 0 {
            return "No tickets yet.".to_string();
        }
        format!(
            "{} tickets · open: {}, in progress: {}, done: {}",
            self.total, self.open, self.in_progress, self.done
        )
    }
}

/// One gallery card. The placeholder card (empty list) carries no id and
/// no badges.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: Option<u64>,
    pub title: String,
    pub byline: String,
    pub status: Option<Status>,
    pub priority: Option<String>,
    pub selected: bool,
}

impl Card {
    fn placeholder() -> Self {
        Self {
            id: None,
            title: "No tickets yet".to_string(),
            byline: "Create your first ticket on the right.".to_string(),
            status: None,
            priority: None,
            selected: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: u64,
    pub title: String,
    pub assignee: String,
    pub status: Status,
    pub priority: String,
    pub description: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create { next_id: u64 },
    Edit { id: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub mode: FormMode,
    pub heading: String,
    pub meta: String,
    pub draft: TicketDraft,
    pub delete_enabled: bool,
}

pub fn project(tickets: &[Ticket], selected_id: Option<u64>) -> BoardView {
    BoardView {
        summary: summarize(tickets),
        cards: cards(tickets, selected_id),
        rows: rows(tickets, selected_id),
        form: form(tickets, selected_id),
    }
}

pub fn summarize(tickets: &[Ticket]) -> Summary {
    Summary {
        total: tickets.len(),
        open: tickets.iter().filter(|t| t.status == Status::Open).count(),
        in_progress: tickets
            .iter()
            .filter(|t| t.status == Status::InProgress)
            .count(),
        done: tickets.iter().filter(|t| t.status == Status::Done).count(),
    }
}

/// Ids in gallery order: the `CARD_LIMIT` highest ids, descending.
pub fn card_order(tickets: &[Ticket]) -> Vec<u64> {
    let mut ids: Vec<u64> = tickets.iter().map(|t| t.id).collect();
    ids.sort_unstable_by(|a, b| b.cmp(a));
    ids.truncate(CARD_LIMIT);
    ids
}

/// Ids in table order: every ticket, ascending.
pub fn table_order(tickets: &[Ticket]) -> Vec<u64> {
    let mut ids: Vec<u64> = tickets.iter().map(|t| t.id).collect();
    ids.sort_unstable();
    ids
}

fn cards(tickets: &[Ticket], selected_id: Option<u64>) -> Vec<Card> {
    if tickets.is_empty() {
        return vec![Card::placeholder()];
    }
    card_order(tickets)
        .into_iter()
        .filter_map(|id| tickets.iter().find(|t| t.id == id))
        .map(|ticket| Card {
            id: Some(ticket.id),
            title: sanitize(&ticket.title),
            byline: format!("#{} · {}", ticket.id, sanitize(&ticket.assignee)),
            status: Some(ticket.status),
            priority: Some(sanitize(&ticket.priority)),
            selected: selected_id == Some(ticket.id),
        })
        .collect()
}

fn rows(tickets: &[Ticket], selected_id: Option<u64>) -> Vec<Row> {
    table_order(tickets)
        .into_iter()
        .filter_map(|id| tickets.iter().find(|t| t.id == id))
        .map(|ticket| Row {
            id: ticket.id,
            title: sanitize(&ticket.title),
            assignee: sanitize(&ticket.assignee),
            status: ticket.status,
            priority: sanitize(&ticket.priority),
            description: sanitize(&ticket.description),
            selected: selected_id == Some(ticket.id),
        })
        .collect()
}

fn form(tickets: &[Ticket], selected_id: Option<u64>) -> FormView {
    let selected = selected_id.and_then(|id| tickets.iter().find(|t| t.id == id));
    match selected {
        Some(ticket) => FormView {
            mode: FormMode::Edit { id: ticket.id },
            heading: format!("Ticket #{}", ticket.id),
            meta: format!("Editing ticket assigned to {}.", sanitize(&ticket.assignee)),
            draft: TicketDraft::from_ticket(ticket),
            delete_enabled: true,
        },
        None => {
            let id = next_id(tickets);
            FormView {
                mode: FormMode::Create { next_id: id },
                heading: "Create new ticket".to_string(),
                meta: "Fill the form and click Save to create a ticket.".to_string(),
                draft: TicketDraft::blank(id),
                delete_enabled: false,
            }
        }
    }
}

/// Guess for the next backend-assigned id, used only to pre-fill the
/// creation form. The backend remains authoritative.
pub fn next_id(tickets: &[Ticket]) -> u64 {
    tickets.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
}

/// Strips control characters (including ESC) from free text before it
/// reaches a rendered region, so ticket data cannot smuggle terminal
/// escape sequences into the display. Markup like `<script>` is left as
/// literal text; nothing downstream interprets it.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}
