use crate::domain::ticket::Ticket;

/// Session-lifetime client state: the in-memory ticket list, the selected
/// ticket id, and the one-slot user-visible notice. The list is only ever
/// replaced wholesale from the backend; the backend stays the source of
/// truth and this store is a disposable cache.
#[derive(Debug, Default)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    selected_id: Option<u64>,
    notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    pub fn selected_ticket(&self) -> Option<&Ticket> {
        self.selected_id
            .and_then(|id| self.tickets.iter().find(|t| t.id == id))
    }

    pub fn contains(&self, id: u64) -> bool {
        self.tickets.iter().any(|t| t.id == id)
    }

    /// Wholesale replacement after a successful list fetch. The selection
    /// pointer is left alone; if the selected id vanished, the detail form
    /// falls back to create mode via the projection.
    pub fn replace(&mut self, tickets: Vec<Ticket>) {
        self.tickets = tickets;
    }

    /// Sets or clears the selection. Does not touch the backend and does
    /// not clear the notice; user-initiated selection clears it at the
    /// input layer so a programmatic re-select after a save keeps the
    /// success message visible.
    pub fn select(&mut self, id: Option<u64>) {
        self.selected_id = id;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::Status;

    fn ticket(id: u64) -> Ticket {
        Ticket {
            id,
            title: format!("Ticket {id}"),
            description: "desc".to_string(),
            status: Status::Open,
            priority: "normal".to_string(),
            assignee: "alex".to_string(),
        }
    }

    #[test]
    fn replace_swaps_the_whole_list() {
        let mut store = TicketStore::new();
        store.replace(vec![ticket(1), ticket(2)]);
        store.replace(vec![ticket(3)]);
        assert_eq!(store.tickets().len(), 1);
        assert!(store.contains(3));
        assert!(!store.contains(1));
    }

    #[test]
    fn selection_survives_replacement() {
        let mut store = TicketStore::new();
        store.replace(vec![ticket(1), ticket(2)]);
        store.select(Some(2));
        store.replace(vec![ticket(1)]);
        // Pointer is kept; resolution just fails.
        assert_eq!(store.selected_id(), Some(2));
        assert!(store.selected_ticket().is_none());
    }

    #[test]
    fn selected_ticket_resolves_by_id() {
        let mut store = TicketStore::new();
        store.replace(vec![ticket(1), ticket(2)]);
        store.select(Some(1));
        assert_eq!(store.selected_ticket().unwrap().id, 1);
        store.select(None);
        assert!(store.selected_ticket().is_none());
    }

    #[test]
    fn notice_is_single_slot() {
        let mut store = TicketStore::new();
        store.set_notice(Notice::error("first"));
        store.set_notice(Notice::info("second"));
        assert_eq!(store.notice().unwrap().message, "second");
        assert_eq!(store.notice().unwrap().severity, Severity::Info);
        store.clear_notice();
        assert!(store.notice().is_none());
    }
}
