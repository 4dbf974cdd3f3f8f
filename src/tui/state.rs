//! Board-level UI state: the ticket store plus everything the terminal
//! needs on top of it (focus, cursors, the live form buffer, the pending
//! delete confirmation).

use crate::domain::ticket::TicketDraft;
use crate::store::TicketStore;
use crate::view;

#[derive(Debug)]
pub struct BoardState {
    pub store: TicketStore,
    pub form: FormState,
    pub focus: Region,
    pub table_cursor: usize,
    pub cards_cursor: usize,
    /// Ticket id awaiting the y/n delete confirmation.
    pub pending_delete: Option<u64>,
    pub should_quit: bool,
}

impl BoardState {
    pub fn new() -> Self {
        let store = TicketStore::new();
        let form = FormState::seeded(&store);
        Self {
            store,
            form,
            focus: Region::Table,
            table_cursor: 0,
            cards_cursor: 0,
            pending_delete: None,
            should_quit: false,
        }
    }

    /// Re-fills the form buffer from the store, discarding unsaved edits.
    /// Called when the selection changes and after every list refresh,
    /// mirroring the full re-render of all regions.
    pub fn reseed_form(&mut self) {
        self.form = FormState::seeded(&self.store);
    }

    pub fn table_ids(&self) -> Vec<u64> {
        view::table_order(self.store.tickets())
    }

    pub fn card_ids(&self) -> Vec<u64> {
        view::card_order(self.store.tickets())
    }

    pub fn clamp_cursors(&mut self) {
        let rows = self.table_ids().len();
        if rows == 0 {
            self.table_cursor = 0;
        } else if self.table_cursor >= rows {
            self.table_cursor = rows - 1;
        }
        let cards = self.card_ids().len();
        if cards == 0 {
            self.cards_cursor = 0;
        } else if self.cards_cursor >= cards {
            self.cards_cursor = cards - 1;
        }
    }

    /// User-initiated selection of the ticket under the cursor: clears the
    /// alert, moves the pointer, refills the form.
    pub fn select_under_cursor(&mut self) {
        let id = match self.focus {
            Region::Table => self.table_ids().get(self.table_cursor).copied(),
            Region::Cards => self.card_ids().get(self.cards_cursor).copied(),
            Region::Form => return,
        };
        if let Some(id) = id {
            self.store.clear_notice();
            self.store.select(Some(id));
            self.reseed_form();
        }
    }

    /// "New ticket": clear the selection so the form becomes a blank
    /// create form with a guessed next id, and put focus on it.
    pub fn start_new_ticket(&mut self) {
        self.store.clear_notice();
        self.store.select(None);
        self.reseed_form();
        self.focus = Region::Form;
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Cards,
    Table,
    Form,
}

impl Region {
    pub fn next(&self) -> Self {
        match self {
            Region::Cards => Region::Table,
            Region::Table => Region::Form,
            Region::Form => Region::Cards,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Region::Cards => Region::Form,
            Region::Table => Region::Cards,
            Region::Form => Region::Table,
        }
    }
}

/// The live form buffer. Holds user keystrokes between renders; thrown
/// away and re-seeded whenever the store changes underneath it.
#[derive(Debug, Clone)]
pub struct FormState {
    pub draft: TicketDraft,
    pub field: FormField,
}

impl FormState {
    pub fn seeded(store: &TicketStore) -> Self {
        let projected = view::project(store.tickets(), store.selected_id());
        Self {
            draft: projected.form.draft,
            field: FormField::Title,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(buffer) = self.text_buffer() {
            buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.text_buffer() {
            buffer.pop();
        }
    }

    /// Left/right on the enumerated fields.
    pub fn cycle(&mut self, forward: bool) {
        match self.field {
            FormField::Status => {
                self.draft.status = if forward {
                    self.draft.status.next()
                } else {
                    self.draft.status.prev()
                };
            }
            FormField::Priority => self.draft.cycle_priority(forward),
            _ => {}
        }
    }

    fn text_buffer(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Title => Some(&mut self.draft.title),
            FormField::Description => Some(&mut self.draft.description),
            FormField::Assignee => Some(&mut self.draft.assignee),
            FormField::Status | FormField::Priority => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Assignee,
    Status,
    Priority,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Assignee,
        FormField::Status,
        FormField::Priority,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Assignee => "Assignee",
            FormField::Status => "Status",
            FormField::Priority => "Priority",
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, FormField::Status | FormField::Priority)
    }

    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Assignee,
            FormField::Assignee => FormField::Status,
            FormField::Status => FormField::Priority,
            FormField::Priority => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Priority,
            FormField::Description => FormField::Title,
            FormField::Assignee => FormField::Description,
            FormField::Status => FormField::Assignee,
            FormField::Priority => FormField::Status,
        }
    }
}
