//! Keyboard input processing.
//!
//! Navigation and form editing mutate [`BoardState`] directly; anything
//! that needs a backend round-trip or other side effect comes back to the
//! event loop as an [`Action`].

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::domain::ticket::TicketDraft;

use super::state::{BoardState, Region};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Refresh,
    Submit { draft: TicketDraft, exists: bool },
    /// Delete request, already past confirmation (or carrying `None` so
    /// the no-selection message comes from the remove flow itself).
    Remove(Option<u64>),
    ThemeToggled,
    None,
}

pub fn handle_key_event(key: KeyEvent, state: &mut BoardState) -> Action {
    // Ctrl+C quits from anywhere, including mid-edit.
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // A pending delete confirmation captures all input.
    if let Some(id) = state.pending_delete {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                state.pending_delete = None;
                return Action::Remove(Some(id));
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                state.pending_delete = None;
            }
            _ => {}
        }
        return Action::None;
    }

    match key.code {
        KeyCode::Tab => {
            state.focus = state.focus.next();
            return Action::None;
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            return Action::None;
        }
        _ => {}
    }

    match state.focus {
        Region::Form => handle_form_key(key, state),
        Region::Table | Region::Cards => handle_browse_key(key, state),
    }
}

fn handle_browse_key(key: KeyEvent, state: &mut BoardState) -> Action {
    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('r') => return Action::Refresh,
        KeyCode::Char('t') => return Action::ThemeToggled,
        KeyCode::Char('n') => state.start_new_ticket(),
        KeyCode::Char('d') => return request_delete(state),
        KeyCode::Up | KeyCode::Char('k') => move_cursor(state, -1),
        KeyCode::Down | KeyCode::Char('j') => move_cursor(state, 1),
        // The gallery runs horizontally.
        KeyCode::Left if state.focus == Region::Cards => move_cursor(state, -1),
        KeyCode::Right if state.focus == Region::Cards => move_cursor(state, 1),
        KeyCode::Enter => state.select_under_cursor(),
        _ => {}
    }
    Action::None
}

fn handle_form_key(key: KeyEvent, state: &mut BoardState) -> Action {
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('d') {
        return request_delete(state);
    }

    match key.code {
        KeyCode::Esc => state.focus = Region::Table,
        KeyCode::Up => state.form.field = state.form.field.prev(),
        KeyCode::Down => state.form.field = state.form.field.next(),
        KeyCode::Left => state.form.cycle(false),
        KeyCode::Right => state.form.cycle(true),
        KeyCode::Backspace => state.form.backspace(),
        KeyCode::Enter => {
            let draft = state.form.draft.clone();
            let exists = state.store.contains(draft.id);
            return Action::Submit { draft, exists };
        }
        KeyCode::Char(' ') if !state.form.field.is_text() => state.form.cycle(true),
        KeyCode::Char(c) => state.form.insert_char(c),
        _ => {}
    }
    Action::None
}

/// `d` on a selection opens the confirmation prompt; with nothing selected
/// the remove flow short-circuits into the "No ticket selected." notice.
fn request_delete(state: &mut BoardState) -> Action {
    match state.store.selected_id() {
        Some(id) => {
            state.pending_delete = Some(id);
            Action::None
        }
        None => Action::Remove(None),
    }
}

fn move_cursor(state: &mut BoardState, delta: i32) {
    let cursor = match state.focus {
        Region::Table => &mut state.table_cursor,
        Region::Cards => &mut state.cards_cursor,
        Region::Form => return,
    };
    *cursor = if delta < 0 {
        cursor.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        cursor.saturating_add(delta as usize)
    };
    state.clamp_cursors();
}

/// Poll for the next key event, returning after `timeout` so the loop can
/// keep draining completed backend calls.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            return Ok(Some(key));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::{Status, Ticket};
    use crate::tui::state::FormField;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

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
    fn q_quits_while_browsing() {
        let mut state = BoardState::new();
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mut state), Action::Quit);
    }

    #[test]
    fn q_types_into_the_form() {
        let mut state = BoardState::new();
        state.focus = Region::Form;
        state.form.field = FormField::Title;
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mut state), Action::None);
        assert_eq!(state.form.draft.title, "q");
    }

    #[test]
    fn ctrl_c_quits_even_mid_edit() {
        let mut state = BoardState::new();
        state.focus = Region::Form;
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key, &mut state), Action::Quit);
    }

    #[test]
    fn enter_in_form_submits_with_membership_snapshot() {
        let mut state = BoardState::new();
        state.store.replace(vec![ticket(2)]);
        state.store.select(Some(2));
        state.reseed_form();
        state.focus = Region::Form;

        match handle_key_event(key(KeyCode::Enter), &mut state) {
            Action::Submit { draft, exists } => {
                assert_eq!(draft.id, 2);
                assert!(exists);
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn delete_without_selection_skips_confirmation() {
        let mut state = BoardState::new();
        let action = handle_key_event(key(KeyCode::Char('d')), &mut state);
        assert_eq!(action, Action::Remove(None));
        assert_eq!(state.pending_delete, None);
    }

    #[test]
    fn delete_with_selection_asks_first() {
        let mut state = BoardState::new();
        state.store.replace(vec![ticket(3)]);
        state.store.select(Some(3));

        assert_eq!(handle_key_event(key(KeyCode::Char('d')), &mut state), Action::None);
        assert_eq!(state.pending_delete, Some(3));

        // 'n' cancels without a request.
        assert_eq!(handle_key_event(key(KeyCode::Char('n')), &mut state), Action::None);
        assert_eq!(state.pending_delete, None);

        handle_key_event(key(KeyCode::Char('d')), &mut state);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('y')), &mut state),
            Action::Remove(Some(3))
        );
    }

    #[test]
    fn tab_cycles_focus_regions() {
        let mut state = BoardState::new();
        assert_eq!(state.focus, Region::Table);
        handle_key_event(key(KeyCode::Tab), &mut state);
        assert_eq!(state.focus, Region::Form);
        handle_key_event(key(KeyCode::BackTab), &mut state);
        assert_eq!(state.focus, Region::Table);
    }

    #[test]
    fn space_cycles_enumerated_fields_only() {
        let mut state = BoardState::new();
        state.focus = Region::Form;
        state.form.field = FormField::Status;
        handle_key_event(key(KeyCode::Char(' ')), &mut state);
        assert_eq!(state.form.draft.status, Status::InProgress);

        state.form.field = FormField::Assignee;
        handle_key_event(key(KeyCode::Char(' ')), &mut state);
        assert_eq!(state.form.draft.assignee, " ");
    }
}
