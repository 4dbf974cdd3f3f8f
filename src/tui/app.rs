//! Board application: terminal lifecycle, event loop, rendering.
//!
//! Every backend round-trip is spawned as a task and reports back through
//! an mpsc channel, so the board stays responsive while requests are in
//! flight. Completions are applied in arrival order; overlapping
//! mutations are not coordinated, and the last completion to arrive
//! determines the rendered state. The backend is authoritative and every
//! success path ends in a wholesale refresh, so the race is acceptable.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::config::{self, ThemePreference};
use crate::context::AppContext;
use crate::domain::ticket::{Ticket, TicketDraft};
use crate::error::{AppError, AppResult};
use crate::services::TicketTrackerService;
use crate::store::{Notice, Severity};
use crate::view::{self, BoardView, Card};
use crate::workflow::ticket::{RemoveOutcome, SubmitOutcome, remove_ticket, submit_ticket};

use super::events::{Action, handle_key_event, poll_event};
use super::state::{BoardState, FormField, Region};
use super::theme::Theme;

/// Completion of a spawned backend call.
enum StoreEvent {
    Listed(AppResult<Vec<Ticket>>),
    Submitted(SubmitOutcome),
    Removed(RemoveOutcome),
}

pub struct BoardApp {
    state: BoardState,
    theme: Theme,
    preference: ThemePreference,
    tracker: Arc<dyn TicketTrackerService>,
    base_url: String,
    events_tx: UnboundedSender<StoreEvent>,
    events_rx: UnboundedReceiver<StoreEvent>,
}

impl BoardApp {
    pub fn new(ctx: &AppContext) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            state: BoardState::new(),
            theme: Theme::from_preference(ctx.config.theme),
            preference: ctx.config.theme,
            tracker: ctx.tracker.clone(),
            base_url: ctx.config.base_url.clone(),
            events_tx,
            events_rx,
        }
    }

    pub async fn run(mut self) -> AppResult<()> {
        let mut terminal = setup_terminal()?;
        self.spawn_refresh();

        let result = self.main_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;
        result
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> AppResult<()> {
        let tick_rate = Duration::from_millis(50);

        loop {
            while let Ok(event) = self.events_rx.try_recv() {
                self.apply(event);
            }

            terminal.draw(|frame| self.render(frame))?;

            if let Some(key) = poll_event(tick_rate)? {
                match handle_key_event(key, &mut self.state) {
                    Action::Quit => self.state.should_quit = true,
                    Action::Refresh => self.spawn_refresh(),
                    Action::Submit { draft, exists } => self.spawn_submit(draft, exists),
                    Action::Remove(selected) => self.spawn_remove(selected),
                    Action::ThemeToggled => self.toggle_theme(),
                    Action::None => {}
                }
            }

            if self.state.should_quit {
                return Ok(());
            }
        }
    }

    fn apply(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Listed(Ok(tickets)) => {
                self.state.store.replace(tickets);
                self.state.clamp_cursors();
                self.state.reseed_form();
            }
            StoreEvent::Listed(Err(err)) => {
                // Prior collection stays untouched.
                self.state.store.set_notice(Notice::error(load_failure(&err)));
            }
            StoreEvent::Submitted(outcome) => {
                self.state.store.set_notice(outcome.notice());
                if let Some(id) = outcome.saved_id() {
                    self.state.store.select(Some(id));
                    self.spawn_refresh();
                }
                // On failure: no refresh, no reseed; the form keeps the
                // values the user typed.
            }
            StoreEvent::Removed(outcome) => {
                self.state.store.set_notice(outcome.notice());
                if let RemoveOutcome::Removed(_) = outcome {
                    self.state.store.select(None);
                    self.spawn_refresh();
                }
            }
        }
    }

    fn spawn_refresh(&self) {
        let tracker = self.tracker.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(StoreEvent::Listed(tracker.list_tickets().await));
        });
    }

    fn spawn_submit(&self, draft: TicketDraft, exists: bool) {
        let tracker = self.tracker.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = submit_ticket(tracker.as_ref(), exists, draft).await;
            let _ = tx.send(StoreEvent::Submitted(outcome));
        });
    }

    fn spawn_remove(&self, selected: Option<u64>) {
        let tracker = self.tracker.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = remove_ticket(tracker.as_ref(), selected).await;
            let _ = tx.send(StoreEvent::Removed(outcome));
        });
    }

    fn toggle_theme(&mut self) {
        self.preference = self.preference.toggled();
        self.theme = Theme::from_preference(self.preference);
        if let Err(err) = config::save_theme(self.preference) {
            self.state
                .store
                .set_notice(Notice::error(format!("Could not save theme: {err}")));
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(self.theme.base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // summary
                Constraint::Length(1), // alert
                Constraint::Length(5), // card gallery
                Constraint::Min(8),    // table + form
                Constraint::Length(1), // footer
            ])
            .split(area);

        let projected = view::project(self.state.store.tickets(), self.state.store.selected_id());

        self.render_summary(frame, chunks[0], &projected);
        self.render_alert(frame, chunks[1]);
        self.render_cards(frame, chunks[2], &projected);

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(chunks[3]);

        self.render_table(frame, main[0], &projected);
        self.render_form(frame, main[1], &projected);
        self.render_footer(frame, chunks[4]);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect, projected: &BoardView) {
        let line = Line::from(vec![
            Span::styled("◉ tix", self.theme.header()),
            Span::raw("  │  "),
            Span::styled(projected.summary.headline(), self.theme.text()),
            Span::raw("  │  "),
            Span::styled(&self.base_url, self.theme.dimmed()),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dimmed())
            .title(" TICKET BOARD ");
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_alert(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(id) = self.state.pending_delete {
            Line::from(Span::styled(
                format!(" Delete ticket #{id}? [y/n]"),
                self.theme.warning(),
            ))
        } else if let Some(notice) = self.state.store.notice() {
            let style = match notice.severity {
                Severity::Info => self.theme.success(),
                Severity::Error => self.theme.error(),
            };
            Line::from(Span::styled(format!(" {}", notice.message), style))
        } else {
            Line::default()
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, projected: &BoardView) {
        let count = projected.cards.len().max(1) as u32;
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, count); count as usize])
            .split(area);

        for (i, card) in projected.cards.iter().enumerate() {
            self.render_card(frame, slots[i], card, i);
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, card: &Card, index: usize) {
        let cursor_here = self.state.focus == Region::Cards && index == self.state.cards_cursor;
        let border_style = if card.selected {
            self.theme.selected()
        } else if cursor_here {
            self.theme.warning()
        } else {
            self.theme.dimmed()
        };

        let mut lines = vec![
            Line::from(Span::styled(card.title.clone(), self.theme.text())),
            Line::from(Span::styled(card.byline.clone(), self.theme.dimmed())),
        ];
        if let (Some(status), Some(priority)) = (card.status, card.priority.as_deref()) {
            lines.push(Line::from(vec![
                Span::styled(status.as_str(), self.theme.status_style(status)),
                Span::raw(" "),
                Span::styled(priority.to_string(), self.theme.priority_style(priority)),
            ]));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, projected: &BoardView) {
        let focused = self.state.focus == Region::Table;
        let border_style = if focused {
            self.theme.accent()
        } else {
            self.theme.dimmed()
        };

        let header = Row::new(["ID", "Title", "Assignee", "Status", "Priority", "Description"])
            .style(self.theme.header());

        let rows = projected.rows.iter().map(|row| {
            let base = if row.selected {
                self.theme.selected()
            } else {
                self.theme.text()
            };
            Row::new(vec![
                Cell::from(row.id.to_string()),
                Cell::from(row.title.clone()),
                Cell::from(row.assignee.clone()),
                Cell::from(Span::styled(
                    row.status.as_str(),
                    self.theme.status_style(row.status),
                )),
                Cell::from(Span::styled(
                    row.priority.clone(),
                    self.theme.priority_style(&row.priority),
                )),
                Cell::from(row.description.clone()),
            ])
            .style(base)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Percentage(26),
                Constraint::Percentage(14),
                Constraint::Length(11),
                Constraint::Length(8),
                Constraint::Percentage(32),
            ],
        )
        .header(header)
        .row_highlight_style(self.theme.cursor())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" ALL TICKETS "),
        );

        let mut table_state = TableState::default();
        if focused && !projected.rows.is_empty() {
            table_state.select(Some(self.state.table_cursor));
        }
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, projected: &BoardView) {
        let focused = self.state.focus == Region::Form;
        let border_style = if focused {
            self.theme.accent()
        } else {
            self.theme.dimmed()
        };

        let draft = &self.state.form.draft;
        let mut lines = vec![
            Line::from(Span::styled(
                projected.form.heading.clone(),
                self.theme.header(),
            )),
            Line::from(Span::styled(
                projected.form.meta.clone(),
                self.theme.dimmed(),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled(format!("{:<12}", "ID"), self.theme.dimmed()),
                Span::styled(format!("#{}", draft.id), self.theme.dimmed()),
            ]),
        ];

        for field in FormField::ALL {
            lines.push(self.form_field_line(field, draft, focused));
        }

        lines.push(Line::default());
        let mut hints = vec![Span::styled("[Enter] save", self.theme.accent())];
        if projected.form.delete_enabled {
            hints.push(Span::raw("   "));
            hints.push(Span::styled("[Ctrl-d] delete", self.theme.dimmed()));
        }
        lines.push(Line::from(hints));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" DETAILS ");
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
    }

    fn form_field_line(&self, field: FormField, draft: &TicketDraft, form_focused: bool) -> Line {
        let active = form_focused && self.state.form.field == field;
        let label_style = if active {
            self.theme.header()
        } else {
            self.theme.text()
        };

        let value = match field {
            FormField::Title => draft.title.clone(),
            FormField::Description => draft.description.clone(),
            FormField::Assignee => draft.assignee.clone(),
            FormField::Status => draft.status.as_str().to_string(),
            FormField::Priority => draft.priority.clone(),
        };

        let value_span = match field {
            FormField::Status => {
                let styled = self.theme.status_style(draft.status);
                if active {
                    Span::styled(format!("◂ {value} ▸"), styled)
                } else {
                    Span::styled(value, styled)
                }
            }
            FormField::Priority => {
                let styled = self.theme.priority_style(&draft.priority);
                if active {
                    Span::styled(format!("◂ {value} ▸"), styled)
                } else {
                    Span::styled(value, styled)
                }
            }
            _ => {
                if active {
                    Span::styled(format!("{value}▏"), self.theme.text())
                } else {
                    Span::styled(value, self.theme.text())
                }
            }
        };

        Line::from(vec![
            Span::styled(format!("{:<12}", field.label()), label_style),
            value_span,
        ])
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let help = Line::from(vec![
            Span::styled("[Tab]", self.theme.accent()),
            Span::styled(" region  ", self.theme.dimmed()),
            Span::styled("[↑↓]", self.theme.accent()),
            Span::styled(" move  ", self.theme.dimmed()),
            Span::styled("[Enter]", self.theme.accent()),
            Span::styled(" select/save  ", self.theme.dimmed()),
            Span::styled("[n]", self.theme.accent()),
            Span::styled("ew  ", self.theme.dimmed()),
            Span::styled("[d]", self.theme.accent()),
            Span::styled("elete  ", self.theme.dimmed()),
            Span::styled("[r]", self.theme.accent()),
            Span::styled("efresh  ", self.theme.dimmed()),
            Span::styled("[t]", self.theme.accent()),
            Span::styled("heme  ", self.theme.dimmed()),
            Span::styled("[q]", self.theme.accent()),
            Span::styled("uit", self.theme.dimmed()),
        ]);
        frame.render_widget(Paragraph::new(help), area);
    }
}

fn setup_terminal() -> AppResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> AppResult<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn load_failure(err: &AppError) -> String {
    match err {
        AppError::Backend { status, .. } => format!("Failed to load tickets: {status}"),
        other => format!("Failed to load tickets: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failure_reports_backend_status() {
        let err = AppError::Backend {
            status: 502,
            detail: Some("ignored for list".to_string()),
        };
        assert_eq!(load_failure(&err), "Failed to load tickets: 502");
    }

    #[test]
    fn load_failure_reports_network_error_text() {
        let err = AppError::Network("connection refused".to_string());
        assert_eq!(
            load_failure(&err),
            "Failed to load tickets: network error: connection refused"
        );
    }
}
