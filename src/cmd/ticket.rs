//! One-shot console commands against the tracker. These share the save
//! and remove flows with the board, so the create-vs-update decision and
//! the user-facing messages are identical in both frontends.

use std::io::{self, Write};

use clap::Args;
use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};

use crate::context::AppContext;
use crate::domain::ticket::{DEFAULT_PRIORITY, Status, Ticket, TicketDraft};
use crate::error::{AppError, AppResult};
use crate::view;
use crate::workflow::ticket::{RemoveOutcome, SubmitOutcome, remove_ticket, submit_ticket};

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Ticket id.
    pub id: u64,
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Ticket title.
    #[arg(long)]
    pub title: String,
    /// Longer description of the work.
    #[arg(long)]
    pub description: String,
    /// Person the ticket is assigned to.
    #[arg(long)]
    pub assignee: String,
    /// Initial status (open, in_progress, done).
    #[arg(long, default_value = "open")]
    pub status: String,
    /// Priority label, passed through to the backend as-is.
    #[arg(long, default_value = DEFAULT_PRIORITY)]
    pub priority: String,
    /// Explicit id; defaults to one past the highest existing id.
    #[arg(long)]
    pub id: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Ticket id.
    pub id: u64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub assignee: Option<String>,
    /// New status (open, in_progress, done).
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Ticket id.
    pub id: u64,
    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Description")]
    description: String,
}

pub async fn run_list(ctx: &AppContext) -> AppResult<()> {
    let tickets = ctx.tracker.list_tickets().await?;
    let projected = view::project(&tickets, None);

    println!("{}", projected.summary.headline());
    if projected.rows.is_empty() {
        return Ok(());
    }

    let rows: Vec<TicketRow> = projected
        .rows
        .iter()
        .map(|row| TicketRow {
            id: row.id,
            title: row.title.clone(),
            assignee: row.assignee.clone(),
            status: row.status.as_str(),
            priority: row.priority.clone(),
            description: row.description.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
    Ok(())
}

pub async fn run_show(ctx: &AppContext, args: ShowArgs) -> AppResult<()> {
    let ticket = ctx.tracker.get_ticket(args.id).await?;
    print_ticket(&ticket);
    Ok(())
}

pub async fn run_create(ctx: &AppContext, args: CreateArgs) -> AppResult<()> {
    let status = parse_status(&args.status)?;
    let tickets = ctx.tracker.list_tickets().await?;
    let id = args.id.unwrap_or_else(|| view::next_id(&tickets));

    let draft = TicketDraft {
        id,
        title: args.title,
        description: args.description,
        assignee: args.assignee,
        status,
        priority: args.priority,
    };

    let exists = tickets.iter().any(|t| t.id == id);
    report_submit(submit_ticket(ctx.tracker.as_ref(), exists, draft).await)
}

pub async fn run_update(ctx: &AppContext, args: UpdateArgs) -> AppResult<()> {
    let current = ctx.tracker.get_ticket(args.id).await?;
    let mut draft = TicketDraft::from_ticket(&current);

    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(assignee) = args.assignee {
        draft.assignee = assignee;
    }
    if let Some(status) = args.status {
        draft.status = parse_status(&status)?;
    }
    if let Some(priority) = args.priority {
        draft.priority = priority;
    }

    report_submit(submit_ticket(ctx.tracker.as_ref(), true, draft).await)
}

pub async fn run_delete(ctx: &AppContext, args: DeleteArgs) -> AppResult<()> {
    if !args.yes && !confirm(&format!("Delete ticket #{}", args.id))? {
        println!("Aborted.");
        return Ok(());
    }

    match remove_ticket(ctx.tracker.as_ref(), Some(args.id)).await {
        RemoveOutcome::Removed(_) => {
            println!("{}", "Ticket deleted.".green());
            Ok(())
        }
        RemoveOutcome::Rejected { error, .. } => Err(error),
        RemoveOutcome::NothingSelected => Err(AppError::NoSelection),
    }
}

fn report_submit(outcome: SubmitOutcome) -> AppResult<()> {
    match outcome {
        SubmitOutcome::Created(id) => {
            println!("{} {}", "Ticket created.".green(), format!("(#{id})").dimmed());
            Ok(())
        }
        SubmitOutcome::Updated(id) => {
            println!("{} {}", "Ticket updated.".green(), format!("(#{id})").dimmed());
            Ok(())
        }
        SubmitOutcome::Invalid(message) => Err(AppError::Validation(message)),
        SubmitOutcome::Rejected { error, .. } => Err(error),
    }
}

fn print_ticket(ticket: &Ticket) {
    println!(
        "{} {}",
        format!("#{}", ticket.id).bold(),
        view::sanitize(&ticket.title).bold()
    );
    println!("Status:      {}", colored_status(ticket.status));
    println!("Priority:    {}", view::sanitize(&ticket.priority));
    println!("Assignee:    {}", view::sanitize(&ticket.assignee));
    println!("Description: {}", view::sanitize(&ticket.description));
}

fn colored_status(status: Status) -> colored::ColoredString {
    match status {
        Status::Open => status.as_str().blue(),
        Status::InProgress => status.as_str().yellow(),
        Status::Done => status.as_str().green(),
    }
}

fn parse_status(value: &str) -> AppResult<Status> {
    Status::from_str(value)
        .ok_or_else(|| AppError::Validation(format!("unknown status '{value}'")))
}

fn confirm(prompt: &str) -> AppResult<bool> {
    print!("{prompt}? [y/N] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
