//! `tix`: terminal client for a ticket-tracking REST service.
//!
//! The backend owns the data; this client keeps a disposable in-memory
//! copy (`store`), projects it into the board's four regions (`view`),
//! and talks to the tracker through the `services` seam implemented in
//! `infra`. The interactive board lives in `tui`, the one-shot console
//! commands in `cmd`.

pub mod cmd;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod infra;
pub mod services;
pub mod store;
pub mod tui;
pub mod view;
pub mod workflow;
