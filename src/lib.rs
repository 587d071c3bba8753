//! terminal-queue - jump to the terminal that is waiting for you
//!
//! Long-running terminal sessions (coding agents, interactive installers,
//! prompts) regularly stop and wait for input. terminal-queue keeps a FIFO
//! queue of those sessions so the user can step through them one by one.
//!
//! ## Input Methods
//!
//! Requests enter the queue in two ways:
//!
//! 1. **Hooks (Primary)**: an external hook posts to the local listener
//!    (`POST /addRequest`) with the workspace it fired in. Only the host that
//!    has that workspace open queues its active terminal.
//!
//! 2. **Host commands**: the host can queue its active terminal directly,
//!    e.g. through the simulate command.

pub mod config;
pub mod domain;
pub mod extension;
pub mod hook;
pub mod listener;
pub mod queue;
pub mod session;
pub mod status_bar;
pub mod workspace;

pub use domain::*;
