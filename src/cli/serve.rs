//! Serve command: a console host for the queue
//!
//! Terminals are simulated with an in-memory registry and driven by commands
//! typed on stdin. Hook notifications from the listener are applied on a
//! short timer so that every queue change happens on this task.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use terminal_queue::config::Config;
use terminal_queue::extension::{Extension, NextOutcome, Notifier};
use terminal_queue::session::{LocalSessions, SessionRegistry};
use terminal_queue::status_bar::StatusIndicator;
use terminal_queue::workspace::StaticWorkspace;
use terminal_queue::SessionId;

const PUMP_INTERVAL: Duration = Duration::from_millis(100);

const HELP: &str = "\
Commands:
  open <name> [pid]   open a terminal (becomes active)
  focus <id>          make a terminal active
  close <id>          close a terminal
  sim                 queue the active terminal with a random question
  hook                queue the active terminal as a hook would
  next                jump to the next waiting terminal
  clear [yes]         empty the queue
  list                show terminals and the queue
  debug               show pid / cwd / workspace membership per terminal
  status              show the status bar and listener
  help                show this help
  quit                exit";

/// Notifier printing to stdout.
///
/// Confirmations are only granted when the command asked for it up front
/// (`clear yes`), because stdin is owned by the command loop.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    confirm_next: bool,
}

impl Notifier for ConsoleNotifier {
    fn info(&mut self, message: &str) {
        println!("[info] {}", message);
    }

    fn warn(&mut self, message: &str) {
        println!("[warn] {}", message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("[error] {}", message);
    }

    fn confirm(&mut self, message: &str, accept_label: &str) -> bool {
        let confirmed = std::mem::take(&mut self.confirm_next);
        if !confirmed {
            println!(
                "[confirm] {} Run `clear yes` to {}.",
                message,
                accept_label.to_lowercase()
            );
        }
        confirmed
    }
}

type ConsoleExtension = Extension<LocalSessions, ConsoleNotifier>;

/// Run the console host until `quit`, end of input or Ctrl+C
pub async fn serve_command(config: Config, workspace: StaticWorkspace) -> Result<()> {
    let mut ext = Extension::activate(
        config,
        LocalSessions::new(),
        ConsoleNotifier::default(),
        &workspace,
    );

    ext.subscribe(|count| {
        let mut status = StatusIndicator::new();
        status.update_queue_count(count);
        println!(
            "[status] {}",
            status.text().unwrap_or_else(|| "(hidden)".to_string())
        );
    });

    match ext.listener_binding() {
        Some(binding) => println!(
            "Listening on {} for workspace {}",
            binding.url(),
            binding.workspace.as_deref().unwrap_or("(none)")
        ),
        None => println!("Listener not running; hook notifications are unavailable"),
    }
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pump = tokio::time::interval(PUMP_INTERVAL);

    loop {
        tokio::select! {
            _ = pump.tick() => {
                ext.pump_listener_events();
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match handle_line(&mut ext, line.trim()) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => eprintln!("[error] {:#}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    ext.dispose();
    Ok(())
}

/// Run one console command. Returns false when the host should exit.
fn handle_line(ext: &mut ConsoleExtension, line: &str) -> Result<bool> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(true);
    };
    let args: Vec<&str> = parts.collect();

    match command {
        "open" => {
            let Some(name) = args.first() else {
                bail!("usage: open <name> [pid]");
            };
            let pid = args
                .get(1)
                .map(|p| p.parse::<u32>().context("pid must be a number"))
                .transpose()?;
            let id = ext.sessions_mut().open(*name, pid);
            println!("Opened {} as {}", name, id.0);
        }
        "focus" => {
            let id = parse_session(&args)?;
            ext.sessions_mut().focus(id)?;
            println!("Active: {}", ext.sessions().display_name(id));
        }
        "close" => {
            let id = parse_session(&args)?;
            let Some(closed) = ext.sessions_mut().close(id) else {
                bail!("no terminal with id {}", id.0);
            };
            ext.on_session_closed(id);
            println!("Closed {}", closed.name);
        }
        "sim" => {
            ext.simulate_request()?;
        }
        "hook" => {
            if !ext.add_request_from_hook() {
                println!("Nothing queued (no active terminal, or already waiting)");
            }
        }
        "next" => {
            if let NextOutcome::Exhausted { skipped } = ext.next_in_queue() {
                println!("All {} queued terminal(s) were closed", skipped.len());
            }
        }
        "clear" => {
            if args.first() == Some(&"yes") {
                ext.notifier_mut().confirm_next = true;
            }
            ext.clear_queue();
            ext.notifier_mut().confirm_next = false;
        }
        "list" => print_list(ext),
        "debug" => {
            for report in ext.debug_sessions() {
                println!(
                    "{:>3}  {:<20} pid={:<8} cwd={} in_workspace={}",
                    report.session.0,
                    report.name,
                    report
                        .pid
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    report
                        .cwd
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "unknown".to_string()),
                    report.in_workspace
                );
            }
        }
        "status" => {
            let status = ext.status();
            println!(
                "Status bar: {}",
                status.text().unwrap_or_else(|| "(hidden)".to_string())
            );
            if let Some(tooltip) = status.tooltip() {
                println!("{}", tooltip);
            }
            match ext.listener_binding() {
                Some(binding) => println!("Listener: {}", binding.url()),
                None => println!("Listener: not running"),
            }
        }
        "help" => println!("{}", HELP),
        "quit" | "exit" => return Ok(false),
        other => bail!("unknown command `{}` (try `help`)", other),
    }

    Ok(true)
}

fn parse_session(args: &[&str]) -> Result<SessionId> {
    let Some(raw) = args.first() else {
        bail!("missing terminal id");
    };
    let id = raw
        .parse::<u64>()
        .with_context(|| format!("invalid terminal id: {}", raw))?;
    Ok(SessionId(id))
}

fn print_list(ext: &ConsoleExtension) {
    let sessions = ext.sessions();
    let active = sessions.active_session();

    println!("Terminals ({}):", sessions.len());
    for id in sessions.list_sessions() {
        let marker = if Some(id) == active { "*" } else { " " };
        let waiting = if ext.queue().contains(id) {
            " (waiting)"
        } else {
            ""
        };
        println!("{} {:>3}  {}{}", marker, id.0, sessions.display_name(id), waiting);
    }
    println!("{}", ext.queue_report());
}
