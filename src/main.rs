//! Health Assistant Chat Widget
//!
//! Interactive terminal front end for the chat widget.

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::match_same_arms)]

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use health_chat_widget::api::Client;
use health_chat_widget::config::{Cli, LogFormat, LoggingConfig, WidgetConfig};
use health_chat_widget::terminal::TerminalSurface;
use health_chat_widget::widget::{ChatWidget, QUICK_ACTIONS, QuickAction};

type Widget = ChatWidget<Client, TerminalSurface<std::io::Stdout>>;
type InputLines = Lines<BufReader<Stdin>>;

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Say(&'a str),
    Quick(Option<&'a str>),
    Reminders,
    Remind,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Say(trimmed);
        };
        let (name, arg) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(name, arg)| (name, arg.trim()));
        match name {
            "quit" | "exit" => Self::Quit,
            "help" => Self::Help,
            "reminders" => Self::Reminders,
            "remind" => Self::Remind,
            "quick" => Self::Quick((!arg.is_empty()).then_some(arg)),
            _ => Self::Say(trimmed),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let cli = Cli::parse();
    let config = WidgetConfig::from_cli(&cli).context("Failed to load configuration")?;
    init_tracing(&config.logging);

    info!(
        name: "config.loaded",
        base_url = %config.backend.base_url,
        chat_path = %config.backend.chat_path,
        user_id = config.user.id,
        "Configuration loaded"
    );

    let client = Client::from_config(&config.backend).context("Failed to build HTTP client")?;

    if config.backend.check_status {
        match client.status().await {
            Ok(status) => info!(
                name: "backend.status",
                status = %status.status,
                detail = status.message.as_deref().unwrap_or_default(),
                "Backend reachable"
            ),
            Err(err) => warn!(name: "backend.status.failed", error = %err, "Backend health check failed"),
        }
    }

    let mut widget = ChatWidget::new(client, TerminalSurface::stdout(), config.user.id);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Reminders => widget.show_reminders().await,
            Command::Remind => widget.open_reminder_modal(),
            Command::Quick(None) => print_quick_actions(),
            Command::Quick(Some(choice)) => match pick_quick_action(choice) {
                Some(action) => widget.quick_action(action).await,
                None => println!("No quick action \"{choice}\". Type /quick to list them."),
            },
            Command::Say(text) => {
                widget.set_input(text);
                widget.submit().await;
            }
        }

        if widget.modal().is_open() {
            fill_reminder_form(&mut widget, &mut lines).await?;
        }
    }

    info!(name: "session.ended", messages = widget.transcript().len(), "Session ended");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let json = (logging.format == LogFormat::Json)
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text = (logging.format == LogFormat::Text)
        .then(|| fmt::layer().with_target(true).with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

/// Prompt for the two modal fields, then submit. A failed submission
/// leaves the form filled but closes the modal so the chat can continue.
async fn fill_reminder_form(widget: &mut Widget, lines: &mut InputLines) -> anyhow::Result<()> {
    prompt("Reminder text: ");
    let text = lines.next_line().await?.unwrap_or_default();
    prompt("Time (YYYY-MM-DDTHH:MM): ");
    let time = lines.next_line().await?.unwrap_or_default();

    widget.set_reminder_form(text, time);
    widget.submit_reminder_form().await;
    widget.close_reminder_modal();
    Ok(())
}

fn pick_quick_action(choice: &str) -> Option<QuickAction> {
    match choice.parse::<usize>() {
        Ok(n) => n.checked_sub(1).and_then(|i| QUICK_ACTIONS.get(i).copied()),
        Err(_) => QuickAction::from_label(choice),
    }
}

fn prompt(text: &str) {
    let mut stdout = std::io::stdout();
    if let Err(err) = write!(stdout, "{text}").and_then(|()| stdout.flush()) {
        warn!(name: "terminal.write.failed", error = %err, "Failed to write prompt");
    }
}

fn print_quick_actions() {
    for (i, action) in QUICK_ACTIONS.iter().enumerate() {
        println!("  {}. {action}", i + 1);
    }
}

fn print_help() {
    println!("Type a message and press Enter to chat.");
    println!("  /quick [n|label]  run a quick action (no argument lists them)");
    println!("  /reminders        show your reminders");
    println!("  /remind           set a new reminder");
    println!("  /help             show this help");
    println!("  /quit             leave");
}
