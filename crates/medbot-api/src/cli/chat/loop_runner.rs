//! Main chat loop orchestration.
//!
//! Builds a [`ChatController`] over the HTTP backend and a terminal log,
//! greets once, then feeds every submitted line through the controller as an
//! Enter key press.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use console::style;
use tracing::debug;

use medbot_core::chat::controller::{ChatController, ControllerSettings, KeyOutcome};
use medbot_core::chat::input::KeyPress;
use medbot_infra::backend::http::HttpChatBackend;
use medbot_types::config::ClientConfig;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::terminal_log::TerminalLog;

fn thinking_spinner() -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    if let Ok(template) = indicatif::ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run the interactive chat loop against `config.endpoint`.
pub async fn run_chat_loop(config: &ClientConfig) -> anyhow::Result<()> {
    print_welcome_banner(&config.avatar, &config.endpoint);

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let log = Arc::new(Mutex::new(TerminalLog::for_terminal(writer)));
    let controller = ChatController::new(
        HttpChatBackend::new(&config.endpoint),
        log,
        ControllerSettings::from(config),
    );

    controller.on_page_load();

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
            }
            InputEvent::Message(text) => {
                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Unknown(name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(name).dim()
                            );
                        }
                    }
                    continue;
                }

                let spinner = (!text.trim().is_empty()).then(thinking_spinner);
                controller.input().set(text);

                let outcome = controller.handle_key(KeyPress::enter()).await;

                if let Some(spinner) = spinner {
                    spinner.finish_and_clear();
                }
                if let KeyOutcome::Sent(sent) = outcome {
                    debug!(?sent, "message handled");
                }
            }
        }
    }

    Ok(())
}
