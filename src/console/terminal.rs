use log::{debug, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;

use crate::console::event::ConsoleEvent;
use crate::console::runtime::Screen;
use crate::error::{ConsoleError, Result};
use crate::model::QueryRegistry;

fn usage(command: &str, args: &str) -> ConsoleError {
    ConsoleError::validation(command, format!("usage: {} {}", command, args))
}

/// Turn one input line into an event. Blank lines yield nothing.
pub fn parse_command(line: &str, registry: &QueryRegistry) -> Result<Option<ConsoleEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command.to_lowercase().as_str() {
        "list" | "menu" => ConsoleEvent::ShowMenu,
        "back" => ConsoleEvent::Dismiss,
        "show" => ConsoleEvent::ShowResults,
        "clear" => ConsoleEvent::ClearSearch,
        "help" | "?" => ConsoleEvent::Help,
        "quit" | "exit" => ConsoleEvent::Quit,
        "select" => {
            if rest.is_empty() {
                return Err(usage("select", "<number|id>"));
            }
            let descriptor = match rest.parse::<usize>() {
                Ok(position) => registry
                    .nth(position)
                    .ok_or_else(|| ConsoleError::UnknownQuery(rest.to_string()))?,
                Err(_) => registry.resolve(rest)?,
            };
            ConsoleEvent::Select(descriptor.kind)
        }
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err(usage("set", "<field> [value]"));
            }
            ConsoleEvent::Edit {
                field: field.to_string(),
                value: value.to_string(),
            }
        }
        "search" => ConsoleEvent::Search(rest.to_string()),
        "copy" => {
            let position = rest
                .parse::<usize>()
                .ok()
                .filter(|position| *position > 0)
                .ok_or_else(|| usage("copy", "<n>"))?;
            ConsoleEvent::Copy(position)
        }
        other => {
            return Err(ConsoleError::validation(
                "command",
                format!("unknown command '{}', try help", other),
            ))
        }
    };

    Ok(Some(event))
}

/// Prints frames to stdout; alerts get a marker so they stand out.
#[derive(Debug, Default)]
pub struct TerminalScreen;

impl Screen for TerminalScreen {
    fn show(&mut self, frame: &str) {
        println!("{}\n", frame);
    }

    fn alert(&mut self, message: &str) {
        println!("! {}\n", message);
    }
}

/// Feed stdin lines into the console until EOF or the console goes away.
pub async fn read_commands(events: UnboundedSender<ConsoleEvent>, registry: QueryRegistry) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("input closed");
                let _ = events.send(ConsoleEvent::Quit);
                return;
            }
            Err(e) => {
                debug!("stdin read failed: {}", e);
                let _ = events.send(ConsoleEvent::Quit);
                return;
            }
        };

        let event = match parse_command(&line, &registry) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => ConsoleEvent::Notice(e.to_string()),
        };

        let quitting = matches!(event, ConsoleEvent::Quit);
        if events.send(event).is_err() || quitting {
            return;
        }
    }
}
