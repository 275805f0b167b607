//! REPL (Read-Eval-Print Loop) for Chordshift

use crate::commands::transpose::run_transpose;
use crate::commands::{create_registry, CommandContext, CommandResult};
use crate::config::Config;
use crate::repl::watcher::FileWatcher;
use anyhow::Result;
use chordshift_core::{Key, KeyTable};
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use notify::{Event, EventKind};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use std::path::PathBuf;
use std::thread;
use tracing::{debug, warn};

pub mod watcher;

/// Types of events the REPL loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// Interactive REPL for transposing chord charts
pub struct Repl {
    editor: Option<DefaultEditor>,
    ctx: CommandContext,

    // Event channels
    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
    tx_watcher: Sender<notify::Result<Event>>,
    rx_watcher: Receiver<notify::Result<Event>>,

    // File watcher, created on the first `watch`
    watcher: Option<FileWatcher>,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(config: Config) -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;

        let (tx_input, rx_input) = unbounded();
        let (tx_watcher, rx_watcher) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            ctx: CommandContext::new(KeyTable::new(), config),
            tx_input,
            rx_input,
            tx_watcher,
            rx_watcher,
            watcher: None,
        })
    }

    /// Start watching `path`, transposing it to `key` now and on every change
    fn start_watch(&mut self, path: PathBuf, key: Key) {
        if self.watcher.is_none() {
            match FileWatcher::new(self.tx_watcher.clone()) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => {
                    println!("{} Failed to create watcher: {}", "Error:".red(), e);
                    return;
                }
            }
        }

        let Some(w) = &mut self.watcher else {
            return;
        };
        match w.watch(&path, key) {
            Ok(Some(previous)) => println!(
                "{} {} now transposes to {} (was {})",
                "👀".bright_cyan(),
                path.display().to_string().bright_green(),
                key.to_string().cyan(),
                previous
            ),
            Ok(None) => println!(
                "{} Watching {} (→ {}) for changes...",
                "👀".bright_cyan(),
                path.display().to_string().bright_green(),
                key.to_string().cyan()
            ),
            Err(e) => {
                println!("{} Failed to watch {}: {}", "Error:".red(), path.display(), e);
                return;
            }
        }
        self.report(run_transpose(&path, key, &self.ctx));
    }

    /// Stop watching `path`
    fn stop_watch(&mut self, path: PathBuf) {
        let unwatched = match &mut self.watcher {
            Some(w) => w.unwatch(&path),
            None => Ok(None),
        };
        match unwatched {
            Ok(Some(_)) => println!(
                "{} Stopped watching {}",
                "✓".bright_green(),
                path.display().to_string().bright_green()
            ),
            Ok(None) => println!(
                "{} {} is not being watched",
                "Error:".bright_red().bold(),
                path.display()
            ),
            Err(e) => println!("{} Failed to unwatch {}: {}", "Error:".red(), path.display(), e),
        }
    }

    /// Re-transpose every watched chart touched by `event`
    fn handle_watch_event(&mut self, event: Event) {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }

        for path in event.paths {
            let Some(key) = self.watcher.as_ref().and_then(|w| w.key_for(&path)) else {
                debug!(path = %path.display(), "ignoring change to unwatched file");
                continue;
            };
            println!("{} File changed: {}", "⚡".bright_yellow(), path.display());
            self.report(run_transpose(&path, key, &self.ctx));
        }
    }

    /// Print the outcome of a command. Returns false when the REPL should exit.
    fn report(&mut self, result: CommandResult) -> bool {
        match result {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Exit => {
                println!("{} 🎸", "Goodbye!".bright_cyan());
                return false;
            }
            CommandResult::Error(e) => {
                println!("{} {}", "Error:".bright_red().bold(), e.red());
            }
            CommandResult::Watch { path, key } => self.start_watch(path, key),
            CommandResult::Unwatch(path) => self.stop_watch(path),
            CommandResult::NotACommand => {
                println!(
                    "{} Unknown command. Type '{}' for a list of commands.",
                    "Error:".bright_red().bold(),
                    "help".bright_green()
                );
            }
        }
        true
    }

    /// Watch a single chart, then hand over to the prompt
    pub fn watch_and_run(&mut self, path: PathBuf, key: Key) -> Result<()> {
        self.start_watch(path, key);
        self.run()
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎸".bright_yellow(),
            "Chordshift chord chart transposer".bright_cyan().bold()
        );
        println!(
            "Type commands like: {}, {}",
            "transpose song.txt D".cyan(),
            "scale G".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        // Move editor to thread so file events can be handled while waiting for input
        let mut editor = self
            .editor
            .take()
            .ok_or_else(|| anyhow::anyhow!("REPL is already running"))?;
        let tx_input = self.tx_input.clone();
        thread::spawn(move || loop {
            let prompt = format!("{} ", "chordshift>".bright_magenta().bold());
            match editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        let registry = create_registry();

        loop {
            crossbeam_channel::select! {
                recv(self.rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        if line.is_empty() {
                            continue;
                        }
                        let result = registry.execute(&line, &mut self.ctx);
                        if !self.report(result) {
                            break;
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted)))
                    | Ok(ReplEvent::Input(Err(ReadlineError::Eof))) => {
                        println!("{} 🎸", "Goodbye!".bright_cyan());
                        break;
                    }
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                        break;
                    }
                    Err(_) => break, // Channel closed
                },

                recv(self.rx_watcher) -> msg => match msg {
                    Ok(Ok(event)) => self.handle_watch_event(event),
                    Ok(Err(e)) => warn!(error = %e, "watch error"),
                    Err(_) => break, // Channel closed
                }
            }
        }

        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start(config: Config) -> Result<()> {
    let mut repl =
        Repl::new(config).map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}
