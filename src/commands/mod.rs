//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod general;
pub mod transpose;

use crate::config::Config;
use chordshift_core::{Key, KeyTable};
use std::path::PathBuf;

/// Result of executing a command
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// No command matched the input
    NotACommand,
    /// Error occurred
    Error(String),
    /// Re-transpose a file every time it changes
    Watch { path: PathBuf, key: Key },
    /// Stop watching a file
    Unwatch(PathBuf),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub table: KeyTable,
    pub config: Config,
}

impl CommandContext {
    pub fn new(table: KeyTable, config: Config) -> Self {
        Self { table, config }
    }

    /// Resolve the target key from an explicit argument or the configured default
    pub fn target_key(&self, arg: Option<&str>) -> Result<Key, String> {
        match arg {
            Some(key) => key.parse().map_err(|e: chordshift_core::TransposeError| e.to_string()),
            None => self
                .config
                .default_key
                .ok_or_else(|| "No target key given and no default_key configured".to_string()),
        }
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix, sorted by prefix length descending
    /// for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register("transpose", transpose::cmd_transpose);
    registry.register("watch", transpose::cmd_watch);
    registry.register("unwatch", transpose::cmd_unwatch);

    registry.register("keys", general::cmd_keys);
    registry.register("scale", general::cmd_scale);
    registry.register("degree", general::cmd_degree);
    registry.register("default", general::cmd_default);
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CommandContext {
        CommandContext::new(KeyTable::new(), Config::default())
    }

    #[test]
    fn test_prefix_matching() {
        let registry = create_registry();
        let mut ctx = ctx();

        assert_eq!(registry.execute("quit", &mut ctx), CommandResult::Exit);
        assert_eq!(registry.execute("quitter", &mut ctx), CommandResult::NotACommand);
        assert_eq!(registry.execute("play C", &mut ctx), CommandResult::NotACommand);
    }

    #[test]
    fn test_longest_prefix_first() {
        let registry = create_registry();
        let commands = registry.list_commands();
        assert_eq!(commands.first(), Some(&"transpose"));
        assert!(commands.contains(&"watch"));
        assert!(commands.contains(&"unwatch"));
    }

    #[test]
    fn test_unwatch_is_not_shadowed_by_watch() {
        let registry = create_registry();
        assert_eq!(
            registry.execute("unwatch song.txt", &mut ctx()),
            CommandResult::Unwatch(PathBuf::from("song.txt"))
        );
    }

    #[test]
    fn test_target_key_resolution() {
        let mut ctx = ctx();
        assert_eq!(ctx.target_key(Some("e")), Ok(Key::E));
        assert!(ctx.target_key(Some("Bb")).is_err());
        assert!(ctx.target_key(None).is_err());

        ctx.config.default_key = Some(Key::F);
        assert_eq!(ctx.target_key(None), Ok(Key::F));
    }
}
