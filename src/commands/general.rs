//! General REPL commands (help, quit, keys, scale, degree, default)

use crate::commands::{CommandContext, CommandResult};
use chordshift_core::{Key, ScaleDegree};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `keys` command: print the whole key table
pub fn cmd_keys(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(ctx.table.to_string().trim_end().to_string())
}

/// Handle `scale <key>` command
pub fn cmd_scale(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: scale <key>".to_string());
    }

    let key: Key = match args.parse() {
        Ok(key) => key,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    let rows: Vec<String> = ScaleDegree::ALL
        .iter()
        .map(|degree| {
            format!(
                "  {:<5} {}",
                degree.to_string().bright_black(),
                ctx.table.chord_at(key, *degree).cyan()
            )
        })
        .collect();

    CommandResult::Message(format!("{} major\n{}", key, rows.join("\n")))
}

/// Handle `degree <chord> <key>` command: where a chord sits in a key
pub fn cmd_degree(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some((chord, key)) = args.split_once(char::is_whitespace) else {
        return CommandResult::Error("Usage: degree <chord> <key>".to_string());
    };
    let chord = chord.trim();
    let key: Key = match key.trim().parse() {
        Ok(key) => key,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    match ctx.table.degree_of(key, chord) {
        Some(degree) => CommandResult::Message(format!(
            "{} is {} in {}",
            chord.cyan(),
            degree.to_string().bright_green(),
            key
        )),
        None => CommandResult::Error(format!("{} is not a diatonic chord of {}", chord, key)),
    }
}

/// Handle `default [key]` command: show or persist the default target key
pub fn cmd_default(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return match ctx.config.default_key {
            Some(key) => CommandResult::Message(format!("Default target key: {}", key)),
            None => CommandResult::Message("No default target key set".to_string()),
        };
    }

    match args.parse::<Key>() {
        Ok(key) => {
            ctx.config.default_key = Some(key);
            match ctx.config.save() {
                Ok(()) => CommandResult::Message(
                    format!("Default target key set to {}", key)
                        .bright_green()
                        .to_string(),
                ),
                Err(e) => CommandResult::Error(format!("Failed to save config: {}", e)),
            }
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Print help information
fn print_help() {
    println!("{}", "🎸 Chordshift Help".bold());
    println!("{}", "==================".bold());
    println!();
    println!("{}", "Transposing:".green());
    println!(
        "  {}  - Write <file> transposed to <key>",
        "transpose <file> [key]".cyan()
    );
    println!(
        "  {}      - Re-transpose <file> whenever it changes",
        "watch <file> [key]".cyan()
    );
    println!("  {}          - Stop watching <file>", "unwatch <file>".cyan());
    println!();
    println!("{}", "Keys:".green());
    println!("  {}                   - Show all supported keys", "keys".cyan());
    println!("  {}            - Show the chords of one key", "scale <key>".cyan());
    println!("  {}   - Show the degree of a chord in a key", "degree <chord> <key>".cyan());
    println!("  {}          - Show or set the default target key", "default [key]".cyan());
    println!();
    println!("{}", "Chart format:".green());
    println!("  The first line mentioning \"key\" names the source key, e.g. Key: G");
    println!("  Chords are separated by whitespace: C/G    Am    F    G");
    println!("  Only the seven diatonic chords of the source key can be transposed.");
    println!();
    println!("  {} or {} to exit", "quit".bright_red(), "exit".bright_red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chordshift_core::KeyTable;

    fn ctx() -> CommandContext {
        CommandContext::new(KeyTable::new(), Config::default())
    }

    #[test]
    fn test_keys() {
        match cmd_keys("", &mut ctx()) {
            CommandResult::Message(msg) => {
                assert_eq!(msg.lines().count(), 7);
                assert!(msg.contains("C#dim"));
            }
            other => panic!("Expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_scale() {
        match cmd_scale("g", &mut ctx()) {
            CommandResult::Message(msg) => {
                assert!(msg.starts_with("G major"));
                assert!(msg.contains("F#dim"));
            }
            other => panic!("Expected message, got {:?}", other),
        }
        assert!(matches!(cmd_scale("", &mut ctx()), CommandResult::Error(_)));
        assert!(matches!(cmd_scale("X", &mut ctx()), CommandResult::Error(_)));
    }

    #[test]
    fn test_degree() {
        match cmd_degree("Em c", &mut ctx()) {
            CommandResult::Message(msg) => {
                assert!(msg.contains("Em"));
                assert!(msg.contains("iii"));
                assert!(msg.ends_with("in C"));
            }
            other => panic!("Expected message, got {:?}", other),
        }
        match cmd_degree("F#dim G", &mut ctx()) {
            CommandResult::Message(msg) => assert!(msg.contains("vii°")),
            other => panic!("Expected message, got {:?}", other),
        }
        // Literal lookup: no enharmonics, no extensions
        assert!(matches!(cmd_degree("A# F", &mut ctx()), CommandResult::Error(_)));
        assert!(matches!(cmd_degree("G7 C", &mut ctx()), CommandResult::Error(_)));
        assert!(matches!(cmd_degree("Em", &mut ctx()), CommandResult::Error(_)));
        assert!(matches!(cmd_degree("Em H", &mut ctx()), CommandResult::Error(_)));
    }

    #[test]
    fn test_default_without_key() {
        assert_eq!(
            cmd_default("", &mut ctx()),
            CommandResult::Message("No default target key set".to_string())
        );
        assert!(matches!(cmd_default("H", &mut ctx()), CommandResult::Error(_)));
    }
}
