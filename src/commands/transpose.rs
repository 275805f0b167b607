//! File transposition commands (transpose, watch, unwatch)

use crate::commands::{CommandContext, CommandResult};
use crate::io::{transpose_file, Outcome};
use chordshift_core::Key;
use colored::*;
use std::path::{Path, PathBuf};

/// Split `<file> [key]` arguments. The last word is taken as the key only
/// if it is a single letter, so paths containing spaces still work.
fn split_args(args: &str) -> (&str, Option<&str>) {
    match args.rsplit_once(char::is_whitespace) {
        Some((path, key)) if key.chars().count() == 1 => (path.trim_end(), Some(key)),
        _ => (args, None),
    }
}

fn resolve(args: &str, ctx: &CommandContext, usage: &str) -> Result<(PathBuf, Key), String> {
    if args.is_empty() {
        return Err(usage.to_string());
    }
    let (path, key) = split_args(args);
    let key = ctx.target_key(key)?;
    Ok((PathBuf::from(path), key))
}

/// Render a one-line summary of a finished transposition
pub fn describe(outcome: &Outcome) -> String {
    format!(
        "{} {} → {}: {} chords on {} lines, saved to {}",
        "✓".bright_green(),
        outcome.source_key.to_string().cyan(),
        outcome.target_key.to_string().cyan(),
        outcome.report.chords,
        outcome.report.chord_lines,
        outcome.output.display().to_string().bright_green()
    )
}

/// Transpose a file once and describe the result
pub fn run_transpose(path: &Path, key: Key, ctx: &CommandContext) -> CommandResult {
    match transpose_file(&ctx.table, path, key, &ctx.config.output_suffix) {
        Ok(outcome) => CommandResult::Message(describe(&outcome)),
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Handle `transpose <file> [key]` command
pub fn cmd_transpose(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match resolve(args, ctx, "Usage: transpose <file> [key]") {
        Ok((path, key)) => run_transpose(&path, key, ctx),
        Err(e) => CommandResult::Error(e),
    }
}

/// Handle `watch <file> [key]` command
pub fn cmd_watch(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match resolve(args, ctx, "Usage: watch <file> [key]") {
        Ok((path, key)) => CommandResult::Watch { path, key },
        Err(e) => CommandResult::Error(e),
    }
}

/// Handle `unwatch <file>` command
pub fn cmd_unwatch(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: unwatch <file>".to_string());
    }
    CommandResult::Unwatch(PathBuf::from(args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chordshift_core::KeyTable;
    use std::fs;
    use tempfile::tempdir;

    fn ctx() -> CommandContext {
        CommandContext::new(KeyTable::new(), Config::default())
    }

    #[test]
    fn test_split_args() {
        assert_eq!(split_args("song.txt D"), ("song.txt", Some("D")));
        assert_eq!(split_args("my songs/song.txt   g"), ("my songs/song.txt", Some("g")));
        assert_eq!(split_args("my songs/song.txt"), ("my songs/song.txt", None));
        assert_eq!(split_args("song.txt"), ("song.txt", None));
    }

    #[test]
    fn test_transpose_command_writes_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("song.txt");
        fs::write(&input, "Key: C\nC/G    Am    F    G\nla la la\n").unwrap();

        let result = cmd_transpose(&format!("{} d", input.display()), &mut ctx());
        assert!(matches!(result, CommandResult::Message(_)), "{:?}", result);

        let written = fs::read_to_string(dir.path().join("song_transposed_D.txt")).unwrap();
        assert_eq!(written, "D key\nD/A    Bm    G    A\nla la la\n");
    }

    #[test]
    fn test_transpose_command_errors() {
        let mut ctx = ctx();
        assert!(matches!(cmd_transpose("", &mut ctx), CommandResult::Error(_)));
        // No key and no configured default
        assert!(matches!(cmd_transpose("song.txt", &mut ctx), CommandResult::Error(_)));
        // Missing file
        match cmd_transpose("/definitely/not/here.txt D", &mut ctx) {
            CommandResult::Error(e) => assert!(e.contains("Failed to read")),
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_watch_command() {
        let mut ctx = ctx();
        ctx.config.default_key = Some(Key::B);
        assert_eq!(
            cmd_watch("chart.txt", &mut ctx),
            CommandResult::Watch {
                path: PathBuf::from("chart.txt"),
                key: Key::B
            }
        );
    }

    #[test]
    fn test_unwatch_command() {
        let mut ctx = ctx();
        // The whole argument is the path; there is no key to split off
        assert_eq!(
            cmd_unwatch("my songs/chart D.txt", &mut ctx),
            CommandResult::Unwatch(PathBuf::from("my songs/chart D.txt"))
        );
        assert!(matches!(cmd_unwatch("", &mut ctx), CommandResult::Error(_)));
    }
}
