use anyhow::{bail, Result};
use chordshift::commands::transpose::describe;
use chordshift::{repl, transpose_file, Config, Key, KeyTable};
use clap::Parser;
use std::path::PathBuf;

/// Transpose chord charts between major keys
#[derive(Parser, Debug)]
#[command(name = "chordshift", version, about)]
struct Cli {
    /// Chord chart to transpose. Starts the interactive prompt when omitted.
    file: Option<PathBuf>,

    /// Target key (C, D, E, F, G, A or B)
    #[arg(short, long)]
    key: Option<Key>,

    /// Keep running and re-transpose the chart whenever it changes
    #[arg(short, long, requires = "file")]
    watch: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chordshift=info,chordshift_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    let Some(file) = cli.file else {
        return repl::start(config);
    };

    let Some(key) = cli.key.or(config.default_key) else {
        bail!(
            "No target key given. Pass --key or set default_key in {}",
            Config::config_path().display()
        );
    };

    if cli.watch {
        let mut repl = repl::Repl::new(config)?;
        repl.watch_and_run(file, key)
    } else {
        let outcome = transpose_file(&KeyTable::new(), &file, key, &config.output_suffix)?;
        println!("{}", describe(&outcome));
        Ok(())
    }
}
