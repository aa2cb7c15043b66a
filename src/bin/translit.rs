//! Command-line front end for the transliteration engine.
//!
//! Reads text from arguments or stdin and writes the transformed text to
//! stdout, one shot per invocation.

use std::io::Read;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use libtranslit::Translit;

#[derive(Parser)]
#[command(name = "translit")]
#[command(about = "Transliterate between Unicode text and legacy character encodings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Downgrade Unicode text to fit a legacy encoding
    Downgrade {
        /// Target encoding label
        #[arg(short, long, default_value = "latin-1")]
        encoding: String,

        /// Text to downgrade (stdin when omitted)
        text: Vec<String>,
    },
    /// Reconstruct Unicode typography from downgraded text
    Upgrade {
        /// Language tag selecting the rewrite rules
        #[arg(short, long)]
        language: Option<String>,

        /// Text to upgrade (stdin when omitted)
        text: Vec<String>,
    },
}

fn gather_input(args: Vec<String>) -> anyhow::Result<String> {
    if args.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        Ok(args.join(" "))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = Translit::default();

    match cli.command {
        Commands::Downgrade { encoding, text } => {
            let input = gather_input(text)?;
            let output = engine
                .downgrade(&input, &encoding)
                .with_context(|| format!("downgrading to {encoding}"))?;
            println!("{output}");
        }
        Commands::Upgrade { language, text } => {
            let input = gather_input(text)?;
            println!("{}", engine.upgrade(&input, language.as_deref()));
        }
    }
    Ok(())
}
