// CLI binary entry point for flacdur
//
// This is the main entry point for the flacdur command-line tool.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use flacdur::CorpusIndex;

/// flacdur - FLAC duration and corpus index CLI tool
#[derive(Parser, Debug)]
#[command(name = "flacdur")]
#[command(about = "A FLAC duration extraction and speech corpus indexing tool", long_about = None)]
#[command(version)]
#[command(author = "xwsjjctz <xwsjjctz@icloud.com>")]
struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the duration of FLAC file(s)
    Duration {
        /// FLAC file path(s)
        files: Vec<PathBuf>,
    },
    /// Build a corpus index for a directory of FLAC files
    Index {
        /// Corpus directory
        directory: PathBuf,

        /// Transcript side-car file (default: first non-FLAC file in the directory)
        #[arg(short, long)]
        transcript: Option<PathBuf>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

fn main() {
    let config = Config::parse();

    let result = match &config.command {
        Commands::Duration { files } => command_duration(files, &config),
        Commands::Index {
            directory,
            transcript,
            output,
        } => command_index(directory, transcript.as_deref(), output.as_deref(), &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn command_duration(files: &[PathBuf], config: &Config) -> anyhow::Result<()> {
    if files.is_empty() {
        anyhow::bail!("No files specified");
    }

    let mut results = Vec::new();
    for path in files {
        match flacdur::parse_duration(path) {
            Ok(duration) => results.push((path, duration)),
            Err(e) => eprintln!("✗ {}: {}", path.display(), e),
        }
    }

    if results.is_empty() {
        anyhow::bail!("no readable FLAC files among {} input(s)", files.len());
    }

    match config.format {
        OutputFormat::Pretty => {
            for (path, duration) in &results {
                println!("{}: {:.3}s", path.display(), duration);
            }
        }
        OutputFormat::Json => {
            let values: Vec<serde_json::Value> = results
                .iter()
                .map(|(path, duration)| {
                    serde_json::json!({ "path": path, "duration_seconds": duration })
                })
                .collect();
            println!("{}", serde_json::to_string(&values)?);
        }
    }

    Ok(())
}

fn command_index(
    directory: &Path,
    transcript: Option<&Path>,
    output: Option<&Path>,
    config: &Config,
) -> anyhow::Result<()> {
    let index = CorpusIndex::build(directory, transcript)
        .with_context(|| format!("failed to index {}", directory.display()))?;

    if !config.quiet {
        eprintln!(
            "Indexed {} file(s), {} failure(s)",
            index.entries.len(),
            index.failures.len()
        );
        for failure in &index.failures {
            eprintln!("✗ {}: {}", failure.path.display(), failure.reason);
        }
    }

    let json = match config.format {
        OutputFormat::Pretty => serde_json::to_string_pretty(&index)?,
        OutputFormat::Json => serde_json::to_string(&index)?,
    };

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "{}", json)?;
        }
        None => {
            let mut stdout = io::stdout();
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}
