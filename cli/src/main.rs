//! mailscrub CLI - business email noise removal
//!
//! A command-line tool for cleaning vendor mail before data extraction.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use mailscrub::{CleanOutput, CleanerOptions, ContentCleaner};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Business email cleaning: headers, Cc lists, disclaimers and footers out,
/// business content in
#[derive(Parser)]
#[command(
    name = "mailscrub",
    version,
    about = "Strip noise from business email text",
    long_about = "mailscrub - deterministic business email cleaner.\n\n\
                  Removes thread headers, Cc lists, legal disclaimers and webmail footers\n\
                  while keeping tables and paragraphs with business content.\n\n\
                  Usage:\n  \
                  mailscrub clean <file>          Print cleaned text\n  \
                  mailscrub clean -               Read from stdin\n  \
                  mailscrub stats <file>          Print cleaning statistics as JSON\n  \
                  mailscrub batch <files> -o dir  Clean many files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Cleaning preset
    #[arg(long, global = true, default_value = "standard")]
    preset: Preset,

    /// JSON options file (overrides --preset)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean one email and print or write the result
    Clean {
        /// Input file path, or `-` for stdin
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the statistics record as JSON to this path
        #[arg(long, value_name = "PATH")]
        stats: Option<PathBuf>,
    },

    /// Clean one email and print its statistics as JSON
    Stats {
        /// Input file path, or `-` for stdin
        input: PathBuf,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Clean many emails into an output directory
    Batch {
        /// Input file paths
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

/// Cleaning preset
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Preset {
    /// Needs more legal keywords before removing a paragraph
    Conservative,
    /// Default thresholds
    Standard,
    /// Lower disclaimer threshold, strips From/To lines
    Aggressive,
}

impl From<Preset> for CleanerOptions {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Conservative => CleanerOptions::conservative(),
            Preset::Standard => CleanerOptions::default(),
            Preset::Aggressive => CleanerOptions::aggressive(),
        }
    }
}

/// Files written and skipped by a batch run.
#[derive(Debug, Default, PartialEq)]
struct BatchSummary {
    cleaned: usize,
    failed: usize,
    paragraphs_removed: usize,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = build_options(cli.preset, cli.config.as_deref())?;
    debug!(?options, "using options");

    match cli.command {
        Commands::Clean {
            input,
            output,
            stats,
        } => {
            let cleaner = ContentCleaner::new(options)?;
            let result = cleaner.clean(&read_input(&input)?);

            write_output(output.as_ref(), &result.text)?;

            if let Some(path) = output {
                eprintln!("{} Cleaned: {}", "✓".green().bold(), path.display());
            }
            if let Some(path) = stats {
                fs::write(&path, result.stats.to_json_pretty()?)?;
                print_summary(&result);
            }
        }

        Commands::Stats { input, compact } => {
            let cleaner = ContentCleaner::new(options)?;
            let result = cleaner.clean(&read_input(&input)?);

            let json = if compact {
                result.stats.to_json()?
            } else {
                result.stats.to_json_pretty()?
            };
            write_output(None, &json)?;
        }

        Commands::Batch { inputs, output } => {
            let cleaner = ContentCleaner::new(options)?;
            let summary = run_batch(&inputs, &output, &cleaner)?;

            println!("{}", "Batch Complete".green().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Output".bold(), output.display());
            println!("{}: {}", "Cleaned".bold(), summary.cleaned);
            println!("{}: {}", "Paragraphs removed".bold(), summary.paragraphs_removed);
            if summary.failed > 0 {
                println!("{}: {}", "Failed".red().bold(), summary.failed);
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn build_options(
    preset: Preset,
    config: Option<&Path>,
) -> Result<CleanerOptions, Box<dyn std::error::Error>> {
    let options = match config {
        Some(path) => CleanerOptions::load(path)?,
        None => preset.into(),
    };
    Ok(options)
}

/// Cleans every input into `<stem>_cleaned.txt` and `<stem>_stats.json`.
///
/// Inputs are read first, cleaned in parallel, then written. Unreadable
/// inputs are logged and counted, not fatal.
fn run_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    cleaner: &ContentCleaner,
) -> Result<BatchSummary, Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let pb = create_progress_bar(inputs.len() as u64);
    let mut summary = BatchSummary::default();

    let mut stems = Vec::with_capacity(inputs.len());
    let mut texts = Vec::with_capacity(inputs.len());
    for input in inputs {
        match fs::read_to_string(input) {
            Ok(text) => {
                stems.push(file_stem(input));
                texts.push(text);
            }
            Err(e) => {
                warn!(path = %input.display(), error = %e, "skipping input");
                summary.failed += 1;
                pb.inc(1);
            }
        }
    }

    pb.set_message("cleaning");
    let results = cleaner.clean_batch(&texts);

    for (stem, result) in stems.iter().zip(results) {
        pb.set_message(stem.clone());
        fs::write(
            output_dir.join(format!("{stem}_cleaned.txt")),
            &result.text,
        )?;
        fs::write(
            output_dir.join(format!("{stem}_stats.json")),
            result.stats.to_json_pretty()?,
        )?;

        summary.cleaned += 1;
        summary.paragraphs_removed += result.stats.removed;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(summary)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn read_input(input: &Path) -> io::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(input)
    }
}

fn print_summary(result: &CleanOutput) {
    let stats = &result.stats;
    let report = result.report();

    eprintln!("\n{}", "Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40));
    eprintln!("{}: {}", "Retained".bold(), stats.retained);
    eprintln!("{}: {}", "Removed".bold(), stats.removed);
    eprintln!("{}: {}", "Protected".bold(), stats.protected_count);
    eprintln!("{}: {}", "Tables".bold(), stats.table_count);
    eprintln!("{}: {}", "Headers".bold(), stats.headers_removed);
    eprintln!("{}: {}", "Footers".bold(), stats.footers_removed);
    eprintln!("{}: {}", "Disclaimers".bold(), stats.disclaimers_removed);
    eprintln!("{}: {}", "Blocks".bold(), stats.blocks_removed());
    eprintln!(
        "{}: {} → {} chars ({}%)",
        "Length".bold(),
        report.original_length,
        report.cleaned_length,
        report.reduction_percent
    );
}

fn print_version() {
    println!("{} {}", "mailscrub".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Deterministic noise removal for business email");
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
