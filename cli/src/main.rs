//! deckclean CLI - profile export cleaning and filtering tool
//!
//! A command-line tool for cleaning vendor CSV exports and removing
//! female/business profiles from them.

use clap::{Parser, Subcommand};
use colored::*;
use deckclean::{
    default_cleaned_path, CleanOptions, Cleaner, Deckclean, FilterOutcome, Reason, Verdict,
    WordLists,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Clean profile exports and filter out female/business accounts
#[derive(Parser)]
#[command(
    name = "deckclean",
    version,
    about = "Clean profile CSV exports and filter female/business accounts",
    long_about = "deckclean - profile export cleaner.\n\n\
                  Removes vendor footers and junk rows from CSV exports, then drops\n\
                  profiles whose username or full name looks female or business-like.\n\n\
                  Usage:\n  \
                  deckclean filter <file.csv>       Write filtered_<file.csv>\n  \
                  deckclean clean <file.csv>        Write <file>_cleaned.csv\n  \
                  deckclean classify <user> [name]  Explain a single verdict"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the word list files
    #[arg(long, env = "DECKCLEAN_WORDLISTS", global = true)]
    wordlists: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean and filter one or more exports
    Filter {
        /// Input CSV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file path (single input only; default: filtered_<name>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on rows with more fields than the header
        #[arg(long)]
        strict: bool,

        /// Confirm footers only from the rows after a candidate
        #[arg(long)]
        lookahead: bool,

        /// Fold mathematical and fullwidth letters before classifying
        #[arg(long)]
        fold_fonts: bool,

        /// Classify rows on a single thread
        #[arg(long)]
        sequential: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run only the cleaning stage
    Clean {
        /// Input CSV file
        input: PathBuf,

        /// Output file path (default: <name>_cleaned.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the cleaning report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a single profile and show the deciding rule
    Classify {
        /// Account handle
        username: String,

        /// Display name
        fullname: Option<String>,

        /// Fold mathematical and fullwidth letters before classifying
        #[arg(long)]
        fold_fonts: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the loaded word lists
    Wordlists,

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deckclean=warn")),
        1 => EnvFilter::new("deckclean=info"),
        _ => EnvFilter::new("deckclean=debug"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let builder = match cli.wordlists {
        Some(dir) => Deckclean::new().with_wordlist_dir(dir),
        None => Deckclean::new(),
    };

    match cli.command {
        Commands::Filter {
            inputs,
            output,
            strict,
            lookahead,
            fold_fonts,
            sequential,
            json,
        } => {
            if output.is_some() && inputs.len() > 1 {
                return Err("--output can only be used with a single input".into());
            }
            for input in &inputs {
                ensure_csv(input)?;
            }

            let mut builder = builder;
            if strict {
                builder = builder.strict();
            }
            if lookahead {
                builder = builder.lookahead();
            }
            if fold_fonts {
                builder = builder.fold_fonts();
            }
            if sequential {
                builder = builder.sequential();
            }

            let pb = create_spinner("Loading word lists...");
            let pipeline = builder.build();

            if inputs.len() == 1 {
                pb.set_message("Filtering profiles...");
                let outcome = match output {
                    Some(ref path) => pipeline.run_to(&inputs[0], path),
                    None => pipeline.run(&inputs[0]),
                };
                pb.finish_and_clear();

                let outcome = outcome?;
                if json {
                    println!("{}", outcome_json(&inputs[0], &outcome));
                } else {
                    print_outcome(&inputs[0], &outcome);
                }
                return Ok(());
            }

            pb.set_message(format!("Filtering {} files...", inputs.len()));
            let results = pipeline.run_batch(&inputs);
            pb.finish_and_clear();

            let mut failed = 0;
            for (input, result) in inputs.iter().zip(results) {
                match result {
                    Ok(outcome) if json => println!("{}", outcome_json(input, &outcome)),
                    Ok(outcome) => print_outcome(input, &outcome),
                    Err(e) => {
                        failed += 1;
                        eprintln!("{} {}: {}", "✗".red().bold(), input.display(), e);
                    }
                }
            }

            if failed > 0 {
                return Err(format!("{} of {} files failed", failed, inputs.len()).into());
            }
        }

        Commands::Clean {
            input,
            output,
            json,
        } => {
            ensure_csv(&input)?;
            let pb = create_spinner("Cleaning export...");

            let output = output.unwrap_or_else(|| default_cleaned_path(&input));
            let cleaned = Cleaner::new(CleanOptions::default()).write_cleaned(&input, &output)?;

            pb.finish_and_clear();

            if json {
                println!("{}", cleaned.report.to_json());
            } else {
                let report = &cleaned.report;
                println!("{} Cleaned: {}", "✓".green().bold(), output.display());
                println!("{}", "─".repeat(40));
                println!("{}: {}", "Delimiter".bold(), report.delimiter);
                println!("{}: {}", "Rows parsed".bold(), report.rows_parsed);
                println!("{}: {}", "Footer rows".bold(), report.footer_rows);
                println!(
                    "{}: {}",
                    "Junk rows".bold(),
                    report.swept_rows + report.junk_rows
                );
                if report.truncated_rows > 0 {
                    println!("{}: {}", "Truncated rows".bold(), report.truncated_rows);
                }
                println!("{}: {}", "Rows remaining".bold(), report.rows_remaining);
            }
        }

        Commands::Classify {
            username,
            fullname,
            fold_fonts,
            json,
        } => {
            let builder = if fold_fonts {
                builder.fold_fonts()
            } else {
                builder
            };
            let classifier = builder.classifier();
            let fullname = fullname.unwrap_or_default();
            let reason = classifier.explain(&username, &fullname);

            if json {
                let value = serde_json::json!({
                    "username": username,
                    "fullname": fullname,
                    "verdict": reason.verdict(),
                    "reason": reason,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print_reason(&reason);
            }
        }

        Commands::Wordlists => {
            let (source, lists) = match builder.wordlist_dir() {
                Some(dir) => (dir.display().to_string(), WordLists::load_from_dir(dir)),
                None => ("bundled".to_string(), WordLists::load_default()),
            };

            println!("{}", "Word Lists".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Source".bold(), source);
            println!("{}: {}", "Male exceptions".bold(), lists.male_exceptions.len());
            println!("{}: {}", "Business keywords".bold(), lists.female_business.len());
            println!("{}: {}", "Female names".bold(), lists.female_names.len());

            if lists.is_empty() {
                println!("{} No word lists found", "!".yellow().bold());
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn ensure_csv(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(format!("not a .csv file: {}", path.display()).into());
    }
    Ok(())
}

fn print_outcome(input: &Path, outcome: &FilterOutcome) {
    let stats = &outcome.stats;
    println!("{} Filtered: {}", "✓".green().bold(), input.display());
    println!("{}", "─".repeat(40));
    println!("{}: {}", "Output".bold(), outcome.output.display());
    println!("{}: {}", "Processed".bold(), stats.total_processed);
    println!("{}: {}", "Removed".bold(), stats.removed.to_string().red());
    println!("{}: {}", "Remaining".bold(), stats.remaining.to_string().green());
    if outcome.report.footer_rows > 0 {
        println!("{}: {}", "Footer rows".bold(), outcome.report.footer_rows);
    }
}

fn outcome_json(input: &Path, outcome: &FilterOutcome) -> serde_json::Value {
    serde_json::json!({
        "input": input.display().to_string(),
        "output": outcome.output.display().to_string(),
        "stats": outcome.stats,
        "report": outcome.report,
    })
}

fn print_reason(reason: &Reason) {
    let verdict = match reason.verdict() {
        Verdict::Female => "female".red().bold(),
        Verdict::Keep => "keep".green().bold(),
    };
    println!("{}: {}", "Verdict".bold(), verdict);
    println!("{}: {}", "Reason".bold(), reason);
}

fn print_version() {
    println!("{} {}", "deckclean".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Profile export cleaning and filtering");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
