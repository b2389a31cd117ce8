//! eventmap CLI - build a static event calendar/map page from a CSV sheet
//!
//! # Main Command
//!
//! ```bash
//! eventmap                           # events.csv -> index.html
//! eventmap events.csv site/index.html --hide-past
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! eventmap parse events.csv          # Just parse CSV to JSON
//! eventmap events events.csv         # Print transformed events as JSON
//! ```

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use eventmap::logs::{init_logging, LogConfig};
use eventmap::{
    build_events, format_delimiter, generate_page, parse_csv_file_auto, GenerateOptions,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "eventmap")]
#[command(about = "Build a static calendar + map page from an event CSV", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    build: BuildArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the page (default when no subcommand is given)
    Build(BuildArgs),

    /// Parse a CSV file and output rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        #[command(flatten)]
        log: LogArgs,
    },

    /// Transform a CSV file and output events as JSON
    Events {
        /// Input CSV file
        input: PathBuf,

        #[command(flatten)]
        rows: RowArgs,

        #[command(flatten)]
        log: LogArgs,
    },
}

#[derive(Args, Clone)]
struct BuildArgs {
    /// Input CSV file
    #[arg(default_value = "events.csv", env = "EVENTMAP_INPUT")]
    input: PathBuf,

    /// Output HTML file
    #[arg(default_value = "index.html", env = "EVENTMAP_OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    rows: RowArgs,

    /// Page <title>
    #[arg(long, env = "EVENTMAP_TITLE")]
    title: Option<String>,

    /// Heading above the card list ("\n" for a line break)
    #[arg(long, env = "EVENTMAP_HEADING")]
    heading: Option<String>,

    /// Footer credit line
    #[arg(long, env = "EVENTMAP_CREDITS")]
    credits: Option<String>,

    /// Skip the schema check of the embedded events
    #[arg(long)]
    no_validate: bool,

    #[command(flatten)]
    log: LogArgs,
}

#[derive(Args, Clone)]
struct RowArgs {
    /// Drop events whose end date has passed
    #[arg(long, env = "EVENTMAP_HIDE_PAST")]
    hide_past: bool,

    /// Reference date for --hide-past (default: local today)
    #[arg(long, value_name = "YYYY-MM-DD", env = "EVENTMAP_TODAY")]
    today: Option<NaiveDate>,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Name for map targets of events without a location ("{n}" = slot number)
    #[arg(long, env = "EVENTMAP_PLACEHOLDER")]
    placeholder: Option<String>,
}

#[derive(Args, Clone)]
struct LogArgs {
    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Commands {
    fn log_args(&self) -> &LogArgs {
        match self {
            Commands::Build(args) => &args.log,
            Commands::Parse { log, .. } | Commands::Events { log, .. } => log,
        }
    }
}

impl RowArgs {
    /// Options with "today" captured once for the whole run.
    fn options(&self) -> GenerateOptions {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());

        let mut options = GenerateOptions::new(today);
        options.delimiter = self.delimiter;
        options.transform.hide_past = self.hide_past;
        if let Some(ref placeholder) = self.placeholder {
            options.transform.placeholder = placeholder.clone();
        }
        options
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Build(cli.build));

    let log = command.log_args();
    let log_config = LogConfig::from_flags(log.verbose, log.quiet)
        .with_ansi(std::io::stderr().is_terminal());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let result = match command {
        Commands::Build(args) => cmd_build(&args),
        Commands::Parse {
            input, delimiter, ..
        } => cmd_parse(&input, delimiter),
        Commands::Events { input, rows, .. } => cmd_events(&input, &rows),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_build(args: &BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = args.rows.options();
    options.skip_validation = args.no_validate;
    if let Some(ref title) = args.title {
        options.page.page_title = title.clone();
    }
    if let Some(ref heading) = args.heading {
        options.page.heading = heading.replace("\\n", "\n");
    }
    if let Some(ref credits) = args.credits {
        options.page.credits = credits.clone();
    }

    let summary = generate_page(&args.input, &args.output, &options)?;

    eprintln!(
        "✨ {} events ({} on the map, {} expired) → {}",
        summary.event_count,
        summary.mapped_count,
        summary.expired_count,
        summary.output.display()
    );
    Ok(())
}

fn cmd_parse(input: &Path, delimiter: Option<char>) -> Result<(), Box<dyn std::error::Error>> {
    let result = parse_csv_file_auto(input, delimiter)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        format_delimiter(result.delimiter),
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    println!("{}", serde_json::to_string_pretty(&result.records)?);
    Ok(())
}

fn cmd_events(input: &Path, rows: &RowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let built = build_events(input, &rows.options())?;
    println!("{}", serde_json::to_string_pretty(&built.result.events)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn build_args(cli: Cli) -> BuildArgs {
        match cli.command {
            None => cli.build,
            Some(Commands::Build(args)) => args,
            Some(_) => panic!("expected a build invocation"),
        }
    }

    #[test]
    fn test_default_paths() {
        let args = build_args(Cli::try_parse_from(["eventmap"]).unwrap());

        assert_eq!(args.input, PathBuf::from("events.csv"));
        assert_eq!(args.output, PathBuf::from("index.html"));
        assert!(!args.no_validate);
        assert_eq!(args.log.verbose, 0);
    }

    #[test]
    fn test_row_flags_reach_options() {
        let cli = Cli::try_parse_from([
            "eventmap",
            "sheet.csv",
            "site/index.html",
            "--hide-past",
            "--today",
            "2025-06-01",
            "--placeholder",
            "장소{n}",
            "-d",
            ";",
        ])
        .unwrap();
        let args = build_args(cli);
        let options = args.rows.options();

        assert_eq!(args.input, PathBuf::from("sheet.csv"));
        assert_eq!(args.output, PathBuf::from("site/index.html"));
        assert!(options.transform.hide_past);
        assert_eq!(options.transform.today, date("2025-06-01"));
        assert_eq!(options.transform.placeholder, "장소{n}");
        assert_eq!(options.delimiter, Some(';'));
    }

    #[test]
    fn test_invalid_today_rejected() {
        assert!(Cli::try_parse_from(["eventmap", "--today", "2025/06/01"]).is_err());
    }

    #[test]
    fn test_hide_past_from_env() {
        std::env::set_var("EVENTMAP_HIDE_PAST", "true");
        let parsed = Cli::try_parse_from(["eventmap", "--today", "2025-06-01"]);
        std::env::remove_var("EVENTMAP_HIDE_PAST");

        let options = build_args(parsed.unwrap()).rows.options();
        assert!(options.transform.hide_past);
    }

    #[test]
    fn test_events_subcommand() {
        let cli = Cli::try_parse_from(["eventmap", "events", "sheet.csv", "--hide-past", "-vv"])
            .unwrap();

        match cli.command {
            Some(Commands::Events { input, rows, log }) => {
                assert_eq!(input, PathBuf::from("sheet.csv"));
                assert!(rows.hide_past);
                assert_eq!(log.verbose, 2);
            }
            _ => panic!("expected the events subcommand"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["eventmap", "-v", "-q"]).is_err());
    }
}
