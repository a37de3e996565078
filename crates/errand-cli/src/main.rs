//! # errand CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! All commands operate on a local JSON snapshot store selected with
//! `--store` (default `errands.json` in the working directory).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use errand_cli::dispute::{run_dispute, DisputeArgs};
use errand_cli::lifecycle::{
    run_cancel, run_complete, run_list, run_match, run_paid, run_post, run_show, run_start,
    IdArgs, MatchArgs, PostArgs,
};
use errand_cli::review::{run_review, ReviewArgs};

/// Errand Stack CLI
///
/// Drives the errand marketplace lifecycle engine against a local JSON
/// store: posting, matching, progress, settlement, cancellation penalties,
/// disputes, and reviews.
#[derive(Parser, Debug)]
#[command(name = "errand", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the JSON snapshot store.
    #[arg(long, global = true, default_value = "errands.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Post a new errand in the Open status.
    Post(PostArgs),

    /// Assign a helper to an open errand (Open → Matched).
    Match(MatchArgs),

    /// Begin work on a matched errand (Matched → InProgress).
    Start(IdArgs),

    /// Complete an errand and compute the settlement (InProgress → Done).
    Complete(IdArgs),

    /// Cancel an errand and compute the penalty decision.
    Cancel(IdArgs),

    /// Mark the settlement payout disbursed.
    Paid(IdArgs),

    /// Show the full errand record.
    Show(IdArgs),

    /// List all errands, most recently updated first.
    List,

    /// File and resolve disputes.
    Dispute(DisputeArgs),

    /// Submit and list reviews.
    Review(ReviewArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(store = %cli.store.display(), "errand CLI starting");

    let result = match cli.command {
        Commands::Post(args) => run_post(&args, &cli.store),
        Commands::Match(args) => run_match(&args, &cli.store),
        Commands::Start(args) => run_start(&args, &cli.store),
        Commands::Complete(args) => run_complete(&args, &cli.store),
        Commands::Cancel(args) => run_cancel(&args, &cli.store),
        Commands::Paid(args) => run_paid(&args, &cli.store),
        Commands::Show(args) => run_show(&args, &cli.store),
        Commands::List => run_list(&cli.store),
        Commands::Dispute(args) => run_dispute(&args, &cli.store),
        Commands::Review(args) => run_review(&args, &cli.store),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_post() {
        let cli = Cli::try_parse_from([
            "errand", "post", "--title", "Parcel", "--category", "delivery", "--reward",
            "10000", "--requester", "jiyoung",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Post(_)));
        if let Commands::Post(args) = cli.command {
            assert_eq!(args.reward, 10_000);
            assert_eq!(args.role, "requester");
        }
    }

    #[test]
    fn cli_parse_dispute_resolve() {
        let cli = Cli::try_parse_from([
            "errand",
            "dispute",
            "resolve",
            "--id",
            "0191d6a7-1111-2222-3333-444455556666",
            "--resolver",
            "ops-admin",
            "--outcome",
            "cancelled",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Dispute(_)));
    }

    #[test]
    fn cli_parse_store_override() {
        let cli =
            Cli::try_parse_from(["errand", "--store", "/tmp/e.json", "list"]).unwrap();
        assert_eq!(cli.store, PathBuf::from("/tmp/e.json"));
        assert!(matches!(cli.command, Commands::List));
    }
}
