//! # Dispute Subcommand
//!
//! Filing and resolving dispute side-records. Resolution is admin-only;
//! the lifecycle consequences (settlement or penalty) are applied by the
//! state machine's resolution path.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use errand_rules::Action;
use errand_state::{DisputeOutcome, Party};
use errand_store::ErrandRepository;

use crate::lifecycle::{parse_role, require_permission};
use crate::{load_errand, open_store};

/// Arguments for the `errand dispute` subcommand.
#[derive(Args, Debug)]
pub struct DisputeArgs {
    #[command(subcommand)]
    pub command: DisputeCommand,
}

/// Dispute subcommands.
#[derive(Subcommand, Debug)]
pub enum DisputeCommand {
    /// File a dispute against an in-progress or completed errand.
    File {
        /// Errand UUID.
        #[arg(long)]
        id: String,
        /// Display name of the reporting party.
        #[arg(long)]
        reporter: String,
        /// What the disagreement is about.
        #[arg(long)]
        reason: String,
    },

    /// Resolve the open dispute into a final outcome (admin only).
    Resolve {
        /// Errand UUID.
        #[arg(long)]
        id: String,
        /// Display name of the resolving admin.
        #[arg(long)]
        resolver: String,
        /// Role of the caller; must be admin.
        #[arg(long, default_value = "admin")]
        role: String,
        /// Decided outcome: done or cancelled.
        #[arg(long)]
        outcome: String,
    },
}

fn parse_outcome(s: &str) -> Result<DisputeOutcome> {
    match s {
        "done" => Ok(DisputeOutcome::Done),
        "cancelled" => Ok(DisputeOutcome::Cancelled),
        other => anyhow::bail!("unknown dispute outcome: {other:?}"),
    }
}

/// Execute the dispute subcommand.
pub fn run_dispute(args: &DisputeArgs, store_path: &Path) -> Result<u8> {
    match &args.command {
        DisputeCommand::File {
            id,
            reporter,
            reason,
        } => {
            let store = open_store(store_path);
            let mut errand = load_errand(&store, id)?;
            let dispute_id = *errand
                .open_dispute(Party::guest(reporter.clone()), reason.clone())?
                .id
                .as_uuid();
            store.save(&errand)?;
            println!("dispute {dispute_id} filed on {id}");
            Ok(0)
        }

        DisputeCommand::Resolve {
            id,
            resolver,
            role,
            outcome,
        } => {
            let role = parse_role(role)?;
            require_permission(role, Action::AdminOnly)?;
            let outcome = parse_outcome(outcome)?;

            let store = open_store(store_path);
            let mut errand = load_errand(&store, id)?;
            errand.resolve_dispute(Party::guest(resolver.clone()), outcome)?;
            store.save(&errand)?;
            println!(
                "dispute on {id} resolved as {outcome}; errand is now {}",
                errand.status,
            );
            Ok(0)
        }
    }
}
