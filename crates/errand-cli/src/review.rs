//! # Review Subcommand
//!
//! Submitting and listing the ratings parties leave once an errand is
//! terminal. Bounds and uniqueness are enforced by the state machine.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use errand_state::{Party, ReviewTarget};
use errand_store::ErrandRepository;

use crate::{load_errand, open_store};

/// Arguments for the `errand review` subcommand.
#[derive(Args, Debug)]
pub struct ReviewArgs {
    #[command(subcommand)]
    pub command: ReviewCommand,
}

/// Review subcommands.
#[derive(Subcommand, Debug)]
pub enum ReviewCommand {
    /// Submit a review on a finished errand.
    Add {
        /// Errand UUID.
        #[arg(long)]
        id: String,
        /// Display name of the reviewer.
        #[arg(long)]
        reviewer: String,
        /// Which role the review is about: requester or helper.
        #[arg(long)]
        target: String,
        /// Rating from 1 (worst) to 5 (best).
        #[arg(long)]
        rating: u8,
        /// Optional free-text comment.
        #[arg(long)]
        comment: Option<String>,
    },

    /// List reviews on an errand in submission order.
    List {
        /// Errand UUID.
        #[arg(long)]
        id: String,
    },
}

fn parse_target(s: &str) -> Result<ReviewTarget> {
    match s {
        "requester" => Ok(ReviewTarget::Requester),
        "helper" => Ok(ReviewTarget::Helper),
        other => anyhow::bail!("unknown review target: {other:?}"),
    }
}

/// Execute the review subcommand.
pub fn run_review(args: &ReviewArgs, store_path: &Path) -> Result<u8> {
    match &args.command {
        ReviewCommand::Add {
            id,
            reviewer,
            target,
            rating,
            comment,
        } => {
            let target = parse_target(target)?;
            let store = open_store(store_path);
            let mut errand = load_errand(&store, id)?;
            errand.add_review(
                Party::guest(reviewer.clone()),
                target,
                *rating,
                comment.clone(),
            )?;
            store.save(&errand)?;
            println!("review recorded on {id}");
            Ok(0)
        }

        ReviewCommand::List { id } => {
            let store = open_store(store_path);
            let errand = load_errand(&store, id)?;
            if errand.reviews.is_empty() {
                println!("no reviews");
                return Ok(0);
            }
            for r in &errand.reviews {
                println!(
                    "{} on {}: {}/5 {}",
                    r.reviewer.name,
                    r.target,
                    r.rating,
                    r.comment.as_deref().unwrap_or(""),
                );
            }
            Ok(0)
        }
    }
}
