//! # errand-cli — CLI Tool for the Errand Stack
//!
//! Provides the `errand` command-line interface: the full errand lifecycle
//! over a local JSON snapshot store, for back-office use and scripting.
//!
//! ## Subcommands
//!
//! - `errand post` / `match` / `start` / `complete` / `cancel` / `paid` —
//!   Lifecycle transitions.
//! - `errand show` / `list` — Query errand state.
//! - `errand dispute` — File and resolve disputes.
//! - `errand review` — Submit and list reviews.
//!
//! ```bash
//! errand post --title "Pick up a parcel" --category delivery \
//!     --reward 10000 --requester jiyoung
//! errand match --id <uuid> --helper minsu
//! errand cancel --id <uuid>
//! ```

pub mod dispute;
pub mod lifecycle;
pub mod review;

use anyhow::{Context, Result};
use errand_core::ErrandId;
use errand_state::Errand;
use errand_store::{ErrandRepository, JsonFileStore};
use std::path::Path;

/// Open the JSON snapshot store at `path`.
pub fn open_store(path: &Path) -> JsonFileStore {
    JsonFileStore::open(path)
}

/// Load an errand by its UUID string, failing when absent.
pub fn load_errand(store: &JsonFileStore, id: &str) -> Result<Errand> {
    let errand_id = ErrandId::parse(id).context("invalid errand id")?;
    store
        .load(errand_id)?
        .with_context(|| format!("errand not found: {id}"))
}

/// Print a one-line summary of an errand.
pub fn print_summary(e: &Errand) {
    let helper = e.helper.as_ref().map_or("-", |h| h.name.as_str());
    println!(
        "{}  {:<12} {:>8}  {}  (requester: {}, helper: {})",
        e.id.as_uuid(),
        e.status.as_str(),
        e.reward.to_string(),
        e.title,
        e.requester.name,
        helper,
    );
}

/// Print the full errand record, including settlement, cancellation,
/// dispute, reviews, and the transition log.
pub fn print_detail(e: &Errand) {
    println!("errand      {}", e.id.as_uuid());
    println!("title       {}", e.title);
    println!("detail      {}", e.detail);
    println!("category    {}", e.category);
    println!("status      {}", e.status);
    println!("reward      {}", e.reward);
    println!("requester   {}", e.requester.name);
    if let Some(h) = &e.helper {
        println!("helper      {}", h.name);
    }
    println!("created_at  {}", e.created_at.to_iso8601());
    println!("updated_at  {}", e.updated_at.to_iso8601());

    if let Some(s) = &e.settlement {
        println!(
            "settlement  fee {} / payout {} ({})",
            s.platform_fee,
            s.helper_payout,
            if s.paid { "paid" } else { "pending" },
        );
    }
    if let Some(c) = &e.cancellation {
        println!(
            "cancelled   penalty {} / compensation {} ({})",
            c.requester_penalty, c.helper_compensation, c.reason,
        );
    }
    if let Some(d) = &e.dispute {
        let outcome = d
            .resolution
            .as_ref()
            .map_or("pending".to_string(), |r| r.outcome.to_string());
        println!(
            "dispute     {} ({}): {} [outcome: {}]",
            d.id.as_uuid(),
            d.status.as_str(),
            d.reason,
            outcome,
        );
    }
    for r in &e.reviews {
        println!(
            "review      {} on {}: {}/5 {}",
            r.reviewer.name,
            r.target,
            r.rating,
            r.comment.as_deref().unwrap_or(""),
        );
    }
    if !e.transitions.is_empty() {
        println!("transitions:");
        for t in &e.transitions {
            println!(
                "  {} {} -> {} ({})",
                t.timestamp.to_iso8601(),
                t.from_status,
                t.to_status,
                t.reason,
            );
        }
    }
}
