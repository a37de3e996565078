//! # Lifecycle Subcommands
//!
//! Errand lifecycle commands operating on the local JSON snapshot store:
//! posting, matching, start/complete/cancel, settlement payout, and queries.
//! The state machine in `errand-state` enforces the transition table;
//! rejections surface as command errors.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;

use errand_core::Krw;
use errand_rules::{role_may, Action, Role};
use errand_state::{Errand, ErrandCategory, Party};
use errand_store::ErrandRepository;

use crate::{load_errand, open_store, print_detail, print_summary};

/// Arguments for `errand post`.
#[derive(Args, Debug)]
pub struct PostArgs {
    /// Short title shown in listings.
    #[arg(long)]
    pub title: String,
    /// Full task description.
    #[arg(long, default_value = "")]
    pub detail: String,
    /// Task category (convenience, delivery, bank, civic_office, other).
    #[arg(long)]
    pub category: String,
    /// Fixed reward in whole won.
    #[arg(long)]
    pub reward: u64,
    /// Requester display name.
    #[arg(long)]
    pub requester: String,
    /// Role of the caller (requester, helper, admin).
    #[arg(long, default_value = "requester")]
    pub role: String,
}

/// Arguments for `errand match`.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Errand UUID.
    #[arg(long)]
    pub id: String,
    /// Helper display name.
    #[arg(long)]
    pub helper: String,
    /// Role of the caller (requester, helper, admin).
    #[arg(long, default_value = "helper")]
    pub role: String,
}

/// Arguments for commands addressing one errand.
#[derive(Args, Debug)]
pub struct IdArgs {
    /// Errand UUID.
    #[arg(long)]
    pub id: String,
}

pub(crate) fn parse_role(s: &str) -> Result<Role> {
    Role::from_str_opt(s).with_context(|| format!("unknown role: {s:?}"))
}

pub(crate) fn require_permission(role: Role, action: Action) -> Result<()> {
    if !role_may(role, action) {
        bail!("role '{role}' may not perform '{action}'");
    }
    Ok(())
}

/// `errand post` — Post a new errand in the Open status.
pub fn run_post(args: &PostArgs, store_path: &Path) -> Result<u8> {
    let role = parse_role(&args.role)?;
    require_permission(role, Action::CreateErrand)?;
    if args.reward == 0 {
        bail!("reward must be positive");
    }
    let category = ErrandCategory::from_str_opt(&args.category)
        .with_context(|| format!("unknown category: {:?}", args.category))?;

    let errand = Errand::post(
        args.title.clone(),
        args.detail.clone(),
        category,
        Krw(args.reward),
        Party::guest(args.requester.clone()),
    );
    let store = open_store(store_path);
    store.save(&errand)?;
    println!("posted {}", errand.id.as_uuid());
    Ok(0)
}

/// `errand match` — Assign a helper (Open → Matched).
pub fn run_match(args: &MatchArgs, store_path: &Path) -> Result<u8> {
    let role = parse_role(&args.role)?;
    require_permission(role, Action::AcceptMatch)?;

    let store = open_store(store_path);
    let mut errand = load_errand(&store, &args.id)?;
    errand.assign_helper(Party::guest(args.helper.clone()))?;
    store.save(&errand)?;
    println!("matched {} to {}", args.helper, errand.id.as_uuid());
    Ok(0)
}

/// `errand start` — Begin work (Matched → InProgress).
pub fn run_start(args: &IdArgs, store_path: &Path) -> Result<u8> {
    let store = open_store(store_path);
    let mut errand = load_errand(&store, &args.id)?;
    errand.start()?;
    store.save(&errand)?;
    println!("started {}", errand.id.as_uuid());
    Ok(0)
}

/// `errand complete` — Finish work (InProgress → Done) and print the
/// settlement split.
pub fn run_complete(args: &IdArgs, store_path: &Path) -> Result<u8> {
    let store = open_store(store_path);
    let mut errand = load_errand(&store, &args.id)?;
    errand.complete()?;
    store.save(&errand)?;
    if let Some(s) = &errand.settlement {
        println!(
            "completed {}: fee {}, payout {}",
            errand.id.as_uuid(),
            s.platform_fee,
            s.helper_payout,
        );
    }
    Ok(0)
}

/// `errand cancel` — Cancel from any non-terminal status and print the
/// penalty decision.
pub fn run_cancel(args: &IdArgs, store_path: &Path) -> Result<u8> {
    let store = open_store(store_path);
    let mut errand = load_errand(&store, &args.id)?;
    errand.cancel()?;
    store.save(&errand)?;
    if let Some(c) = &errand.cancellation {
        println!(
            "cancelled {}: penalty {}, compensation {} ({})",
            errand.id.as_uuid(),
            c.requester_penalty,
            c.helper_compensation,
            c.reason,
        );
    }
    Ok(0)
}

/// `errand paid` — Mark the settlement payout disbursed.
pub fn run_paid(args: &IdArgs, store_path: &Path) -> Result<u8> {
    let store = open_store(store_path);
    let mut errand = load_errand(&store, &args.id)?;
    errand.mark_settlement_paid()?;
    store.save(&errand)?;
    println!("settlement paid for {}", errand.id.as_uuid());
    Ok(0)
}

/// `errand show` — Print the full errand record.
pub fn run_show(args: &IdArgs, store_path: &Path) -> Result<u8> {
    let store = open_store(store_path);
    let errand = load_errand(&store, &args.id)?;
    print_detail(&errand);
    Ok(0)
}

/// `errand list` — One line per errand, most recently updated first.
pub fn run_list(store_path: &Path) -> Result<u8> {
    let store = open_store(store_path);
    let errands = store.list()?;
    if errands.is_empty() {
        println!("no errands");
        return Ok(0);
    }
    for e in &errands {
        print_summary(e);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_path(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("errands.json")
    }

    fn post(dir: &TempDir) -> String {
        let args = PostArgs {
            title: "Pick up a parcel".to_string(),
            detail: "Locker 12".to_string(),
            category: "delivery".to_string(),
            reward: 10_000,
            requester: "jiyoung".to_string(),
            role: "requester".to_string(),
        };
        run_post(&args, &store_path(dir)).unwrap();
        let store = open_store(&store_path(dir));
        store.list().unwrap()[0].id.as_uuid().to_string()
    }

    #[test]
    fn test_post_then_full_lifecycle() {
        let dir = TempDir::new().unwrap();
        let id = post(&dir);
        let path = store_path(&dir);

        let match_args = MatchArgs {
            id: id.clone(),
            helper: "minsu".to_string(),
            role: "helper".to_string(),
        };
        run_match(&match_args, &path).unwrap();
        run_start(&IdArgs { id: id.clone() }, &path).unwrap();
        run_complete(&IdArgs { id: id.clone() }, &path).unwrap();
        run_paid(&IdArgs { id: id.clone() }, &path).unwrap();

        let store = open_store(&path);
        let errand = load_errand(&store, &id).unwrap();
        assert_eq!(errand.status.as_str(), "done");
        let s = errand.settlement.unwrap();
        assert_eq!(s.platform_fee, Krw(1_000));
        assert!(s.paid);
    }

    #[test]
    fn test_helper_role_may_not_post() {
        let dir = TempDir::new().unwrap();
        let args = PostArgs {
            title: "t".to_string(),
            detail: String::new(),
            category: "other".to_string(),
            reward: 1_000,
            requester: "minsu".to_string(),
            role: "helper".to_string(),
        };
        assert!(run_post(&args, &store_path(&dir)).is_err());
    }

    #[test]
    fn test_cancel_after_match_prints_penalty_record() {
        let dir = TempDir::new().unwrap();
        let id = post(&dir);
        let path = store_path(&dir);

        let match_args = MatchArgs {
            id: id.clone(),
            helper: "minsu".to_string(),
            role: "helper".to_string(),
        };
        run_match(&match_args, &path).unwrap();
        run_cancel(&IdArgs { id: id.clone() }, &path).unwrap();

        let store = open_store(&path);
        let errand = load_errand(&store, &id).unwrap();
        let c = errand.cancellation.unwrap();
        assert_eq!(c.requester_penalty, Krw(2_000));
        assert_eq!(c.helper_compensation, Krw(2_000));
    }

    #[test]
    fn test_invalid_transition_is_an_error() {
        let dir = TempDir::new().unwrap();
        let id = post(&dir);
        let path = store_path(&dir);
        assert!(run_complete(&IdArgs { id }, &path).is_err());
    }

    #[test]
    fn test_unknown_errand_is_an_error() {
        let dir = TempDir::new().unwrap();
        post(&dir);
        let missing = uuid_like();
        assert!(run_show(&IdArgs { id: missing }, &store_path(&dir)).is_err());
    }

    fn uuid_like() -> String {
        errand_core::ErrandId::new().as_uuid().to_string()
    }
}
