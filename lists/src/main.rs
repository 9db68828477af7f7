//! Token list registry CLI.
//!
//! Keeps `.token-lists/state.json` in the current directory: one entry per
//! list URL with its accepted list, any pending newer version, and the last
//! fetch error.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use token_lists::core::actions::{Action, accept_list_update, add_list, remove_list};
use token_lists::core::reducer::Transition;
use token_lists::core::types::{ListEntry, ListsState};
use token_lists::exit_codes;
use token_lists::fetch::{FetchOutcome, fetch_all, fetch_list};
use token_lists::io::config::{ListsConfig, load_config};
use token_lists::io::init::{InitOptions, ListsPaths, init_lists};
use token_lists::io::source::DefaultSource;
use token_lists::io::state_store::{load_state, write_state};
use token_lists::logging;
use token_lists::store::Store;

#[derive(Parser)]
#[command(
    name = "token-lists",
    version,
    about = "Track externally hosted token lists and their updates"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.token-lists/` and register the configured default lists.
    Init {
        /// Reset an existing registry.
        #[arg(short, long)]
        force: bool,
    },
    /// Register a list URL without fetching it.
    Add { url: String },
    /// Forget a list URL.
    Remove { url: String },
    /// Promote the pending update of a list to current.
    Accept { url: String },
    /// Fetch one list, or every registered list when no URL is given.
    Fetch { url: Option<String> },
    /// Print the registry.
    Show {
        /// Print the raw state JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check config and state files.
    Validate,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let root = std::env::current_dir().context("resolve current directory")?;
    match cli.command {
        Command::Init { force } => cmd_init(&root, force),
        Command::Add { url } => cmd_dispatch(&root, add_list(require_url(url)?)),
        Command::Remove { url } => cmd_dispatch(&root, remove_list(require_url(url)?)),
        Command::Accept { url } => cmd_dispatch(&root, accept_list_update(require_url(url)?)),
        Command::Fetch { url } => {
            let url = url.map(require_url).transpose()?;
            cmd_fetch(&root, url.as_deref())
        }
        Command::Show { json } => cmd_show(&root, json),
        Command::Validate => cmd_validate(&root),
    }
}

/// Blank URLs would be persisted as keys that fail every later state load.
fn require_url(url: String) -> Result<String> {
    if url.trim().is_empty() {
        bail!("list url must not be empty: {:?}", url);
    }
    Ok(url)
}

fn cmd_init(root: &Path, force: bool) -> Result<i32> {
    let paths = init_lists(root, &InitOptions { force })?;
    println!("initialized {}", paths.lists_dir.display());
    Ok(exit_codes::OK)
}

fn cmd_dispatch(root: &Path, action: Action) -> Result<i32> {
    let paths = ListsPaths::new(root);
    let mut store = Store::new(load_state(&paths.state_path)?);
    let name = action.name();
    let url = action.url().to_string();
    match store.dispatch(action) {
        Transition::Applied => {
            write_state(&paths.state_path, store.state())?;
            println!("{}: {}", name, url);
        }
        Transition::Ignored(reason) => println!("{}: {} (ignored: {})", name, url, reason.as_str()),
    }
    Ok(exit_codes::OK)
}

fn cmd_fetch(root: &Path, url: Option<&str>) -> Result<i32> {
    let paths = ListsPaths::new(root);
    let config = load_config(&paths.config_path)?;
    let source = DefaultSource::new(root, config.fetch_timeout())?;
    let mut store = Store::new(load_state(&paths.state_path)?);

    let outcomes = match url {
        Some(url) => vec![(
            url.to_string(),
            fetch_list(&mut store, &source, url, config.auto_accept),
        )],
        None => fetch_all(&mut store, &source, config.auto_accept),
    };
    write_state(&paths.state_path, store.state())?;

    for (url, outcome) in &outcomes {
        println!("{}: {}", url, describe_outcome(outcome));
    }
    if outcomes.iter().any(|(_, outcome)| outcome.is_failure()) {
        return Ok(exit_codes::FETCH_FAILED);
    }
    Ok(exit_codes::OK)
}

fn cmd_show(root: &Path, json: bool) -> Result<i32> {
    let paths = ListsPaths::new(root);
    let state = load_state(&paths.state_path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&state).context("serialize state")?);
    } else {
        print!("{}", render_state(&state));
    }
    if state.has_pending_updates() {
        return Ok(exit_codes::UPDATE_PENDING);
    }
    Ok(exit_codes::OK)
}

fn cmd_validate(root: &Path) -> Result<i32> {
    let paths = ListsPaths::new(root);
    let config: ListsConfig = load_config(&paths.config_path).context("load config.toml")?;
    let state = load_state(&paths.state_path).context("load state.json")?;
    let unregistered = config
        .default_list_urls
        .iter()
        .filter(|url| state.get(url).is_none())
        .count();
    println!(
        "ok: {} lists registered, {} default lists not registered",
        state.by_url.len(),
        unregistered
    );
    Ok(exit_codes::OK)
}

fn describe_outcome(outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::Saved => "saved".to_string(),
        FetchOutcome::UpdatePending(upgrade) => format!("{} update pending", upgrade.as_str()),
        FetchOutcome::AutoAccepted(upgrade) => format!("{} update accepted", upgrade.as_str()),
        FetchOutcome::Unchanged => "unchanged".to_string(),
        FetchOutcome::Failed(message) => format!("failed: {}", message),
    }
}

/// One line per list, in URL order.
fn render_state(state: &ListsState) -> String {
    if state.by_url.is_empty() {
        return "no lists registered\n".to_string();
    }
    state
        .by_url
        .iter()
        .map(|(url, entry)| format!("{} {}\n", url, render_entry(entry)))
        .collect()
}

fn render_entry(entry: &ListEntry) -> String {
    let mut parts = Vec::new();
    match &entry.current {
        Some(list) => parts.push(format!("current={} ({} tokens)", list.version, list.tokens.len())),
        None => parts.push("current=none".to_string()),
    }
    if let Some(update) = &entry.pending_update {
        parts.push(format!("pending={}", update.version));
    }
    if entry.is_loading() {
        parts.push("loading".to_string());
    }
    if let Some(error) = &entry.error {
        parts.push(format!("error={:?}", error));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_lists::core::version::VersionUpgrade;
    use token_lists::test_support::{entry, state_with, stub_token_list, updated_stub_list};

    #[test]
    fn parse_init() {
        let cli = Cli::parse_from(["token-lists", "init"]);
        assert!(matches!(cli.command, Command::Init { force: false }));
    }

    #[test]
    fn parse_fetch_without_url() {
        let cli = Cli::parse_from(["token-lists", "fetch"]);
        assert!(matches!(cli.command, Command::Fetch { url: None }));
    }

    #[test]
    fn parse_accept_url() {
        let cli = Cli::parse_from(["token-lists", "accept", "https://example.org/l.json"]);
        match cli.command {
            Command::Accept { url } => assert_eq!(url, "https://example.org/l.json"),
            _ => panic!("expected accept"),
        }
    }

    #[test]
    fn render_state_lists_versions_and_errors() {
        let mut e = entry(Some(stub_token_list()), Some(updated_stub_list()), Some("r1"));
        e.error = Some("offline".to_string());
        let rendered = render_state(&state_with("fake-url", e));
        assert_eq!(
            rendered,
            "fake-url current=1.1.1 (0 tokens) pending=1.1.2 loading error=\"offline\"\n"
        );
    }

    #[test]
    fn require_url_rejects_blank_input() {
        assert_eq!(require_url("list.json".to_string()).expect("valid"), "list.json");
        for blank in ["", " ", "\t\n"] {
            let err = require_url(blank.to_string()).expect_err("blank");
            assert!(err.to_string().contains("must not be empty"));
        }
    }

    #[test]
    fn describe_outcome_names_the_upgrade() {
        assert_eq!(
            describe_outcome(&FetchOutcome::UpdatePending(VersionUpgrade::Major)),
            "major update pending"
        );
        assert_eq!(
            describe_outcome(&FetchOutcome::AutoAccepted(VersionUpgrade::Patch)),
            "patch update accepted"
        );
    }

    #[test]
    fn render_empty_state() {
        assert_eq!(render_state(&ListsState::new()), "no lists registered\n");
    }
}
