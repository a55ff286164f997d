//! main.rs
//! Entry point for fst

use fstation::app::{
    PreviewSession, PreviewSlot, SearchCoordinator, SortDirection, SortFilterEngine,
};
use fstation::config::Config;
use fstation::core::worker::Workers;
use fstation::core::{HttpFetcher, parse};
use fstation::ui::{render_listing, render_preview};
use fstation::utils::cli::{Args, CliAction, handle_args};
use fstation::utils::{expand_home_path, is_remote_source};

use anyhow::{Context, bail};
use tracing_subscriber::EnvFilter;

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use std::{fs, io, thread};

fn main() -> ExitCode {
    // stdout carries the listing, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = match handle_args() {
        CliAction::Run(args) => args,
        CliAction::Exit => return ExitCode::SUCCESS,
        CliAction::Fail => return ExitCode::FAILURE,
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[fst] Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config_path = args
        .config
        .as_deref()
        .map(|p| expand_home_path(&p.to_string_lossy()));
    let config = Config::load(config_path.as_deref());
    let network = config.network();

    let source = args.source.as_deref().context("no listing source given")?;
    let remote = is_remote_source(source);

    let base = args
        .base_url
        .as_deref()
        .or(network.base_url())
        .or(remote.then_some(source));
    let fetcher = Arc::new(
        HttpFetcher::new(base, network.timeout(), network.user_agent())
            .context("could not set up the HTTP client")?,
    );

    let markup = load_source(source, remote, &fetcher)?;
    let entries = parse(&markup);
    tracing::info!(source, count = entries.len(), "listing parsed");

    let sort_key = args.sort.unwrap_or(config.general().sort());
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        config.general().direction()
    };
    let mut engine = SortFilterEngine::with_sort(sort_key, direction);
    engine.load(entries);

    if let Some(query) = args.query.as_deref() {
        settle_query(query, &mut engine);
    }

    print!("{}", render_listing(&engine, args.width));

    if let Some(name) = args.preview.as_deref() {
        let entry = engine
            .entries()
            .iter()
            .find(|e| e.name() == name)
            .with_context(|| format!("no entry named '{name}' in the listing"))?;

        let workers = Workers::spawn(fetcher);
        let mut slot = PreviewSlot::new();
        slot.open(entry, &workers)?;

        // the worker is bounded by the client timeout; leave it a little slack
        let deadline = Instant::now() + network.timeout() + Duration::from_secs(1);
        while slot.session().is_some_and(PreviewSession::is_loading) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match workers.response_rx().recv_timeout(remaining) {
                Ok(response) => {
                    slot.apply(response);
                }
                Err(_) => {
                    slot.close();
                    bail!("preview of '{name}' timed out");
                }
            }
        }

        if let Some(session) = slot.session() {
            println!();
            print!("{}", render_preview(session));
        }
    }
    Ok(())
}

fn load_source(source: &str, remote: bool, fetcher: &HttpFetcher) -> anyhow::Result<String> {
    if source == "-" {
        let mut markup = String::new();
        io::stdin()
            .read_to_string(&mut markup)
            .context("could not read the listing from stdin")?;
        return Ok(markup);
    }

    if remote {
        return fetcher
            .get_text(source)
            .with_context(|| format!("could not fetch listing '{source}'"));
    }

    let path = expand_home_path(source);
    fs::read_to_string(&path).with_context(|| format!("could not read listing {:?}", path))
}

/// Feeds a query through the search debounce the way an interactive front end would.
fn settle_query(query: &str, engine: &mut SortFilterEngine) {
    let mut search = SearchCoordinator::new();
    if search.input(query, Instant::now(), engine).is_some() {
        return;
    }
    if let Some(deadline) = search.deadline() {
        thread::sleep(deadline.saturating_duration_since(Instant::now()));
        search.tick(deadline.max(Instant::now()), engine);
    }
}
