pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod report;
pub mod scrape;
pub mod services;
pub mod ties;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use log::warn;
use std::path::PathBuf;

use crate::cache::FileStore;
use crate::cli::{Command, SourceArgs};
use crate::config::{is_timed_sport, timed_sports, AppConfig};
use crate::http::{Fetcher, PageFetcher};
use crate::scrape::PageCache;
use crate::services::{ScheduleService, TieService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command.unwrap_or_default()
}

pub fn handle_ties(source: &SourceArgs, output: Option<PathBuf>) -> Result<()> {
    let config = build_config(source).with_output(output);
    let service = TieService::new(&config)?;

    with_pages(source, &config, |mut pages| async move {
        let result = service.run(&source.sport, &mut pages).await;
        (pages, result.map(|_| ()))
    })
}

pub fn handle_schedule(source: &SourceArgs, json: bool) -> Result<()> {
    let config = build_config(source);
    let service = ScheduleService::new(&config)?;

    with_pages(source, &config, |mut pages| async move {
        let result = service.run(&source.sport, &mut pages).await.and_then(|schedule| {
            if json {
                println!("{}", serde_json::to_string_pretty(&schedule)?);
            } else {
                println!("{}", ScheduleService::describe(&schedule));
            }
            Ok(())
        });
        (pages, result)
    })
}

pub fn handle_sports() -> Result<()> {
    for sport in timed_sports() {
        println!("{}", sport);
    }
    Ok(())
}

fn build_config(source: &SourceArgs) -> AppConfig {
    if !is_timed_sport(&source.sport) {
        warn!("'{}' is not one of the timed sports", source.sport);
    }

    AppConfig::new()
        .with_games(source.games.clone())
        .with_webdriver_url(source.webdriver_url.clone())
}

/// Run `work` against file-backed caches and the chosen fetcher on a
/// single-threaded runtime, closing the fetch session whatever the outcome
fn with_pages<W, Fut>(source: &SourceArgs, config: &AppConfig, work: W) -> Result<()>
where
    W: FnOnce(PageCache<Fetcher, FileStore>) -> Fut,
    Fut: std::future::Future<Output = (PageCache<Fetcher, FileStore>, Result<()>)>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(async {
        let fetcher = Fetcher::new(source.fetcher, &config.scraper)?;
        let pages = PageCache::new(
            fetcher,
            FileStore::open(&config.cache.schedule_path)?,
            FileStore::open(&config.cache.results_path)?,
        );

        let (pages, result) = work(pages).await;
        let (mut fetcher, _, _) = pages.into_parts();
        fetcher.close().await?;
        result
    })
}
