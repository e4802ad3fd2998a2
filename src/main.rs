mod compare;
mod config;
mod error;
mod source;
mod types;
mod workbook;

use std::path::Path;

use chrono::{Days, Local};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::compare::{compare_snapshots, Delta};
use crate::config::{Config, BOARD_GROUPS};
use crate::error::Result;
use crate::source::{FetchStats, RankingSource};
use crate::types::DailySnapshot;
use crate::workbook::{
    comparison_path, rankings_path, read_rankings, write_comparison, write_rankings,
};

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let out_dir = Path::new(&cfg.output_dir);
    std::fs::create_dir_all(out_dir)?;

    // --- Snapshot acquisition: one board group at a time, fully sequential ---
    let source = RankingSource::new(&cfg)?;
    let mut stats = FetchStats::default();
    let mut sheets = Vec::with_capacity(BOARD_GROUPS.len());

    for group in BOARD_GROUPS {
        info!("Scraping {} ({})", group.country, group.platform);
        let sheet = source.fetch_board_group(group, cfg.top_n, &mut stats).await;
        info!(
            "{}: free={} paid={} grossing={}",
            sheet.country,
            sheet.free.len(),
            sheet.paid.len(),
            sheet.grossing.len(),
        );
        sheets.push(sheet);
    }

    info!(
        "Acquisition complete: {} pages fetched, {} failed, {} items parsed \
         (dropped: no_rank={} no_name={}), {} empty boards",
        stats.pages_fetched,
        stats.pages_failed,
        stats.items_parsed,
        stats.dropped_no_rank,
        stats.dropped_no_name,
        stats.empty_boards,
    );

    let today = Local::now().date_naive();
    let snapshot = DailySnapshot { sheets };
    let today_path = rankings_path(out_dir, today);
    write_rankings(&snapshot, &today_path)?;
    info!("Rankings saved: {}", today_path.display());

    // --- Delta computation against yesterday's file ---
    let yesterday = today - Days::new(1);
    let prev_path = rankings_path(out_dir, yesterday);
    let Some(previous) = read_rankings(&prev_path)? else {
        info!(
            "No snapshot for yesterday at {} — skipping comparison",
            prev_path.display(),
        );
        return Ok(());
    };

    let report = compare_snapshots(&snapshot, &previous);
    if report.is_empty() {
        info!("Nothing comparable between today and yesterday — comparison not written");
        return Ok(());
    }

    for country in &report.countries {
        let rows: usize = country.categories.iter().map(|c| c.rows.len()).sum();
        let new_count = country
            .categories
            .iter()
            .flat_map(|c| c.rows.iter())
            .filter(|r| r.delta == Delta::New)
            .count();
        info!(
            "{}: {} boards compared, {} rows, {} new entries",
            country.country,
            country.categories.len(),
            rows,
            new_count,
        );
    }

    let cmp_path = comparison_path(out_dir, today);
    write_comparison(&report, &cmp_path)?;
    info!(
        "Comparison saved: {} ({} countries, {} boards, {} rows)",
        cmp_path.display(),
        report.countries.len(),
        report.board_count(),
        report.row_count(),
    );

    Ok(())
}
