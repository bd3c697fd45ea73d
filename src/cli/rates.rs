use super::ui;
use crate::core::config::AppConfig;
use crate::core::{DayOutcome, FilteredResult};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tracing::warn;

/// Fetches the last `days` days, then prints the EUR/USD rates as indented JSON.
pub async fn run(days: i64, config: &AppConfig) -> Result<()> {
    let output = render_rates(days, config, Local::now().date_naive()).await?;
    println!("{output}");
    Ok(())
}

/// Everything `run` does except printing: the returned string is the stdout payload.
pub async fn render_rates(days: i64, config: &AppConfig, today: NaiveDate) -> Result<String> {
    let fetcher = crate::rate_fetcher(config);
    let dates = fetcher.dates_for(today, days);

    let pb = ui::new_progress_bar(dates.len() as u64)?;
    let (outcomes, result) = crate::collect_rates(&fetcher, &dates, &|| pb.inc(1)).await;
    pb.finish_and_clear();

    report_failures(&outcomes);

    if result.is_empty() && !dates.is_empty() {
        eprintln!(
            "{}",
            ui::style_text(
                "No EUR/USD rates found for the requested days.",
                ui::StyleType::Subtle
            )
        );
    }

    render_json(&result)
}

pub fn render_json(result: &FilteredResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize exchange rates")
}

fn report_failures(outcomes: &[DayOutcome]) {
    let failed: Vec<String> = outcomes
        .iter()
        .filter(|o| o.error().is_some())
        .map(|o| o.date().to_string())
        .collect();
    if failed.is_empty() {
        return;
    }

    warn!(days = ?failed, "Some days could not be fetched and are left out");
    eprintln!(
        "{}",
        ui::style_text(
            &format!(
                "{} of {} days could not be fetched: {}",
                failed.len(),
                outcomes.len(),
                failed.join(", ")
            ),
            ui::StyleType::Error
        )
    );
}
