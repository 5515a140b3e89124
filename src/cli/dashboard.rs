use super::{chart, ui};
use crate::core::history::RateHistory;
use crate::core::{DashboardData, DashboardSource, Render, Screen};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use std::sync::Arc;

const GAUGE_WIDTH: usize = 30;

/// Builds the full dashboard text for a settled fetch cycle.
pub fn render_dashboard(
    data: &DashboardData,
    progress: Option<f64>,
    display_name: Option<&str>,
    today: NaiveDate,
) -> String {
    let rates = &data.rates;
    let summary = &data.summary;

    let greeting = match display_name {
        Some(name) => format!("Hello, {name}"),
        None => "Hello".to_string(),
    };
    let mut output = format!(
        "{}\n{}\n\n",
        ui::style_text(&greeting, ui::StyleType::Title),
        ui::style_text(
            &format!("Today is {}", today.format("%B %-d, %Y")),
            ui::StyleType::Subtle
        )
    );

    output.push_str(&ui::style_text("Financial summary", ui::StyleType::Heading));
    output.push_str("\n\n  ");
    match progress {
        Some(ratio) => output.push_str(&ui::progress_gauge(ratio, GAUGE_WIDTH)),
        None => output.push_str(&ui::style_text("N/A", ui::StyleType::Subtle)),
    }
    output.push_str(&format!(
        "\n  Current balance: {}\n\n",
        ui::style_text(&ui::format_money(summary.balance), ui::StyleType::Highlight)
    ));

    let mut cards = ui::new_styled_table();
    cards.add_row(vec![
        ui::label_cell("USD"),
        ui::value_cell(&rates.usd.to_string()),
        ui::label_cell("EUR"),
        ui::value_cell(&rates.eur.to_string()),
    ]);
    cards.add_row(vec![
        ui::label_cell("Income"),
        ui::value_cell(&ui::format_money(summary.income)),
        ui::label_cell("Expenses"),
        ui::value_cell(&ui::format_money(summary.expenses)),
    ]);
    output.push_str(&cards.to_string());

    output.push_str("\n\n");
    output.push_str(&ui::style_text("Exchange rate history", ui::StyleType::Heading));
    output.push_str("\n\n");
    output.push_str(&chart::render_history(&RateHistory::with_today(rates)));

    output
}

/// Activates the dashboard, waits for its single fetch cycle and prints it.
pub async fn run(
    source: Arc<dyn DashboardSource + Send + Sync>,
    display_name: Option<&str>,
) -> Result<()> {
    let mut screen = Screen::activate(source);

    let spinner = ui::new_spinner("Loading financial data...");
    screen.settled().await;
    spinner.finish_and_clear();

    match screen.render() {
        Render::Ready { data, progress } => {
            let today = chrono::Local::now().date_naive();
            println!(
                "{}",
                render_dashboard(&data, progress, display_name, today)
            );
            Ok(())
        }
        Render::Failed(e) => Err(anyhow!("Could not load financial data: {e}")),
        Render::Loading => Err(anyhow!("Dashboard fetch ended without a result")),
    }
}
