use anyhow::Result;
use tinypomo_core::repository::DailyLogRepository;
use tinypomo_core::service::daily_log_service::DailyLogService;
use tinypomo_core::service::dto::WeeklyHistory;
use tinypomo_core::usecase::history::HistoryUseCase;
use tabled::{Table, Tabled};
use tabled::settings::{Style, Color, Modify};
use tabled::settings::object::Rows;

// Helper struct for Table Row
#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

pub fn show_history<L: DailyLogRepository>(daily_log_service: &DailyLogService<L>) -> Result<()> {
    let usecase = HistoryUseCase::new(daily_log_service);
    let histories = usecase.get_weekly_history()?;

    if histories.is_empty() {
        println!("No time logged yet.");
        return Ok(());
    }

    for week in &histories {
        println!("\n\x1b[1;36mWeek {}, {}\x1b[0m ({:.2}h)", week.week, week.year, week.total_hours);
        println!("{}", render_week(week));
    }
    println!("\nTotal: {:.2} hour(s)", usecase.total_hours()?);

    Ok(())
}

fn render_week(week: &WeeklyHistory) -> String {
    let rows: Vec<HistoryRow> = week.days.iter()
        .map(|day| HistoryRow {
            date: day.date.clone(),
            day: day.day_of_week.clone(),
            hours: format!("{:.2}", day.hours),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color

    table.to_string()
}
