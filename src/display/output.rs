use crate::analysis::cascade::SelectorOptions;
use crate::analysis::filter::FilterCriteria;
use crate::analysis::summary::{ScorerRow, ShotSummary};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct SummaryRow {
    shots: String,
    goals: String,
    #[tabled(rename = "goal %")]
    goal_percentage: String,
}

#[derive(Tabled)]
struct LeaderboardRow {
    #[tabled(rename = "#")]
    rank: String,
    team: String,
    player: String,
    goals: String,
}

#[derive(Tabled)]
struct OptionRow {
    selector: String,
    options: String,
}

fn header(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
}

pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{:.2}%", pct),
        None => "n/a".to_string(),
    }
}

pub fn describe_criteria(criteria: &FilterCriteria) -> String {
    let mut parts = Vec::new();
    if !criteria.competitions.is_empty() {
        parts.push(criteria.competitions.join(", "));
    }
    if !criteria.seasons.is_empty() {
        parts.push(criteria.seasons.join(", "));
    }
    if let Some(team) = criteria.team() {
        parts.push(team.to_string());
    }
    if let Some(player) = criteria.player() {
        parts.push(player.to_string());
    }
    if parts.is_empty() {
        "all shots".to_string()
    } else {
        parts.join(" / ")
    }
}

pub fn display_summary(summary: &ShotSummary, criteria: &FilterCriteria) {
    header(&format!("⚽ Shot Summary ({})", describe_criteria(criteria)));

    let rows = vec![SummaryRow {
        shots: summary.shots.to_string(),
        goals: summary.goals.to_string().green().to_string(),
        goal_percentage: format_percentage(summary.goal_percentage),
    }];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);

    if summary.shots == 0 {
        println!("{}\n", "No shots match these filters".yellow());
    }
}

pub fn display_top_scorers(scorers: &[ScorerRow], criteria: &FilterCriteria) {
    header(&format!("🏆 Top Scorers ({})", describe_criteria(criteria)));

    if scorers.is_empty() {
        println!("{}", "No goals scored in this selection".yellow());
        return;
    }

    let rows: Vec<LeaderboardRow> = scorers
        .iter()
        .enumerate()
        .map(|(idx, row)| LeaderboardRow {
            rank: format!("#{}", idx + 1),
            team: row.team.clone(),
            player: row.player.clone(),
            goals: row.goals.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if let Some(top) = scorers.first() {
        println!(
            "\n{} {} ({}) with {} goals\n",
            "Leader:".bold().yellow(),
            top.player,
            top.team,
            top.goals
        );
    }
}

pub fn display_options(options: &SelectorOptions) {
    header(&format!("🔎 Selector Options ({})", options.stage.label()));

    let render = |values: &[String]| {
        if values.iter().all(|v| v.is_empty()) {
            "(none)".dimmed().to_string()
        } else {
            values.join(", ")
        }
    };

    let rows = vec![
        OptionRow {
            selector: "competition".to_string(),
            options: render(&options.competitions),
        },
        OptionRow {
            selector: "season".to_string(),
            options: render(&options.seasons),
        },
        OptionRow {
            selector: "team".to_string(),
            options: render(&options.teams),
        },
        OptionRow {
            selector: "player".to_string(),
            options: render(&options.players),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
