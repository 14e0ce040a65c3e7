use crate::analysis::cascade::SelectorOptions;
use crate::analysis::filter::{filter, FilterCriteria};
use crate::analysis::summary::{top_scorers, ScorerRow, ShotSummary};
use crate::data::loader::ShotTable;
use crate::error::AppError;
use crate::render::{heatmap, shotmap};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the dashboard shows for one selection, as a JSON document.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub criteria: FilterCriteria,
    pub summary: ShotSummary,
    /// Cards shown next to the leaderboard, competition and season only.
    pub league_summary: ShotSummary,
    pub top_scorers: Vec<ScorerRow>,
    pub options: SelectorOptions,
    pub heatmap: String,
    pub shot_map: String,
}

impl DashboardReport {
    /// Summary and shot map follow the full criteria; the league summary,
    /// leaderboard and heatmap only look at competition and season.
    pub fn build(
        table: &ShotTable,
        criteria: &FilterCriteria,
        top_n: usize,
        bins: usize,
    ) -> Result<Self, AppError> {
        let view = filter(table, criteria);
        let league = filter(table, &criteria.league_scope());

        Ok(DashboardReport {
            generated_at: Utc::now(),
            criteria: criteria.clone(),
            summary: ShotSummary::from_view(&view),
            league_summary: ShotSummary::from_view(&league),
            top_scorers: top_scorers(&league, top_n),
            options: SelectorOptions::compute(table, criteria),
            heatmap: heatmap::heatmap(&league, bins)?.data_uri,
            shot_map: shotmap::shot_map(&view)?.data_uri,
        })
    }

    pub fn get_report_path(output_dir: &Path) -> PathBuf {
        let _ = fs::create_dir_all(output_dir);
        output_dir.join(format!("report_{}.json", Utc::now().format("%Y%m%d_%H%M%S")))
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize report: {}", e)))
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)
            .map_err(|e| AppError::IoError(format!("Failed to write report: {}", e)))?;
        tracing::info!(path = %path.display(), "report saved");
        Ok(())
    }
}
