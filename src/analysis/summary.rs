use super::filter::FilteredView;
use crate::data::models::Column;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const DEFAULT_TOP_SCORERS: usize = 7;

/// Placeholder returned when a selector has nothing to offer.
pub const EMPTY_OPTION: &str = "";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerRow {
    pub team: String,
    pub player: String,
    pub goals: usize,
}

/// Shots, goals and conversion for one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotSummary {
    pub shots: usize,
    pub goals: usize,
    /// `None` when the view is empty.
    pub goal_percentage: Option<f64>,
}

impl ShotSummary {
    pub fn from_view(view: &FilteredView) -> Self {
        ShotSummary {
            shots: count_shots(view),
            goals: count_goals(view),
            goal_percentage: goal_percentage(view).ok(),
        }
    }
}

pub fn count_shots(view: &FilteredView) -> usize {
    view.len()
}

pub fn count_goals(view: &FilteredView) -> usize {
    view.iter().filter(|r| r.goal).count()
}

/// Goals per hundred shots, rounded to two decimals with ties to even.
///
/// An empty view has no defined conversion rate and returns
/// [`AppError::EmptyResult`].
pub fn goal_percentage(view: &FilteredView) -> Result<f64, AppError> {
    let shots = count_shots(view);
    if shots == 0 {
        return Err(AppError::EmptyResult);
    }
    let pct = count_goals(view) as f64 / shots as f64 * 100.0;
    Ok((pct * 100.0).round_ties_even() / 100.0)
}

// Per-player goal tally, remembering first appearance
struct ScorerTally<'a> {
    team: &'a str,
    player: &'a str,
    goals: usize,
}

/// Leaderboard of the `n` players with most goals in the view.
///
/// Each player keeps the team of their first shot in the view. Players on
/// equal goals stay in order of first appearance.
pub fn top_scorers(view: &FilteredView, n: usize) -> Vec<ScorerRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<ScorerTally> = Vec::new();

    for record in view.iter() {
        let slot = *index.entry(record.player_name.as_str()).or_insert_with(|| {
            tallies.push(ScorerTally {
                team: &record.team_name,
                player: &record.player_name,
                goals: 0,
            });
            tallies.len() - 1
        });
        if record.goal {
            tallies[slot].goals += 1;
        }
    }

    // sort_by is stable, so ties keep first-appearance order
    tallies.sort_by(|a, b| b.goals.cmp(&a.goals));
    tallies.truncate(n);

    tallies
        .into_iter()
        .map(|t| ScorerRow {
            team: t.team.to_string(),
            player: t.player.to_string(),
            goals: t.goals,
        })
        .collect()
}

/// Distinct values of `column` in order of first appearance, or the single
/// placeholder `[""]` for an empty view.
pub fn distinct_options(view: &FilteredView, column: Column) -> Vec<String> {
    if view.is_empty() {
        return vec![EMPTY_OPTION.to_string()];
    }

    let mut seen = HashSet::new();
    view.iter()
        .map(|r| column.value(r))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::filter::tests::{sample_table, shot};
    use crate::analysis::filter::{filter, FilterCriteria};
    use crate::data::loader::ShotTable;

    #[test]
    fn la_liga_scenario() {
        let table = ShotTable::new(vec![
            shot("La Liga", "2019/2020", "Barcelona", "A", true),
            shot("La Liga", "2019/2020", "Barcelona", "B", false),
            shot("Serie A", "2019/2020", "Napoli", "A", true),
        ]);
        let view = filter(&table, &FilterCriteria::new().with_competitions(["La Liga"]));
        assert_eq!(count_shots(&view), 2);
        assert_eq!(count_goals(&view), 1);
        assert_eq!(goal_percentage(&view).unwrap(), 50.0);
    }

    #[test]
    fn percentage_of_empty_view_is_an_error() {
        let table = sample_table();
        let view = filter(&table, &FilterCriteria::new().with_team("Nobody FC"));
        assert_eq!(count_shots(&view), 0);
        assert!(matches!(goal_percentage(&view), Err(AppError::EmptyResult)));

        let summary = ShotSummary::from_view(&view);
        assert_eq!(summary.shots, 0);
        assert!(summary.goal_percentage.is_none());
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        let table = ShotTable::new(vec![
            shot("La Liga", "2019/2020", "Barcelona", "A", true),
            shot("La Liga", "2019/2020", "Barcelona", "A", false),
            shot("La Liga", "2019/2020", "Barcelona", "A", false),
        ]);
        let view = filter(&table, &FilterCriteria::new());
        assert_eq!(goal_percentage(&view).unwrap(), 33.33);
    }

    #[test]
    fn percentage_ties_round_to_even() {
        let mut records = vec![shot("La Liga", "2019/2020", "Barcelona", "A", true)];
        records.extend((0..31).map(|_| shot("La Liga", "2019/2020", "Barcelona", "A", false)));
        let table = ShotTable::new(records);
        let view = filter(&table, &FilterCriteria::new());
        // 1/32 is exactly 3.125%
        assert_eq!(goal_percentage(&view).unwrap(), 3.12);
    }

    #[test]
    fn top_scorers_sorted_and_truncated() {
        let table = ShotTable::new(vec![
            shot("La Liga", "2019/2020", "Barcelona", "Messi", true),
            shot("La Liga", "2019/2020", "Real Madrid", "Benzema", true),
            shot("La Liga", "2019/2020", "Barcelona", "Messi", true),
            shot("La Liga", "2019/2020", "Sevilla", "En-Nesyri", false),
            shot("La Liga", "2019/2020", "Real Madrid", "Benzema", false),
        ]);
        let view = filter(&table, &FilterCriteria::new());
        let rows = top_scorers(&view, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player, "Messi");
        assert_eq!(rows[0].goals, 2);
        assert_eq!(rows[1].player, "Benzema");
        assert_eq!(rows[1].goals, 1);
    }

    #[test]
    fn ties_keep_first_appearance() {
        let table = ShotTable::new(vec![
            shot("Serie A", "2016/2017", "Torino", "Belotti", true),
            shot("Serie A", "2016/2017", "Napoli", "Mertens", true),
            shot("Serie A", "2016/2017", "Roma", "Dzeko", true),
        ]);
        let view = filter(&table, &FilterCriteria::new());
        let players: Vec<_> = top_scorers(&view, DEFAULT_TOP_SCORERS)
            .into_iter()
            .map(|r| r.player)
            .collect();
        assert_eq!(players, vec!["Belotti", "Mertens", "Dzeko"]);
    }

    #[test]
    fn scorer_keeps_first_team() {
        let table = ShotTable::new(vec![
            shot("Serie A", "2016/2017", "Napoli", "Higuaín", false),
            shot("Serie A", "2017/2018", "Juventus", "Higuaín", true),
        ]);
        let view = filter(&table, &FilterCriteria::new());
        let rows = top_scorers(&view, 7);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team, "Napoli");
        assert_eq!(rows[0].goals, 1);
    }

    #[test]
    fn distinct_options_in_first_seen_order() {
        let table = sample_table();
        let view = filter(&table, &FilterCriteria::new());
        assert_eq!(
            distinct_options(&view, Column::Competition),
            vec!["La Liga".to_string(), "Serie A".to_string()]
        );
        assert_eq!(
            distinct_options(&view, Column::Team),
            vec!["Barcelona", "Real Madrid", "Napoli", "Juventus"]
        );
    }

    #[test]
    fn distinct_options_of_empty_view_is_placeholder() {
        let table = sample_table();
        let view = filter(&table, &FilterCriteria::new().with_player("Nobody"));
        assert_eq!(distinct_options(&view, Column::Player), vec![String::new()]);
    }
}
