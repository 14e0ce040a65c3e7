use crate::data::loader::ShotTable;
use crate::data::models::ShotRecord;
use serde::{Deserialize, Serialize};

/// User selection for a single query.
///
/// Empty sets and `None` mean "no constraint" on that dimension. A value
/// that does not occur in the table simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub competitions: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub player: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_competitions<I, S>(mut self, competitions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.competitions = competitions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seasons<I, S>(mut self, seasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seasons = seasons.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    /// Competition and season only, as used by the league-wide views.
    pub fn league_scope(&self) -> Self {
        FilterCriteria {
            competitions: self.competitions.clone(),
            seasons: self.seasons.clone(),
            team: None,
            player: None,
        }
    }

    /// Everything except the player, as used to populate the player list.
    pub fn team_scope(&self) -> Self {
        FilterCriteria {
            player: None,
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.competitions.is_empty()
            && self.seasons.is_empty()
            && self.team().is_none()
            && self.player().is_none()
    }

    pub fn team(&self) -> Option<&str> {
        self.team.as_deref().filter(|t| !t.is_empty())
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref().filter(|p| !p.is_empty())
    }
}

/// Rows of a [`ShotTable`] that satisfy a set of criteria, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    records: Vec<&'a ShotRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn all(table: &'a ShotTable) -> Self {
        FilteredView {
            records: table.records().iter().collect(),
        }
    }

    /// Narrow this view further.
    ///
    /// Predicates run competition, season, team, player; each one is
    /// skipped when its criterion is empty.
    pub fn refine(&self, criteria: &FilterCriteria) -> FilteredView<'a> {
        let mut records = self.records.clone();

        if !criteria.competitions.is_empty() {
            records.retain(|r| criteria.competitions.contains(&r.competition_name));
        }
        if !criteria.seasons.is_empty() {
            records.retain(|r| criteria.seasons.contains(&r.season_name));
        }
        if let Some(team) = criteria.team() {
            records.retain(|r| r.team_name == team);
        }
        if let Some(player) = criteria.player() {
            records.retain(|r| r.player_name == player);
        }

        FilteredView { records }
    }

    /// Goal rows only.
    pub fn goals(&self) -> FilteredView<'a> {
        FilteredView {
            records: self.records.iter().copied().filter(|r| r.goal).collect(),
        }
    }

    /// Non-goal rows only.
    pub fn misses(&self) -> FilteredView<'a> {
        FilteredView {
            records: self.records.iter().copied().filter(|r| !r.goal).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ShotRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn filter<'a>(table: &'a ShotTable, criteria: &FilterCriteria) -> FilteredView<'a> {
    let view = FilteredView::all(table).refine(criteria);
    tracing::debug!(
        matched = view.len(),
        total = table.len(),
        "applied shot filters"
    );
    view
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn shot(
        competition: &str,
        season: &str,
        team: &str,
        player: &str,
        goal: bool,
    ) -> ShotRecord {
        ShotRecord {
            competition_name: competition.to_string(),
            season_name: season.to_string(),
            team_name: team.to_string(),
            player_name: player.to_string(),
            x: 105.0,
            y: 40.0,
            goal,
            my_xg: 0.2,
        }
    }

    pub(crate) fn sample_table() -> ShotTable {
        ShotTable::new(vec![
            shot("La Liga", "2019/2020", "Barcelona", "Lionel Messi", true),
            shot("La Liga", "2019/2020", "Barcelona", "Luis Suárez", false),
            shot("La Liga", "2018/2019", "Real Madrid", "Karim Benzema", true),
            shot("Serie A", "2016/2017", "Napoli", "Dries Mertens", true),
            shot("La Liga", "2019/2020", "Barcelona", "Lionel Messi", false),
            shot("Serie A", "2016/2017", "Juventus", "Gonzalo Higuaín", false),
        ])
    }

    #[test]
    fn empty_criteria_is_identity() {
        let table = sample_table();
        let view = filter(&table, &FilterCriteria::new());
        assert_eq!(view.len(), table.len());
    }

    #[test]
    fn competition_membership() {
        let table = sample_table();
        let view = filter(
            &table,
            &FilterCriteria::new().with_competitions(["La Liga"]),
        );
        assert_eq!(view.len(), 4);
        assert!(view.iter().all(|r| r.competition_name == "La Liga"));
    }

    #[test]
    fn multiple_seasons_are_a_union() {
        let table = sample_table();
        let view = filter(
            &table,
            &FilterCriteria::new().with_seasons(["2018/2019", "2016/2017"]),
        );
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn criteria_combine_with_and() {
        let table = sample_table();
        let criteria = FilterCriteria::new()
            .with_competitions(["La Liga"])
            .with_seasons(["2019/2020"])
            .with_team("Barcelona")
            .with_player("Lionel Messi");
        let view = filter(&table, &criteria);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.player_name == "Lionel Messi"));
    }

    #[test]
    fn unknown_team_yields_empty_view() {
        let table = sample_table();
        let view = filter(&table, &FilterCriteria::new().with_team("Atlético Madrid"));
        assert!(view.is_empty());
    }

    #[test]
    fn empty_team_string_is_no_constraint() {
        let table = sample_table();
        let view = filter(&table, &FilterCriteria::new().with_team(""));
        assert_eq!(view.len(), table.len());
    }

    #[test]
    fn refine_is_idempotent() {
        let table = sample_table();
        let criteria = FilterCriteria::new().with_competitions(["Serie A"]);
        let once = filter(&table, &criteria);
        let twice = once.refine(&criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn view_keeps_table_order() {
        let table = sample_table();
        let view = filter(&table, &FilterCriteria::new().with_team("Barcelona"));
        let players: Vec<_> = view.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(players, vec!["Lionel Messi", "Luis Suárez", "Lionel Messi"]);
    }

    #[test]
    fn goals_and_misses_partition_the_view() {
        let table = sample_table();
        let view = filter(&table, &FilterCriteria::new());
        assert_eq!(view.goals().len() + view.misses().len(), view.len());
        assert!(view.goals().iter().all(|r| r.goal));
    }

    #[test]
    fn scopes_drop_downstream_criteria() {
        let criteria = FilterCriteria::new()
            .with_competitions(["La Liga"])
            .with_team("Barcelona")
            .with_player("Lionel Messi");
        let league = criteria.league_scope();
        assert!(league.team.is_none() && league.player.is_none());
        assert_eq!(league.competitions, vec!["La Liga".to_string()]);
        let team = criteria.team_scope();
        assert_eq!(team.team(), Some("Barcelona"));
        assert!(team.player().is_none());
    }
}
