use super::filter::{filter, FilterCriteria, FilteredView};
use super::summary::distinct_options;
use crate::data::loader::ShotTable;
use crate::data::models::Column;
use serde::Serialize;

/// How far down the competition → team → player chain a selection goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionStage {
    Unfiltered,
    League,
    Team,
    Player,
}

impl SelectionStage {
    pub fn of(criteria: &FilterCriteria) -> Self {
        if criteria.player().is_some() {
            SelectionStage::Player
        } else if criteria.team().is_some() {
            SelectionStage::Team
        } else if criteria.is_empty() {
            SelectionStage::Unfiltered
        } else {
            SelectionStage::League
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SelectionStage::Unfiltered => "no filters",
            SelectionStage::League => "competition/season",
            SelectionStage::Team => "competition/season + team",
            SelectionStage::Player => "competition/season + team + player",
        }
    }
}

/// Option lists for every selector given the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorOptions {
    pub stage: SelectionStage,
    pub competitions: Vec<String>,
    pub seasons: Vec<String>,
    pub teams: Vec<String>,
    pub players: Vec<String>,
}

impl SelectorOptions {
    /// Recompute every dependent list from scratch.
    ///
    /// Teams are narrowed by competition and season; players additionally by
    /// team. A narrowing that leaves no rows yields `[""]`.
    pub fn compute(table: &ShotTable, criteria: &FilterCriteria) -> Self {
        let everything = FilteredView::all(table);
        let league = filter(table, &criteria.league_scope());
        let team = league.refine(&criteria.team_scope());

        SelectorOptions {
            stage: SelectionStage::of(criteria),
            competitions: distinct_options(&everything, Column::Competition),
            seasons: distinct_options(&everything, Column::Season),
            teams: distinct_options(&league, Column::Team),
            players: distinct_options(&team, Column::Player),
        }
    }
}
