use serde::{Deserialize, Deserializer, Serialize};

/// StatsBomb pitch length (X axis).
pub const PITCH_LENGTH: f64 = 120.0;
/// StatsBomb pitch width (Y axis).
pub const PITCH_WIDTH: f64 = 80.0;

/// Columns every shot CSV must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "competition_name",
    "season_name",
    "team_name",
    "player_name",
    "X",
    "Y",
    "Goal",
    "my_xg",
];

// One row of the shot export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub competition_name: String,
    pub season_name: String,
    pub team_name: String,
    pub player_name: String,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Goal", deserialize_with = "deserialize_goal")]
    pub goal: bool,
    pub my_xg: f64,
}

impl ShotRecord {
    pub fn on_pitch(&self) -> bool {
        (0.0..=PITCH_LENGTH).contains(&self.x) && (0.0..=PITCH_WIDTH).contains(&self.y)
    }

    /// Marker area in points squared, matching the xG shot map scale.
    pub fn marker_area(&self) -> f64 {
        self.my_xg.clamp(0.0, 1.0) * 1900.0 + 100.0
    }
}

/// Categorical columns that can populate a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Competition,
    Season,
    Team,
    Player,
}

impl Column {
    pub fn value<'a>(&self, record: &'a ShotRecord) -> &'a str {
        match self {
            Column::Competition => &record.competition_name,
            Column::Season => &record.season_name,
            Column::Team => &record.team_name,
            Column::Player => &record.player_name,
        }
    }
}

// pandas writes booleans as True/False
fn deserialize_goal<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "True" | "true" | "TRUE" | "1" => Ok(true),
        "False" | "false" | "FALSE" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid Goal value '{}'",
            other
        ))),
    }
}
