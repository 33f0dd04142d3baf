use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Timestamp layout written to the sheet. Lexicographic order is chronological.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Team {
    Brand,
    Meat,
    Business,
}

impl Team {
    /// Fixed endpoint iteration order.
    pub const ALL: [Team; 3] = [Team::Brand, Team::Meat, Team::Business];

    /// Label shown to staff and stored in the sheet.
    pub fn label(&self) -> &'static str {
        match self {
            Team::Brand => "브랜드",
            Team::Meat => "육가공",
            Team::Business => "사업관리",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Team::Brand => "Brand",
            Team::Meat => "Meat",
            Team::Business => "Business",
        }
    }

    /// Key under `[storage.endpoints]` in the secrets file.
    pub fn config_key(&self) -> &'static str {
        match self {
            Team::Brand => "brand",
            Team::Meat => "meat",
            Team::Business => "business",
        }
    }

    /// Accepts the English name (any case) or the Korean label.
    pub fn from_label(label: &str) -> Option<Team> {
        let label = label.trim();
        Team::ALL
            .into_iter()
            .find(|t| t.label() == label || t.name().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One saved analysis, exactly as it lives in a team's sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub directive: String,
    #[serde(default)]
    pub analysis: String,
}

impl AnalysisRecord {
    /// Builds a record stamped with the current local time.
    pub fn new(team: &str, directive: &str, analysis: &str) -> Self {
        Self {
            team: team.to_string(),
            timestamp: now_timestamp(),
            directive: directive.to_string(),
            analysis: analysis.to_string(),
        }
    }

    /// Builds a record from one sheet row. Cells that are not strings are
    /// stringified; a row that is not an object yields `None`.
    pub fn from_row(row: &Value) -> Option<Self> {
        let cells = row.as_object()?;
        let cell = |key: &str| match cells.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        Some(Self {
            team: cell("team"),
            timestamp: cell("timestamp"),
            directive: cell("directive"),
            analysis: cell("analysis"),
        })
    }

    pub fn resolved_team(&self) -> Option<Team> {
        Team::from_label(&self.team)
    }
}

pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
