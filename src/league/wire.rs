//! Serde mirror of the Fleaflicker JSON payloads.
//!
//! Fleaflicker drops zero-valued numbers from its responses (an 0-3 team has
//! no `wins` key at all), so every numeric field defaults instead of failing.
//! Presence checks that matter (team names, score values) are left as
//! `Option` and enforced in [`super::models`].

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStandings {
    #[serde(default)]
    pub divisions: Vec<RawDivision>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDivision {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(default)]
    pub teams: Vec<RawTeam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTeam {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(default)]
    pub record_overall: RawRecord,
    #[serde(default)]
    pub points_for: RawDecimal,
    #[serde(default)]
    pub streak: RawDecimal,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

/// `{ "value": 1234.5, "formatted": "1,234.5" }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDecimal {
    pub value: Option<f64>,
    pub formatted: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScoreboard {
    #[serde(default)]
    pub games: Vec<RawGame>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGame {
    pub id: Option<i64>,
    pub home: Option<RawTeamRef>,
    pub away: Option<RawTeamRef>,
    pub home_score: Option<RawScore>,
    pub away_score: Option<RawScore>,
    #[serde(default)]
    pub is_in_progress: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTeamRef {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(default)]
    pub record_overall: RawRecord,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScore {
    pub score: Option<RawDecimal>,
    #[serde(default)]
    pub yet_to_play: u32,
}
