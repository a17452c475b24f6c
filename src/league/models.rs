use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::wire::{RawDecimal, RawGame, RawRecord, RawScore, RawScoreboard, RawStandings, RawTeam, RawTeamRef};
use super::LeagueError;

/// Overall win/loss record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
}

impl Record {
    pub fn new(wins: u32, losses: u32) -> Self {
        Record { wins, losses }
    }

    /// `wins / (wins + losses)`, or `None` for a team that has not played.
    pub fn win_pct(&self) -> Option<f64> {
        let played = u64::from(self.wins) + u64::from(self.losses);
        if played == 0 {
            return None;
        }
        Some(self.wins as f64 / played as f64)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Record::new(raw.wins, raw.losses)
    }
}

/// A team as listed in the league standings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Option<i64>,
    pub name: String,
    pub record: Record,
    /// Season points scored
    pub points_for: f64,
    /// Positive = consecutive wins, negative = consecutive losses
    pub streak: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: Option<i64>,
    pub name: String,
    pub teams: Vec<Team>,
}

/// League standings as fetched from one upstream response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsSnapshot {
    pub divisions: Vec<Division>,
    pub fetched_at: DateTime<Utc>,
}

impl StandingsSnapshot {
    pub fn from_json(value: serde_json::Value, fetched_at: DateTime<Utc>) -> Result<Self, LeagueError> {
        let raw: RawStandings = serde_json::from_value(value)
            .map_err(|e| LeagueError::MalformedPayload(format!("standings: {}", e)))?;
        Self::from_raw(raw, fetched_at)
    }

    pub fn from_raw(raw: RawStandings, fetched_at: DateTime<Utc>) -> Result<Self, LeagueError> {
        let divisions = raw
            .divisions
            .into_iter()
            .map(|div| -> Result<Division, LeagueError> {
                let name = div.name.unwrap_or_default();
                let teams = div
                    .teams
                    .into_iter()
                    .enumerate()
                    .map(|(idx, team)| team_from_raw(team, &name, idx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Division { id: div.id, name, teams })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StandingsSnapshot { divisions, fetched_at })
    }

    /// All teams across divisions, in division order then listing order.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.divisions.iter().flat_map(|d| d.teams.iter())
    }
}

fn team_from_raw(raw: RawTeam, division: &str, idx: usize) -> Result<Team, LeagueError> {
    let name = raw.name.ok_or_else(|| {
        LeagueError::MalformedPayload(format!(
            "team #{} in division '{}' has no name",
            idx, division
        ))
    })?;
    Ok(Team {
        id: raw.id,
        name,
        record: raw.record_overall.into(),
        points_for: raw.points_for.value.unwrap_or(0.0),
        streak: raw.streak.value.unwrap_or(0.0).round() as i32,
    })
}

/// Name and record of a team as it appears on the scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: Option<i64>,
    pub name: String,
    pub record: Record,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideScore {
    /// Dropped by the upstream when the score is zero
    pub value: Option<f64>,
    /// Upstream display string, e.g. "112.48"
    pub formatted: Option<String>,
}

impl SideScore {
    /// The numeric value, else the display string parsed.
    pub fn reported(&self) -> Option<f64> {
        self.value.or_else(|| {
            self.formatted
                .as_deref()
                .and_then(|f| f.trim().replace(',', "").parse().ok())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSide {
    pub team: TeamRef,
    /// Absent until the upstream reports a value for this side
    pub score: Option<SideScore>,
    /// Roster players whose games have not finished
    pub yet_to_play: u32,
}

impl GameSide {
    /// Points from the numeric `value` only.
    pub fn points(&self) -> Option<f64> {
        self.score.as_ref().and_then(|s| s.value)
    }

    /// Points as displayed, so a zero score with only `formatted` counts.
    pub fn reported_points(&self) -> Option<f64> {
        self.score.as_ref().and_then(SideScore::reported)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// One head-to-head matchup of the current scoring period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: Option<i64>,
    pub home: GameSide,
    pub away: GameSide,
    pub in_progress: bool,
}

impl Game {
    /// `(home, away)` points when both sides have a score.
    pub fn scores(&self) -> Option<(f64, f64)> {
        Some((self.home.points()?, self.away.points()?))
    }

    /// Winning side by strict comparison. A tie reports `Away`, the same
    /// side every consumer attributes a level game to.
    pub fn leader(&self) -> Option<Side> {
        let (home, away) = self.scores()?;
        Some(if home > away { Side::Home } else { Side::Away })
    }

    /// `(winner, loser)` sides, see [`Game::leader`].
    pub fn winner_and_loser(&self) -> Option<(&GameSide, &GameSide)> {
        match self.leader()? {
            Side::Home => Some((&self.home, &self.away)),
            Side::Away => Some((&self.away, &self.home)),
        }
    }
}

/// The current scoring period's games.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardSnapshot {
    pub games: Vec<Game>,
    pub fetched_at: DateTime<Utc>,
}

impl ScoreboardSnapshot {
    pub fn from_json(value: serde_json::Value, fetched_at: DateTime<Utc>) -> Result<Self, LeagueError> {
        let raw: RawScoreboard = serde_json::from_value(value)
            .map_err(|e| LeagueError::MalformedPayload(format!("scoreboard: {}", e)))?;
        Self::from_raw(raw, fetched_at)
    }

    pub fn from_raw(raw: RawScoreboard, fetched_at: DateTime<Utc>) -> Result<Self, LeagueError> {
        let games = raw
            .games
            .into_iter()
            .enumerate()
            .map(|(idx, game)| game_from_raw(game, idx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScoreboardSnapshot { games, fetched_at })
    }
}

fn game_from_raw(raw: RawGame, idx: usize) -> Result<Game, LeagueError> {
    let home = side_from_raw(raw.home, raw.home_score, idx, "home")?;
    let away = side_from_raw(raw.away, raw.away_score, idx, "away")?;
    Ok(Game {
        id: raw.id,
        home,
        away,
        in_progress: raw.is_in_progress,
    })
}

fn side_from_raw(
    team: Option<RawTeamRef>,
    score: Option<RawScore>,
    idx: usize,
    label: &str,
) -> Result<GameSide, LeagueError> {
    let team = team.ok_or_else(|| {
        LeagueError::MalformedPayload(format!("game #{} has no {} team", idx, label))
    })?;
    let name = team.name.ok_or_else(|| {
        LeagueError::MalformedPayload(format!("game #{} {} team has no name", idx, label))
    })?;

    let (score, yet_to_play) = match score {
        Some(RawScore { score, yet_to_play }) => (score.and_then(side_score), yet_to_play),
        None => (None, 0),
    };

    Ok(GameSide {
        team: TeamRef {
            id: team.id,
            name,
            record: team.record_overall.into(),
        },
        score,
        yet_to_play,
    })
}

fn side_score(raw: RawDecimal) -> Option<SideScore> {
    if raw.value.is_none() && raw.formatted.is_none() {
        return None;
    }
    Some(SideScore {
        value: raw.value,
        formatted: raw.formatted,
    })
}
