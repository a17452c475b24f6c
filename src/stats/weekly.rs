//! Weekly superlatives derived from the scoreboard ("Hall of Infamy").
//!
//! Every scan runs in game order and skips sides or games whose scores are
//! not reported yet. Empty inputs yield `None` rather than a placeholder.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::league::models::{Game, GameSide, ScoreboardSnapshot};

/// One team's score for the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScore {
    pub team: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
}

impl TeamScore {
    fn from_side(side: &GameSide, with_record: bool) -> Option<Self> {
        Some(TeamScore {
            team: side.team.name.clone(),
            score: side.points()?,
            record: with_record.then(|| side.team.record.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosestGame {
    pub winner: TeamScore,
    pub loser: TeamScore,
    pub margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Upset {
    pub winner: TeamScore,
    pub loser: TeamScore,
}

/// The four weekly superlatives. Each is `None` when no game qualifies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallOfInfamy {
    pub fetched_at: DateTime<Utc>,
    pub high_score: Option<TeamScore>,
    pub closest_game: Option<ClosestGame>,
    pub biggest_upset: Option<Upset>,
    pub lowest_score: Option<TeamScore>,
}

/// Flatten games into per-team scores, home side first. Sides without a
/// reported score are left out.
pub fn extract_weekly_scores(games: &[Game]) -> Vec<TeamScore> {
    games
        .iter()
        .flat_map(|g| [&g.home, &g.away])
        .filter_map(|side| TeamScore::from_side(side, true))
        .collect()
}

/// Highest score; the first of equal scores wins.
pub fn find_high_score(scores: &[TeamScore]) -> Option<&TeamScore> {
    scores
        .iter()
        .reduce(|best, s| if s.score > best.score { s } else { best })
}

/// Lowest score; the first of equal scores wins.
pub fn find_lowest_score(scores: &[TeamScore]) -> Option<&TeamScore> {
    scores
        .iter()
        .reduce(|best, s| if s.score < best.score { s } else { best })
}

/// Game with the smallest margin among games with both scores present.
/// The first of equally close games is kept.
pub fn find_closest_game(games: &[Game]) -> Option<ClosestGame> {
    let mut closest: Option<ClosestGame> = None;

    for game in games {
        let Some((home, away)) = game.scores() else {
            continue;
        };
        let margin = (home - away).abs();
        if closest.as_ref().map_or(true, |c| margin < c.margin) {
            if let Some((winner, loser)) = game.winner_and_loser() {
                closest = Some(ClosestGame {
                    winner: TeamScore::from_side(winner, false)?,
                    loser: TeamScore::from_side(loser, false)?,
                    margin,
                });
            }
        }
    }

    closest
}

/// A game where the side with the worse win percentage outscored the other.
///
/// When several games qualify, the last one in game order is reported; the
/// scan does not rank upsets by how lopsided they were. Games involving a
/// team with no decisions yet (0-0) have no win percentage to compare and
/// never count as an upset.
pub fn find_biggest_upset(games: &[Game]) -> Option<Upset> {
    let mut upset = None;

    for game in games {
        let Some((home, away)) = game.scores() else {
            continue;
        };
        let (Some(home_pct), Some(away_pct)) =
            (game.home.team.record.win_pct(), game.away.team.record.win_pct())
        else {
            debug!(
                "Skipping upset check for {} vs {}: team without decisions",
                game.home.team.name, game.away.team.name
            );
            continue;
        };

        let is_upset = (home > away && home_pct < away_pct) || (away > home && away_pct < home_pct);
        if !is_upset {
            continue;
        }

        if let Some((winner, loser)) = game.winner_and_loser() {
            upset = Some(Upset {
                winner: TeamScore::from_side(winner, true)?,
                loser: TeamScore::from_side(loser, true)?,
            });
        }
    }

    upset
}

pub fn hall_of_infamy(scoreboard: &ScoreboardSnapshot) -> HallOfInfamy {
    let scores = extract_weekly_scores(&scoreboard.games);
    HallOfInfamy {
        fetched_at: scoreboard.fetched_at,
        high_score: find_high_score(&scores).cloned(),
        closest_game: find_closest_game(&scoreboard.games),
        biggest_upset: find_biggest_upset(&scoreboard.games),
        lowest_score: find_lowest_score(&scores).cloned(),
    }
}
