//! Power index: standings ordered by wins then points-for, with a
//! rank-based playoff odds heuristic and a fixed flavor table.
//!
//! The odds are not a simulation. They come from a piecewise-linear formula
//! on rank alone:
//!
//! ```text
//!   rank <= 6 : 100 - (rank - 1) * 15
//!   rank >  6 : 100 - (rank - 6) * 20
//! ```
//!
//! Ranks 1-8 report the value as playoff odds, ranks 9+ report
//! `100 - odds` as elimination odds. Nothing is clamped, so deep ranks go
//! negative (rank 12 → -20) exactly as the formula says.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::league::models::{StandingsSnapshot, Team};

/// Ranks up to this one lose 15 points per step; later ranks lose 20.
pub const PLAYOFF_SPOTS: u32 = 6;

/// Last rank displayed with playoff odds rather than elimination odds.
pub const PLAYOFF_ODDS_CUTOFF: u32 = 8;

pub fn calculate_playoff_odds(rank: u32) -> i32 {
    let rank = rank as i32;
    let spots = PLAYOFF_SPOTS as i32;
    if rank <= spots {
        100 - (rank - 1) * 15
    } else {
        100 - (rank - spots) * 20
    }
}

/// Exactly one odds figure per ranked team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Odds {
    PlayoffOdds(i32),
    EliminationOdds(i32),
}

impl Odds {
    pub fn for_rank(rank: u32) -> Self {
        let odds = calculate_playoff_odds(rank);
        if rank <= PLAYOFF_ODDS_CUTOFF {
            Odds::PlayoffOdds(odds)
        } else {
            Odds::EliminationOdds(100 - odds)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankFlavor {
    pub status: &'static str,
    pub tag_line: &'static str,
    pub commentary: &'static str,
}

/// Index 0 is rank 1.
const RANK_FLAVOR: [RankFlavor; 12] = [
    RankFlavor {
        status: "THE KING IN THE HIGH CASTLE",
        tag_line: "Sitting on a throne made of your broken dreams, they rule with absolute arrogance.",
        commentary: "Top of the heap, undisputed champion (for now). Everyone hates them, but they're too busy basking in glory to notice.",
    },
    RankFlavor {
        status: "THE HEIR APPARENT",
        tag_line: "One misstep away from the throne, yet close enough to taste it.",
        commentary: "Second place is just first loser, but don't tell them that. Their time might come, if the stars align.",
    },
    RankFlavor {
        status: "THE APEX PREDATOR",
        tag_line: "Lurking in the shadows, waiting for their moment to strike.",
        commentary: "Not quite royalty, but dangerous enough to make the nobility nervous. A few lucky breaks could change everything.",
    },
    RankFlavor {
        status: "THE CONTENDER",
        tag_line: "Too good to ignore, too inconsistent to trust.",
        commentary: "They've got the tools to make a run, but something always seems to go wrong at the worst possible moment.",
    },
    RankFlavor {
        status: "THE WILD CARD",
        tag_line: "Chaos incarnate, capable of brilliance or disaster.",
        commentary: "Nobody knows what to expect from them, least of all themselves.",
    },
    RankFlavor {
        status: "THE GATEKEEPER",
        tag_line: "Standing at the threshold between glory and mediocrity.",
        commentary: "The last line of defense before the playoff bubble. Cross them at your own risk.",
    },
    RankFlavor {
        status: "THE BUBBLE DWELLER",
        tag_line: "Living life on the edge of relevance.",
        commentary: "Every week is do-or-die. One false move and it's all over but the crying.",
    },
    RankFlavor {
        status: "THE HOT MESS EXPRESS",
        tag_line: "Terrible draft, missed waiver deadlines, and starting players on bye week. All aboard!",
        commentary: "They're a walking disaster, but somehow still hanging on. Chaos is their co-pilot, and we're all here for the ride.",
    },
    RankFlavor {
        status: "THE COLLAPSING STAR",
        tag_line: "How the mighty have tumbled into mediocrity.",
        commentary: "The playoffs are becoming a distant memory. Time to start planning for next year.",
    },
    RankFlavor {
        status: "THE LOST CAUSE",
        tag_line: "Abandoned by luck, skill, and the fantasy gods themselves.",
        commentary: "They're not officially eliminated yet, but they can hear the fat lady warming up.",
    },
    RankFlavor {
        status: "THE BOTTOM FEEDER",
        tag_line: "Rock bottom is just a state of mind... and their current address.",
        commentary: "At least they're consistent - consistently terrible. There's always next year.",
    },
    RankFlavor {
        status: "THE CELLAR DWELLER",
        tag_line: "In a downward spiral that would make Dr. Thompson proud.",
        commentary: "A season that could only be described as one expanding circular fuck up.",
    },
];

/// Flavor for ranks 1-12; any other rank has none.
pub fn flavor_for_rank(rank: u32) -> Option<&'static RankFlavor> {
    let idx = usize::try_from(rank).ok()?.checked_sub(1)?;
    RANK_FLAVOR.get(idx)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTeam {
    pub rank: u32,
    pub team: String,
    pub record: String,
    #[serde(flatten)]
    pub odds: Odds,
    /// Omitted entirely past the end of the flavor table
    #[serde(flatten)]
    pub flavor: Option<&'static RankFlavor>,
    pub points_for: f64,
    pub streak: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerIndex {
    pub fetched_at: DateTime<Utc>,
    pub rankings: Vec<RankedTeam>,
}

/// Rank every team in the league. Sorting is stable: teams level on wins
/// and points-for keep their standings order.
pub fn rank_teams(standings: &StandingsSnapshot) -> Vec<RankedTeam> {
    let mut teams: Vec<&Team> = standings.teams().collect();
    teams.sort_by(|a, b| {
        b.record
            .wins
            .cmp(&a.record.wins)
            .then_with(|| b.points_for.total_cmp(&a.points_for))
    });

    teams
        .into_iter()
        .zip(1u32..)
        .map(|(team, rank)| RankedTeam {
            rank,
            team: team.name.clone(),
            record: team.record.to_string(),
            odds: Odds::for_rank(rank),
            flavor: flavor_for_rank(rank),
            points_for: team.points_for,
            streak: team.streak,
        })
        .collect()
}

pub fn power_index(standings: &StandingsSnapshot) -> PowerIndex {
    PowerIndex {
        fetched_at: standings.fetched_at,
        rankings: rank_teams(standings),
    }
}
