pub mod anthropic;

pub use anthropic::AnthropicClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::league::models::ScoreboardSnapshot;
use crate::stats::narrator::{fallback_commentary, generate_matchup_commentary, matchups, Matchup};

/// Used when a provider answers with nothing but whitespace.
pub const BLANK_COMMENTARY: &str = "The chaos continues...";

#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("commentary request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("text generation API returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("text generation response contained no text")]
    EmptyResponse,
}

/// Source of one-sentence matchup commentary.
#[async_trait]
pub trait CommentaryProvider: Send + Sync {
    async fn commentary(&self, matchup: &Matchup) -> Result<String, CommentaryError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Deterministic commentary from the margin ladders; never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

#[async_trait]
impl CommentaryProvider for TemplateNarrator {
    async fn commentary(&self, matchup: &Matchup) -> Result<String, CommentaryError> {
        Ok(generate_matchup_commentary(
            &matchup.winner,
            &matchup.loser,
            matchup.winner_score,
            matchup.loser_score,
            matchup.in_progress,
        ))
    }

    fn name(&self) -> &str {
        "template"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarratedMatchup {
    #[serde(flatten)]
    pub matchup: Matchup,
    pub comment: String,
}

/// The week's results with commentary attached ("The Week's Casualties").
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Casualties {
    pub fetched_at: DateTime<Utc>,
    pub matchups: Vec<NarratedMatchup>,
}

/// Request commentary for every matchup concurrently.
///
/// Output order matches input order. A failed call only affects its own
/// matchup, which gets the fallback sentence instead.
pub async fn narrate_matchups(
    provider: &dyn CommentaryProvider,
    matchups: Vec<Matchup>,
) -> Vec<NarratedMatchup> {
    let total = matchups.len();
    let calls = matchups.into_iter().map(|matchup| async move {
        let comment = match provider.commentary(&matchup).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => BLANK_COMMENTARY.to_string(),
            Err(e) => {
                warn!(
                    "{} commentary failed for {} vs {}: {}",
                    provider.name(),
                    matchup.winner,
                    matchup.loser,
                    e
                );
                fallback_commentary(&matchup)
            }
        };
        NarratedMatchup { matchup, comment }
    });

    let narrated = join_all(calls).await;
    info!("Narrated {} matchup(s) via {}", total, provider.name());
    narrated
}

/// Every scored game on the board, narrated.
pub async fn casualties(
    provider: &dyn CommentaryProvider,
    scoreboard: &ScoreboardSnapshot,
) -> Casualties {
    Casualties {
        fetched_at: scoreboard.fetched_at,
        matchups: narrate_matchups(provider, matchups(&scoreboard.games)).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::narrator::YetToPlay;

    fn matchup(winner: &str, loser: &str, ws: f64, ls: f64) -> Matchup {
        Matchup {
            winner: winner.into(),
            loser: loser.into(),
            winner_score: ws,
            loser_score: ls,
            in_progress: false,
            yet_to_play: YetToPlay::default(),
        }
    }

    /// Fails for one named winner, echoes otherwise.
    struct Flaky {
        fail_for: &'static str,
    }

    #[async_trait]
    impl CommentaryProvider for Flaky {
        async fn commentary(&self, m: &Matchup) -> Result<String, CommentaryError> {
            if m.winner == self.fail_for {
                Err(CommentaryError::EmptyResponse)
            } else if m.winner == "Blank" {
                Ok("   ".into())
            } else {
                Ok(format!("{} rides again", m.winner))
            }
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    #[tokio::test]
    async fn test_failed_call_gets_fallback_and_order_is_kept() {
        let provider = Flaky { fail_for: "B" };
        let out = narrate_matchups(
            &provider,
            vec![
                matchup("A", "Z", 100.0, 90.0),
                matchup("B", "Y", 80.0, 70.0),
                matchup("C", "X", 60.0, 50.0),
            ],
        )
        .await;

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].comment, "A rides again");
        assert_eq!(out[1].matchup.winner, "B");
        assert_eq!(out[1].comment, "B defeated Y in a game that defies description.");
        assert_eq!(out[2].comment, "C rides again");
    }

    #[tokio::test]
    async fn test_blank_commentary_is_replaced() {
        let provider = Flaky { fail_for: "nobody" };
        let out = narrate_matchups(&provider, vec![matchup("Blank", "Z", 1.0, 0.0)]).await;
        assert_eq!(out[0].comment, BLANK_COMMENTARY);
    }

    #[tokio::test]
    async fn test_template_narrator_never_fails() {
        let out = narrate_matchups(&TemplateNarrator, vec![matchup("Team A", "Team B", 120.0, 50.0)]).await;
        assert!(out[0].comment.starts_with("Team A obliterated Team B"));
    }

    #[tokio::test]
    async fn test_no_matchups_no_calls() {
        let out = narrate_matchups(&TemplateNarrator, vec![]).await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_casualties_cover_scored_games_only() {
        use crate::league::models::fixtures::{game, side};

        let board = ScoreboardSnapshot {
            games: vec![
                game(side("A", (2, 2), Some(140.0)), side("B", (2, 2), Some(60.0))),
                game(side("C", (2, 2), None), side("D", (2, 2), Some(12.0))),
            ],
            fetched_at: Utc::now(),
        };
        let report = casualties(&TemplateNarrator, &board).await;
        assert_eq!(report.fetched_at, board.fetched_at);
        assert_eq!(report.matchups.len(), 1);
        assert_eq!(report.matchups[0].matchup.winner, "A");
    }

    #[test]
    fn test_narrated_matchup_flattens_fields() {
        let n = NarratedMatchup {
            matchup: matchup("A", "B", 10.0, 5.0),
            comment: "done".into(),
        };
        let v = serde_json::to_value(&n).unwrap();
        assert_eq!(v["winner"], "A");
        assert_eq!(v["winnerScore"], 10.0);
        assert_eq!(v["comment"], "done");
    }
}
