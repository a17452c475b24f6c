use serde::{Deserialize, Serialize};

use crate::league::models::Game;

/// Players still to play on each side of a matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YetToPlay {
    pub winner: u32,
    pub loser: u32,
}

/// A game seen from the leading side. This is also the request body of
/// `POST /api/generate-commentary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    pub winner: String,
    pub loser: String,
    pub winner_score: f64,
    pub loser_score: f64,
    #[serde(default)]
    pub in_progress: bool,
    #[serde(default)]
    pub yet_to_play: YetToPlay,
}

impl Matchup {
    /// `None` unless both sides report a score. A zero score that arrives
    /// only as its display string still counts. A tie lists the away side
    /// first.
    pub fn from_game(game: &Game) -> Option<Self> {
        let home = game.home.reported_points()?;
        let away = game.away.reported_points()?;
        let ((winner, winner_score), (loser, loser_score)) = if home > away {
            ((&game.home, home), (&game.away, away))
        } else {
            ((&game.away, away), (&game.home, home))
        };
        Some(Matchup {
            winner: winner.team.name.clone(),
            loser: loser.team.name.clone(),
            winner_score,
            loser_score,
            in_progress: game.in_progress,
            yet_to_play: YetToPlay {
                winner: winner.yet_to_play,
                loser: loser.yet_to_play,
            },
        })
    }
}

/// Matchups for every game with both scores reported, in game order.
pub fn matchups(games: &[Game]) -> Vec<Matchup> {
    games.iter().filter_map(Matchup::from_game).collect()
}

// Ordered highest threshold first; a margin must be strictly greater.
const IN_PROGRESS_LADDER: [(f64, &str); 3] = [
    (50.0, "{winner} is beating {loser} like a rented mule, and the bleeding isn't over yet."),
    (30.0, "{winner} has {loser} on the ropes, sweating through the shirt and praying for a miracle."),
    (15.0, "{winner} holds a nervous lead over {loser}, but the night is young and the drugs are kicking in."),
];
const IN_PROGRESS_DEFAULT: &str =
    "{winner} and {loser} are locked in a knife fight in a phone booth, and nobody is walking out clean.";

const COMPLETED_LADDER: [(f64, &str); 5] = [
    (50.0, "{winner} obliterated {loser} in a massacre so total the league should file a police report."),
    (40.0, "{winner} stomped {loser} into the desert floor and left them for the buzzards."),
    (30.0, "{winner} put {loser} through a savage beating that will echo in the group chat for weeks."),
    (20.0, "{winner} handled {loser} with the cold efficiency of a Vegas pit boss."),
    (10.0, "{winner} outlasted {loser} in an ugly, sweaty brawl that nobody will remember fondly."),
];
const COMPLETED_DEFAULT: &str =
    "{winner} escaped {loser} by a hair, a finish that demands medication for everyone involved.";

fn select_template(diff: f64, in_progress: bool) -> &'static str {
    let ladder: &[(f64, &'static str)] = if in_progress {
        &IN_PROGRESS_LADDER
    } else {
        &COMPLETED_LADDER
    };
    let default = if in_progress {
        IN_PROGRESS_DEFAULT
    } else {
        COMPLETED_DEFAULT
    };

    ladder
        .iter()
        .find(|(threshold, _)| diff > *threshold)
        .map(|(_, template)| *template)
        .unwrap_or(default)
}

/// One-line commentary chosen by score margin and game state.
pub fn generate_matchup_commentary(
    winner: &str,
    loser: &str,
    winner_score: f64,
    loser_score: f64,
    in_progress: bool,
) -> String {
    let diff = (winner_score - loser_score).abs();
    select_template(diff, in_progress)
        .replace("{winner}", winner)
        .replace("{loser}", loser)
}

/// Substituted when generated commentary is unavailable for a matchup.
pub fn fallback_commentary(matchup: &Matchup) -> String {
    let verb = if matchup.in_progress { "leads" } else { "defeated" };
    format!(
        "{} {} {} in a game that defies description.",
        matchup.winner, verb, matchup.loser
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::models::fixtures::{game, side};
    use crate::league::models::ScoreboardSnapshot;

    #[test]
    fn test_completed_blowout_uses_top_template() {
        let text = generate_matchup_commentary("Team A", "Team B", 120.0, 50.0, false);
        assert_eq!(
            text,
            "Team A obliterated Team B in a massacre so total the league should file a police report."
        );
    }

    #[test]
    fn test_completed_close_game_uses_default_template() {
        let text = generate_matchup_commentary("Team A", "Team B", 80.0, 75.0, false);
        assert_eq!(text, COMPLETED_DEFAULT.replace("{winner}", "Team A").replace("{loser}", "Team B"));
    }

    #[test]
    fn test_completed_ladder_bands() {
        assert_eq!(select_template(45.0, false), COMPLETED_LADDER[1].1);
        assert_eq!(select_template(35.0, false), COMPLETED_LADDER[2].1);
        assert_eq!(select_template(25.0, false), COMPLETED_LADDER[3].1);
        assert_eq!(select_template(15.0, false), COMPLETED_LADDER[4].1);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(select_template(50.0, false), COMPLETED_LADDER[1].1);
        assert_eq!(select_template(10.0, false), COMPLETED_DEFAULT);
        assert_eq!(select_template(15.0, true), IN_PROGRESS_DEFAULT);
        assert_eq!(select_template(50.5, true), IN_PROGRESS_LADDER[0].1);
    }

    #[test]
    fn test_in_progress_ladder_bands() {
        assert_eq!(select_template(31.0, true), IN_PROGRESS_LADDER[1].1);
        assert_eq!(select_template(16.0, true), IN_PROGRESS_LADDER[2].1);
        assert_eq!(select_template(2.0, true), IN_PROGRESS_DEFAULT);
    }

    #[test]
    fn test_margin_is_absolute() {
        let a = generate_matchup_commentary("W", "L", 50.0, 120.0, false);
        let b = generate_matchup_commentary("W", "L", 120.0, 50.0, false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_wording() {
        let mut m = Matchup {
            winner: "Bat Country".into(),
            loser: "Lizard Lounge".into(),
            winner_score: 99.0,
            loser_score: 98.0,
            in_progress: true,
            yet_to_play: YetToPlay::default(),
        };
        assert_eq!(
            fallback_commentary(&m),
            "Bat Country leads Lizard Lounge in a game that defies description."
        );
        m.in_progress = false;
        assert_eq!(
            fallback_commentary(&m),
            "Bat Country defeated Lizard Lounge in a game that defies description."
        );
    }

    #[test]
    fn test_matchup_from_game_orients_winner() {
        let mut g = game(side("Home", (3, 3), Some(88.0)), side("Away", (3, 3), Some(104.5)));
        g.in_progress = true;
        g.home.yet_to_play = 3;
        g.away.yet_to_play = 1;

        let m = Matchup::from_game(&g).unwrap();
        assert_eq!(m.winner, "Away");
        assert_eq!(m.loser, "Home");
        assert_eq!(m.winner_score, 104.5);
        assert_eq!(m.yet_to_play, YetToPlay { winner: 1, loser: 3 });
        assert!(m.in_progress);
    }

    #[test]
    fn test_matchups_skip_unscored_games() {
        let games = vec![
            game(side("A", (1, 1), Some(90.0)), side("B", (1, 1), None)),
            game(side("C", (1, 1), Some(70.0)), side("D", (1, 1), Some(60.0))),
        ];
        let ms = matchups(&games);
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].winner, "C");
    }

    #[test]
    fn test_zero_score_without_value_is_kept() {
        let payload = serde_json::json!({
            "games": [{
                "home": { "name": "Early Bird" },
                "away": { "name": "Late Riser" },
                "homeScore": { "score": { "value": 12.5, "formatted": "12.5" }, "yetToPlay": 8 },
                "awayScore": { "score": { "formatted": "0" }, "yetToPlay": 9 },
                "isInProgress": true
            }]
        });
        let board = ScoreboardSnapshot::from_json(payload, chrono::Utc::now()).unwrap();

        let ms = matchups(&board.games);
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].winner, "Early Bird");
        assert_eq!(ms[0].loser, "Late Riser");
        assert_eq!(ms[0].loser_score, 0.0);
        assert_eq!(ms[0].yet_to_play, YetToPlay { winner: 8, loser: 9 });
    }

    #[test]
    fn test_matchup_request_body_shape() {
        let body = serde_json::json!({
            "winner": "A",
            "loser": "B",
            "winnerScore": 101.5,
            "loserScore": 99.0,
            "inProgress": false,
            "yetToPlay": { "winner": 0, "loser": 2 }
        });
        let m: Matchup = serde_json::from_value(body).unwrap();
        assert_eq!(m.yet_to_play.loser, 2);
        assert_eq!(m.loser_score, 99.0);
    }
}
