use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{CommentaryError, CommentaryProvider};
use crate::stats::narrator::Matchup;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API, used for gonzo matchup commentary.
#[derive(Clone)]
pub struct AnthropicClient {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(
        api_url: &str,
        api_key: String,
        model: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(AnthropicClient {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
            max_tokens,
        })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Prompt sent for a single matchup.
pub fn build_prompt(m: &Matchup) -> String {
    let mut lines = vec![
        "As Hunter S. Thompson, write a one-sentence commentary about this fantasy football matchup:"
            .to_string(),
        format!("Winner: {} ({} points)", m.winner, m.winner_score),
        format!("Loser: {} ({} points)", m.loser, m.loser_score),
        if m.in_progress {
            "Game in progress".to_string()
        } else {
            "Game completed".to_string()
        },
    ];
    // Both count lines are always present, blank when nobody is left.
    lines.push(if m.yet_to_play.winner > 0 {
        format!("Winner has {} players left", m.yet_to_play.winner)
    } else {
        String::new()
    });
    lines.push(if m.yet_to_play.loser > 0 {
        format!("Loser has {} players left", m.yet_to_play.loser)
    } else {
        String::new()
    });
    lines.push(String::new());
    lines.push(
        "Make it gonzo journalism style - excessive, outrageous, and with dark humor. \
         Reference the team names if possible. One sentence only."
            .to_string(),
    );
    lines.join("\n")
}

#[async_trait]
impl CommentaryProvider for AnthropicClient {
    async fn commentary(&self, matchup: &Matchup) -> Result<String, CommentaryError> {
        let url = format!("{}/v1/messages", self.api_url);
        let request = MessagesRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: build_prompt(matchup),
            }],
            max_tokens: self.max_tokens,
        };

        debug!(
            "Requesting commentary for {} vs {} from {}",
            matchup.winner, matchup.loser, self.model
        );

        let resp = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(CommentaryError::Upstream { status, body });
        }

        let parsed: MessagesResponse = resp.json().await?;
        parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or(CommentaryError::EmptyResponse)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::narrator::YetToPlay;
    use mockito::Matcher;
    use serde_json::json;

    fn matchup(in_progress: bool, yet_to_play: YetToPlay) -> Matchup {
        Matchup {
            winner: "Bat Country".into(),
            loser: "Lizard Lounge".into(),
            winner_score: 121.5,
            loser_score: 87.0,
            in_progress,
            yet_to_play,
        }
    }

    fn client(url: &str) -> AnthropicClient {
        AnthropicClient::new(
            url,
            "test-key".into(),
            "claude-3-haiku-20240307",
            1024,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_prompt_for_completed_game() {
        let prompt = build_prompt(&matchup(false, YetToPlay::default()));
        assert!(prompt.contains("Winner: Bat Country (121.5 points)"));
        assert!(prompt.contains("Loser: Lizard Lounge (87 points)"));
        assert!(prompt.contains("Game completed"));
        assert!(!prompt.contains("players left"));
        assert!(prompt.contains("Game completed\n\n\n\nMake it gonzo"));
        assert!(prompt.ends_with("One sentence only."));
    }

    #[test]
    fn test_prompt_mentions_players_left() {
        let prompt = build_prompt(&matchup(true, YetToPlay { winner: 2, loser: 0 }));
        assert!(prompt.contains("Game in progress"));
        assert!(prompt.contains("Winner has 2 players left"));
        assert!(!prompt.contains("Loser has"));
        assert!(prompt.contains("Winner has 2 players left\n\n\nMake it gonzo"));
    }

    #[tokio::test]
    async fn test_commentary_returns_first_text_block() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", "2023-06-01")
            .match_body(Matcher::PartialJson(json!({
                "model": "claude-3-haiku-20240307",
                "max_tokens": 1024
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "content": [
                        { "type": "text", "text": "Bat Country ate the lizards alive." },
                        { "type": "text", "text": "ignored" }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let text = client(&server.url())
            .commentary(&matchup(false, YetToPlay::default()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Bat Country ate the lizards alive.");
    }

    #[tokio::test]
    async fn test_error_status_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(529)
            .with_body(r#"{"type":"error","error":{"type":"overloaded_error"}}"#)
            .create_async()
            .await;

        let err = client(&server.url())
            .commentary(&matchup(false, YetToPlay::default()))
            .await
            .unwrap_err();

        match err {
            CommentaryError::Upstream { status, body } => {
                assert_eq!(status.as_u16(), 529);
                assert!(body.contains("overloaded_error"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_content_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_body(r#"{"content":[]}"#)
            .create_async()
            .await;

        let err = client(&server.url())
            .commentary(&matchup(true, YetToPlay::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, CommentaryError::EmptyResponse));
    }
}
