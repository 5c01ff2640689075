//! In-process [`HubBackend`] serving a small built-in catalogue.
//!
//! Used by `serve --mock` and by tests that must not touch the network.
//! Search scores entries by phrase, keyword and topic overlap; execution
//! checks required inputs and echoes them back; the most recent feedback
//! records are kept in memory.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::debug;

use apihub_types::{ExecutionKind, ExecutionTarget};

use crate::backend::HubBackend;
use crate::error::GatewayError;
use crate::models::{
    ExecuteResponse, LoadRequest, OperationMatch, SearchMatches, SearchQuery, WorkflowMatch,
};

struct CatalogueEntry {
    id: &'static str,
    kind: ExecutionKind,
    api_name: &'static str,
    summary: &'static str,
    description: &'static str,
    method: &'static str,
    path: &'static str,
    topics: &'static [&'static str],
    required_inputs: &'static [&'static str],
}

const MUSIC: &[&str] = &[
    "music", "song", "track", "audio", "play", "listen", "playlist", "spotify", "playback",
];
const MESSAGING: &[&str] = &["message", "chat", "discord", "dm", "channel", "server", "guild"];
const COMICS: &[&str] = &["comic", "xkcd", "webcomic", "cartoon"];
const WEATHER: &[&str] = &["weather", "forecast", "temperature", "rain"];
const EMAIL: &[&str] = &["email", "mail", "gmail", "inbox"];

const CATALOGUE: &[CatalogueEntry] = &[
    CatalogueEntry {
        id: "wf_spotify_search_tracks",
        kind: ExecutionKind::Workflow,
        api_name: "spotify.com",
        summary: "Search Spotify tracks",
        description: "Find tracks on Spotify by name, artist or genre and return the top results.",
        method: "",
        path: "",
        topics: MUSIC,
        required_inputs: &["query"],
    },
    CatalogueEntry {
        id: "op_spotify_search",
        kind: ExecutionKind::Operation,
        api_name: "spotify.com",
        summary: "Search for an item",
        description: "Get Spotify catalog information about albums, artists, playlists or tracks.",
        method: "GET",
        path: "/v1/search",
        topics: MUSIC,
        required_inputs: &["q", "type"],
    },
    CatalogueEntry {
        id: "op_spotify_start_playback",
        kind: ExecutionKind::Operation,
        api_name: "spotify.com",
        summary: "Start or resume playback",
        description: "Start a new context or resume current playback on the active device.",
        method: "PUT",
        path: "/v1/me/player/play",
        topics: MUSIC,
        required_inputs: &[],
    },
    CatalogueEntry {
        id: "wf_discord_post_message",
        kind: ExecutionKind::Workflow,
        api_name: "discord.com",
        summary: "Post a message to a Discord channel",
        description: "Send a text message to a channel the bot can write to.",
        method: "",
        path: "",
        topics: MESSAGING,
        required_inputs: &["channel_id", "content"],
    },
    CatalogueEntry {
        id: "op_discord_list_guilds",
        kind: ExecutionKind::Operation,
        api_name: "discord.com",
        summary: "List current user guilds",
        description: "Returns the Discord servers the current user is a member of.",
        method: "GET",
        path: "/users/@me/guilds",
        topics: MESSAGING,
        required_inputs: &[],
    },
    CatalogueEntry {
        id: "op_xkcd_current_comic",
        kind: ExecutionKind::Operation,
        api_name: "xkcd.com",
        summary: "Fetch the current comic",
        description: "Returns metadata and the image URL of the latest xkcd comic.",
        method: "GET",
        path: "/info.0.json",
        topics: COMICS,
        required_inputs: &[],
    },
    CatalogueEntry {
        id: "op_openweather_current",
        kind: ExecutionKind::Operation,
        api_name: "openweathermap.org",
        summary: "Current weather data",
        description: "Current weather conditions for a city name or coordinates.",
        method: "GET",
        path: "/data/2.5/weather",
        topics: WEATHER,
        required_inputs: &["q"],
    },
    CatalogueEntry {
        id: "wf_gmail_send_email",
        kind: ExecutionKind::Workflow,
        api_name: "gmail.com",
        summary: "Send an email",
        description: "Compose and send an email from the connected Gmail account.",
        method: "",
        path: "",
        topics: EMAIL,
        required_inputs: &["to", "subject", "body"],
    },
];

impl CatalogueEntry {
    fn score(&self, query: &str, keywords: &[String]) -> f64 {
        let summary = self.summary.to_lowercase();
        let description = self.description.to_lowercase();
        let mut score = 0.0;

        if !query.is_empty() && summary.contains(query) {
            score += 0.7;
        }
        if !query.is_empty() && description.contains(query) {
            score += 0.5;
        }
        for keyword in keywords {
            if summary.contains(keyword.as_str()) {
                score += 0.3;
            }
            if description.contains(keyword.as_str()) {
                score += 0.2;
            }
            if self.id.contains(keyword.as_str()) {
                score += 0.8;
            }
        }
        if query
            .split_whitespace()
            .chain(keywords.iter().map(String::as_str))
            .any(|term| self.topics.contains(&term))
        {
            score += 0.7;
        }
        score
    }

    fn load_entry(&self) -> Value {
        let mut entry = json!({
            "id": self.id,
            "api_name": self.api_name,
            "summary": self.summary,
            "description": self.description,
            "inputs": {
                "type": "object",
                "properties": self.required_inputs.iter()
                    .map(|name| ((*name).to_string(), json!({"type": "string"})))
                    .collect::<Map<String, Value>>(),
                "required": self.required_inputs,
            },
        });
        if self.kind == ExecutionKind::Operation {
            entry["method"] = json!(self.method);
            entry["path"] = json!(self.path);
        }
        entry
    }
}

fn find(id: &str, kind: ExecutionKind) -> Option<&'static CatalogueEntry> {
    CATALOGUE.iter().find(|e| e.id == id && e.kind == kind)
}

/// Feedback records kept by [`MockBackend`]; older ones are evicted.
pub const FEEDBACK_CAPACITY: usize = 256;

/// Catalogue-backed backend with in-memory feedback capture.
#[derive(Debug, Default)]
pub struct MockBackend {
    feedback: Mutex<VecDeque<Map<String, Value>>>,
}

impl MockBackend {
    /// Creates an empty mock backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last [`FEEDBACK_CAPACITY`] feedback records, oldest first.
    pub fn feedback_records(&self) -> Vec<Map<String, Value>> {
        self.feedback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HubBackend for MockBackend {
    async fn search(&self, query: &SearchQuery) -> Result<SearchMatches, GatewayError> {
        let text = query.query.trim().to_lowercase();
        let keywords: Vec<String> = query.keywords.iter().map(|k| k.to_lowercase()).collect();

        let mut scored: Vec<(f64, &CatalogueEntry)> = CATALOGUE
            .iter()
            .filter(|e| match &query.api_filter {
                Some(apis) if !apis.is_empty() => apis.iter().any(|a| a == e.api_name),
                _ => true,
            })
            .map(|e| (e.score(&text, &keywords), e))
            .filter(|(score, _)| *score > 0.0)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let limit = query.limit as usize;
        let mut matches = SearchMatches::default();
        for (score, entry) in scored {
            match entry.kind {
                ExecutionKind::Workflow if matches.workflows.len() < limit => {
                    matches.workflows.push(WorkflowMatch {
                        workflow_id: entry.id.to_string(),
                        summary: entry.summary.to_string(),
                        description: entry.description.to_string(),
                        api_name: entry.api_name.to_string(),
                        match_score: score,
                    });
                }
                ExecutionKind::Operation if matches.operations.len() < limit => {
                    matches.operations.push(OperationMatch {
                        operation_uuid: entry.id.to_string(),
                        summary: entry.summary.to_string(),
                        description: entry.description.to_string(),
                        path: entry.path.to_string(),
                        method: entry.method.to_string(),
                        api_name: entry.api_name.to_string(),
                        match_score: score,
                    });
                }
                _ => {}
            }
        }
        debug!(query = %query.query, total = matches.len(), "mock search");
        Ok(matches)
    }

    async fn load(&self, request: &LoadRequest) -> Result<Value, GatewayError> {
        let mut workflows = Map::new();
        for id in &request.workflow_uuids {
            let entry = find(id, ExecutionKind::Workflow)
                .ok_or_else(|| GatewayError::InvalidSelection(format!("unknown workflow '{id}'")))?;
            workflows.insert(id.clone(), entry.load_entry());
        }
        let mut operations = Map::new();
        for id in &request.operation_uuids {
            let entry = find(id, ExecutionKind::Operation).ok_or_else(|| {
                GatewayError::InvalidSelection(format!("unknown operation '{id}'"))
            })?;
            operations.insert(id.clone(), entry.load_entry());
        }
        Ok(json!({"workflows": workflows, "operations": operations, "files": {}}))
    }

    async fn execute(
        &self,
        target: &ExecutionTarget,
        inputs: &Map<String, Value>,
    ) -> Result<ExecuteResponse, GatewayError> {
        let entry = find(target.id(), target.kind()).ok_or_else(|| {
            GatewayError::InvalidSelection(format!("unknown {} '{}'", target.kind(), target.id()))
        })?;

        let missing: Vec<&str> = entry
            .required_inputs
            .iter()
            .copied()
            .filter(|name| !inputs.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Ok(ExecuteResponse {
                success: false,
                error: Some(format!("Missing required inputs: {}", missing.join(", "))),
                inputs: Some(Value::Object(inputs.clone())),
                ..ExecuteResponse::default()
            });
        }

        Ok(ExecuteResponse {
            success: true,
            output: Some(json!({
                "status": 200,
                "api_name": entry.api_name,
                "echo": inputs,
            })),
            inputs: Some(Value::Object(inputs.clone())),
            ..ExecuteResponse::default()
        })
    }

    async fn submit_feedback(&self, feedback: &Map<String, Value>) -> Result<(), GatewayError> {
        let mut records = self.feedback.lock().unwrap_or_else(PoisonError::into_inner);
        if records.len() == FEEDBACK_CAPACITY {
            records.pop_front();
        }
        records.push_back(feedback.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn music_query_finds_spotify() {
        let backend = MockBackend::new();
        let matches = backend
            .search(&SearchQuery::new("spotify music"))
            .await
            .expect("search");
        assert!(!matches.is_empty());
        assert!(matches.operations.iter().all(|m| m.api_name == "spotify.com"));
        assert!(matches.workflows.iter().any(|w| w.workflow_id == "wf_spotify_search_tracks"));
    }

    #[tokio::test]
    async fn results_sorted_by_score() {
        let backend = MockBackend::new();
        let matches = backend
            .search(&SearchQuery::new("search for an item"))
            .await
            .expect("search");
        let scores: Vec<f64> = matches.operations.iter().map(|m| m.match_score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(matches.operations[0].operation_uuid, "op_spotify_search");
    }

    #[tokio::test]
    async fn api_filter_restricts_matches() {
        let backend = MockBackend::new();
        let mut query = SearchQuery::new("send a message or play a song");
        query.api_filter = Some(vec!["discord.com".into()]);
        let matches = backend.search(&query).await.expect("search");
        assert!(!matches.is_empty());
        assert!(matches.workflows.iter().all(|w| w.api_name == "discord.com"));
        assert!(matches.operations.iter().all(|o| o.api_name == "discord.com"));
    }

    #[tokio::test]
    async fn limit_applies_per_kind() {
        let backend = MockBackend::new();
        let mut query = SearchQuery::new("music");
        query.limit = 1;
        let matches = backend.search(&query).await.expect("search");
        assert_eq!(matches.operations.len(), 1);
        assert!(matches.workflows.len() <= 1);
    }

    #[tokio::test]
    async fn unrelated_query_matches_nothing() {
        let backend = MockBackend::new();
        let matches = backend
            .search(&SearchQuery::new("quantum chromodynamics"))
            .await
            .expect("search");
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn load_unknown_id_is_invalid_selection() {
        let backend = MockBackend::new();
        let req = LoadRequest {
            operation_uuids: vec!["op_nope".into()],
            ..LoadRequest::default()
        };
        let err = backend.load(&req).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidSelection(_)));
    }

    #[tokio::test]
    async fn load_returns_input_schema() {
        let backend = MockBackend::new();
        let req = LoadRequest {
            workflow_uuids: vec!["wf_gmail_send_email".into()],
            operation_uuids: vec!["op_spotify_search".into()],
        };
        let v = backend.load(&req).await.expect("load");
        let wf = &v["workflows"]["wf_gmail_send_email"];
        assert_eq!(wf["inputs"]["required"], json!(["to", "subject", "body"]));
        assert_eq!(v["operations"]["op_spotify_search"]["method"], "GET");
    }

    #[tokio::test]
    async fn execute_missing_inputs_is_logical_failure() {
        let backend = MockBackend::new();
        let target = ExecutionTarget::Workflow("wf_discord_post_message".into());
        let mut inputs = Map::new();
        inputs.insert("channel_id".into(), json!("123"));
        let resp = backend.execute(&target, &inputs).await.expect("execute");
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Missing required inputs: content"));
    }

    #[tokio::test]
    async fn execute_echoes_inputs() {
        let backend = MockBackend::new();
        let target = ExecutionTarget::Operation("op_xkcd_current_comic".into());
        let resp = backend.execute(&target, &Map::new()).await.expect("execute");
        assert!(resp.success);
        assert_eq!(resp.output.expect("output")["api_name"], "xkcd.com");
    }

    #[tokio::test]
    async fn execute_kind_must_match() {
        let backend = MockBackend::new();
        let target = ExecutionTarget::Workflow("op_xkcd_current_comic".into());
        assert!(backend.execute(&target, &Map::new()).await.is_err());
    }

    #[tokio::test]
    async fn feedback_is_recorded() {
        let backend = MockBackend::new();
        let mut fb = Map::new();
        fb.insert("uuid".into(), json!("t1"));
        backend.submit_feedback(&fb).await.expect("submit");
        assert_eq!(backend.feedback_records(), vec![fb]);
    }

    #[tokio::test]
    async fn feedback_keeps_only_the_latest_records() {
        let backend = MockBackend::new();
        for i in 0..FEEDBACK_CAPACITY + 10 {
            let mut fb = Map::new();
            fb.insert("seq".into(), json!(i));
            backend.submit_feedback(&fb).await.expect("submit");
        }
        let records = backend.feedback_records();
        assert_eq!(records.len(), FEEDBACK_CAPACITY);
        assert_eq!(records[0]["seq"], 10);
        assert_eq!(records[FEEDBACK_CAPACITY - 1]["seq"], FEEDBACK_CAPACITY + 9);
    }
}
