/**
 * Music Generation Client
 *
 * Wraps the external music-generation API: one POST to `<base>/music`
 * with an `x-api-key` header turns a text prompt into a generated track
 * (audio URL, cover image URL, title, lyrics, tags).
 *
 * The call is synchronous from the caller's point of view: no retries,
 * no timeout beyond the transport default. A slow provider blocks the
 * enclosing request — and, during diary creation, the enclosing database
 * transaction. That trade-off buys the 1:1 diary/music invariant.
 *
 * Base URL and API key are injected at construction, never read from the
 * environment per call, so tests can point the client at a local mock.
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure modes of a generation call. All of them abort the enclosing
/// diary-creation transaction.
#[derive(Debug, Error)]
pub enum MusicError {
    /// Network-level failure reaching the provider
    #[error("music API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status
    #[error("music API returned status {0}")]
    Status(u16),

    /// Provider answered 2xx but the body was not the expected JSON
    #[error("music API response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// Provider answered with an empty result list
    #[error("music API returned no results")]
    Empty,
}

/// Request body of the generation endpoint. `is_auto` and `instrumental`
/// are 0/1 integers on the wire, matching the provider's format.
#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    is_auto: i32,
    prompt: &'a str,
    lyrics: &'a str,
    title: &'a str,
    instrumental: i32,
}

/// Response body of the generation endpoint.
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedTrack>,
}

/// One generated track as returned by the provider. The first item of
/// the response is the canonical artifact for a diary entry.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedTrack {
    pub audio_file: String,
    pub image_file: String,
    pub item_uuid: String,
    pub title: String,
    pub lyric: String,
    #[serde(default)]
    pub tags: String,
}

/// Client for the external music-generation API.
#[derive(Clone)]
pub struct MusicClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl MusicClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http: reqwest::Client::new(),
        }
    }

    /// Generate a track from a text prompt.
    ///
    /// # Arguments
    ///
    /// * `prompt` - Free text driving the generation (the diary content)
    /// * `is_auto` - 1 to let the provider derive title and lyrics
    /// * `instrumental` - 1 for an instrumental-only track
    ///
    /// # Errors
    ///
    /// `MusicError` for transport failure, non-2xx status, an undecodable
    /// body, or an empty result list.
    pub async fn generate(
        &self,
        prompt: &str,
        is_auto: i32,
        instrumental: i32,
    ) -> Result<GeneratedTrack, MusicError> {
        let body = GenerationRequest {
            is_auto,
            prompt,
            lyrics: "",
            title: "",
            instrumental,
        };

        tracing::debug!("Requesting music generation ({} prompt chars)", prompt.len());

        let response = self
            .http
            .post(format!("{}/music", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Music API returned status {}", status);
            return Err(MusicError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let parsed: GenerationResponse =
            serde_json::from_str(&text).map_err(MusicError::Decode)?;

        parsed.data.into_iter().next().ok_or(MusicError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "status": 200,
            "message": "Success",
            "data": [{
                "audio_file": "https://files.example.com/audio.mp3",
                "image_file": "https://files.example.com/image.png",
                "item_uuid": "be2151dc-cbff-4be6-ab1b-afa02ea772f1",
                "title": "Morning Walk",
                "lyric": "la la la",
                "tags": "uplifting, pop"
            }]
        })
    }

    #[tokio::test]
    async fn generate_returns_first_track() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/music"))
            .and(header("x-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let client = MusicClient::new(server.uri(), "test-key".to_string());
        let track = client.generate("a sunny day", 1, 0).await.unwrap();

        assert_eq!(track.title, "Morning Walk");
        assert_eq!(track.item_uuid, "be2151dc-cbff-4be6-ab1b-afa02ea772f1");
        assert_eq!(track.tags, "uplifting, pop");
    }

    #[tokio::test]
    async fn non_2xx_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/music"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = MusicClient::new(server.uri(), "test-key".to_string());
        let err = client.generate("prompt", 1, 0).await.unwrap_err();
        assert!(matches!(err, MusicError::Status(429)));
    }

    #[tokio::test]
    async fn empty_data_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/music"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": 200,
                "message": "Success",
                "data": []
            })))
            .mount(&server)
            .await;

        let client = MusicClient::new(server.uri(), "test-key".to_string());
        let err = client.generate("prompt", 1, 0).await.unwrap_err();
        assert!(matches!(err, MusicError::Empty));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/music"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = MusicClient::new(server.uri(), "test-key".to_string());
        let err = client.generate("prompt", 1, 0).await.unwrap_err();
        assert!(matches!(err, MusicError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        // Port 1 is never listening
        let client = MusicClient::new("http://127.0.0.1:1".to_string(), "k".to_string());
        let err = client.generate("prompt", 1, 0).await.unwrap_err();
        assert!(matches!(err, MusicError::Transport(_)));
    }
}
