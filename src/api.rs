use crate::config::get_config;
use crate::errors::{DeskchatError, DeskchatResult};
use crate::logging::log_api_call;
use crate::models::ApiCallLog;
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

/// Reply extracted from the support endpoint's JSON body.
#[derive(Debug, Clone)]
pub struct BotReply {
    pub content: String,
}

/// Builds the HTTP client used for every chat request.
pub fn build_client() -> DeskchatResult<Client> {
    let config = get_config();

    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| DeskchatError::api_error(format!("failed to build http client: {}", e)))
}

/// Sends one user message and returns the bot's reply.
///
/// The HTTP status is recorded but not consulted: any response whose body
/// parses to a JSON object with a string `response` field counts as a reply.
pub async fn send_chat(client: &Client, endpoint: &str, message: &str) -> DeskchatResult<BotReply> {
    let payload = json!({ "message": message });
    let started = Instant::now();

    let response = client
        .post(endpoint)
        .json(&payload)
        .send()
        .await
        .map_err(|e| DeskchatError::api_error(format!("request failed: {}", e)))?;

    let status = response.status();

    let body: Value = response
        .json()
        .await
        .map_err(|e| DeskchatError::api_error(format!("failed to parse reply: {}", e)))?;

    log_api_call(&ApiCallLog {
        timestamp: Utc::now(),
        endpoint: endpoint.to_string(),
        request_summary: summarize(message),
        response_status: status.as_u16(),
        response_time_ms: started.elapsed().as_millis(),
    });

    let content = body["response"]
        .as_str()
        .ok_or_else(|| DeskchatError::api_error("reply is missing the `response` field"))?
        .to_string();

    Ok(BotReply { content })
}

fn summarize(message: &str) -> String {
    if message.chars().count() > 60 {
        let head: String = message.chars().take(60).collect();
        format!("{}...", head)
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint_of(server: &MockServer) -> String {
        format!("{}/api/chat", server.uri())
    }

    #[tokio::test]
    async fn chat_reply_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "message": "hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Hi there" })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = send_chat(&Client::new(), &endpoint_of(&server), "hello")
            .await
            .unwrap();

        assert_eq!(reply.content, "Hi there");
    }

    #[tokio::test]
    async fn non_2xx_body_is_still_parsed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "response": "degraded mode" })),
            )
            .mount(&server)
            .await;

        let reply = send_chat(&Client::new(), &endpoint_of(&server), "hello")
            .await
            .unwrap();

        assert_eq!(reply.content, "degraded mode");
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = send_chat(&Client::new(), &endpoint_of(&server), "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, DeskchatError::Api(_)));
    }

    #[tokio::test]
    async fn missing_response_field_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "nope" })))
            .mount(&server)
            .await;

        let err = send_chat(&Client::new(), &endpoint_of(&server), "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, DeskchatError::Api(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_an_error() {
        let server = MockServer::start().await;
        let endpoint = endpoint_of(&server);
        drop(server);

        let err = send_chat(&Client::new(), &endpoint, "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, DeskchatError::Api(_)));
    }
}
