//! Yes/no judgments delegated to a language model.
//!
//! A judgment is a single deterministic completion capped at a few tokens,
//! read as "yes" when the trimmed, lowercased reply starts with `y`.

use crate::client::{ChatMessage, LlmClient, LlmRequest};
use std::sync::Arc;
use tutor_core::AppResult;

/// Output cap for a yes/no judgment.
pub const JUDGE_MAX_TOKENS: u32 = 5;

/// Interpret a model reply as a boolean verdict.
pub fn parse_verdict(reply: &str) -> bool {
    reply.trim().to_lowercase().starts_with('y')
}

/// Asks a language model closed questions.
#[derive(Clone)]
pub struct Judge {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl Judge {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Ask a yes/no question. Service failures propagate.
    pub async fn ask(&self, messages: Vec<ChatMessage>) -> AppResult<bool> {
        let request = LlmRequest::new(&self.model, messages)
            .with_max_tokens(JUDGE_MAX_TOKENS)
            .with_temperature(0.0);

        let response = self.client.complete(&request).await?;
        let verdict = parse_verdict(&response.content);

        tracing::debug!("Judgment reply {:?} -> {}", response.content, verdict);
        Ok(verdict)
    }

    /// Ask a yes/no question, answering `fallback` when the service fails.
    pub async fn ask_or(&self, messages: Vec<ChatMessage>, fallback: bool) -> bool {
        match self.ask(messages).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!("Judgment call failed, assuming {}: {}", fallback, e);
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LlmResponse;
    use std::sync::Mutex;
    use tutor_core::AppError;

    struct CannedClient {
        reply: Option<String>,
        seen: Mutex<Vec<LlmRequest>>,
    }

    impl CannedClient {
        fn new(reply: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl LlmClient for CannedClient {
        fn provider_name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Some(text) => Ok(LlmResponse {
                    content: text.clone(),
                    model: request.model.clone(),
                    usage: Default::default(),
                }),
                None => Err(AppError::Llm("connection refused".to_string())),
            }
        }
    }

    #[test]
    fn test_parse_verdict() {
        assert!(parse_verdict("Yes"));
        assert!(parse_verdict("  yes."));
        assert!(parse_verdict("YES, it does"));
        assert!(parse_verdict("y"));
        assert!(!parse_verdict("No"));
        assert!(!parse_verdict(""));
        assert!(!parse_verdict("Probably yes"));
        assert!(!parse_verdict("\n"));
    }

    #[tokio::test]
    async fn test_ask_uses_deterministic_short_request() {
        let client = CannedClient::new(Some("Yes"));
        let judge = Judge::new(client.clone(), "gpt-4o-mini");

        let verdict = judge.ask(vec![ChatMessage::user("Is it?")]).await.unwrap();
        assert!(verdict);

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].temperature, Some(0.0));
        assert_eq!(seen[0].max_tokens, Some(JUDGE_MAX_TOKENS));
        assert_eq!(seen[0].model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_ask_propagates_failure() {
        let judge = Judge::new(CannedClient::new(None), "m");
        let result = judge.ask(vec![ChatMessage::user("Is it?")]).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[tokio::test]
    async fn test_ask_or_falls_back() {
        let judge = Judge::new(CannedClient::new(None), "m");
        assert!(!judge.ask_or(vec![ChatMessage::user("?")], false).await);
        assert!(judge.ask_or(vec![ChatMessage::user("?")], true).await);
    }

    #[tokio::test]
    async fn test_ask_or_ignores_fallback_on_success() {
        let judge = Judge::new(CannedClient::new(Some("no")), "m");
        assert!(!judge.ask_or(vec![ChatMessage::user("?")], true).await);
    }
}
