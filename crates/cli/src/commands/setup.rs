//! Wiring shared by the commands: providers, knowledge base and pipeline.

use std::path::PathBuf;
use std::time::Duration;
use tutor_core::{config::AppConfig, AppError, AppResult};
use tutor_knowledge::{
    create_provider, AnswerResult, EmbeddingConfig, KnowledgeBase, Pipeline, Retriever,
    SessionState,
};
use tutor_llm::create_client;
use tutor_prompt::{load_templates, PromptBuilder};

/// Where the one-shot `ask` command keeps the conversation between runs.
pub fn session_path(config: &AppConfig) -> PathBuf {
    config.tutor_dir().join("session.json")
}

/// Load the knowledge base and pair it with the configured embedding provider.
pub fn build_retriever(config: &AppConfig) -> AppResult<Retriever> {
    let kb = KnowledgeBase::open(&config.workspace)?;
    let dimensions = kb
        .dimensions()
        .unwrap_or(EmbeddingConfig::default().dimensions);

    let embedding_config = EmbeddingConfig::from_app_config(config, dimensions);
    let api_key = config.resolve_api_key(&embedding_config.provider);
    let embedder = create_provider(&embedding_config, api_key.as_deref())?;

    tracing::debug!(
        "Embedding with {} ({}) over {} passages",
        embedder.provider_name(),
        embedder.model_name(),
        kb.len()
    );

    kb.into_retriever(embedder)
}

/// Build the answering pipeline from configuration.
pub fn build_pipeline(config: &AppConfig) -> AppResult<Pipeline> {
    config.validate()?;

    let endpoint = config.endpoint_for(&config.provider);
    let api_key = config.resolve_api_key(&config.provider);
    let client = create_client(
        &config.provider,
        endpoint.as_deref(),
        api_key.as_deref(),
        Some(Duration::from_secs(config.timeout_secs)),
    )?;

    let retriever = build_retriever(config)?;
    let templates = load_templates(&config.tutor_dir())?;
    let prompts = PromptBuilder::new(&templates)?;

    if config.course.class_name.is_empty() {
        tracing::warn!("No course metadata configured; prompts will name no class");
    }

    Ok(Pipeline::new(
        client,
        config.model.clone(),
        retriever,
        prompts,
        config.course.clone(),
    ))
}

/// Answer one question within `timeout_secs`.
///
/// `session` is only updated when the turn completes; a failed or timed-out
/// turn leaves it as it was.
pub async fn answer_turn(
    pipeline: &Pipeline,
    question: &str,
    session: &mut SessionState,
    timeout_secs: u64,
) -> AppResult<AnswerResult> {
    let mut working = session.clone();

    let result = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        pipeline.answer(question, &mut working),
    )
    .await
    .map_err(|_| AppError::Timeout(timeout_secs))??;

    *session = working;
    Ok(result)
}
