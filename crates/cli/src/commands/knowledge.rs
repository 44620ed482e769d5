//! Knowledge command handler.
//!
//! Imports embedded course passages and inspects the local store.

use crate::commands::setup::build_retriever;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tutor_core::{config::AppConfig, AppResult};

/// Course knowledge base management
#[derive(Args, Debug)]
pub struct KnowledgeCommand {
    #[command(subcommand)]
    pub action: KnowledgeAction,
}

#[derive(Subcommand, Debug)]
pub enum KnowledgeAction {
    /// Import embedded passages from a JSON file
    Import(KnowledgeImportCommand),
    /// Show knowledge base statistics
    Stats(KnowledgeStatsCommand),
    /// Show the passages retrieved for a text
    Search(KnowledgeSearchCommand),
}

impl KnowledgeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            KnowledgeAction::Import(cmd) => cmd.execute(config),
            KnowledgeAction::Stats(cmd) => cmd.execute(config),
            KnowledgeAction::Search(cmd) => cmd.execute(config).await,
        }
    }
}

/// Import embedded passages
#[derive(Args, Debug)]
pub struct KnowledgeImportCommand {
    /// JSON array of {filename, chunk_index, chunk_text, embedding} records
    pub file: PathBuf,

    /// Reset the knowledge base before importing
    #[arg(long)]
    pub reset: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeImportCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing knowledge import from {:?}", self.file);

        let stats = tutor_knowledge::import_records(&config.workspace, &self.file, self.reset)?;

        if self.json {
            let output = serde_json::json!({
                "passagesImported": stats.passages_imported,
                "passagesTotal": stats.passages_total,
                "dimensions": stats.dimensions,
                "durationSecs": stats.duration_secs,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!(
                "Imported {} passages ({} total, {} dimensions) in {:.2}s",
                stats.passages_imported, stats.passages_total, stats.dimensions, stats.duration_secs
            );
        }

        Ok(())
    }
}

/// Show knowledge base stats
#[derive(Args, Debug)]
pub struct KnowledgeStatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeStatsCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing knowledge stats command");

        let stats = tutor_knowledge::get_stats(&config.workspace)?;

        if self.json {
            let output = serde_json::json!({
                "passagesCount": stats.passages_count,
                "filesCount": stats.files_count,
                "dimensions": stats.dimensions,
                "dbSizeBytes": stats.db_size_bytes,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Knowledge base");
            println!("  Passages:   {}", stats.passages_count);
            println!("  Files:      {}", stats.files_count);
            match stats.dimensions {
                Some(dimensions) => println!("  Dimensions: {}", dimensions),
                None => println!("  Dimensions: (empty)"),
            }
            println!("  Size:       {:.2} KB", stats.db_size_bytes as f64 / 1024.0);
        }

        Ok(())
    }
}

/// Show retrieved passages
#[derive(Args, Debug)]
pub struct KnowledgeSearchCommand {
    /// Text to search for
    pub query: String,

    /// Number of passages to retrieve
    #[arg(short = 'k', long, default_value = "3")]
    pub top_k: usize,
}

impl KnowledgeSearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing knowledge search (k={})", self.top_k);

        let retriever = build_retriever(config)?;
        let found = retriever.nearest(&self.query, self.top_k).await?;

        if found.is_empty() {
            println!("No passages found.");
        }
        for (rank, (passage, distance)) in found.iter().enumerate() {
            println!(
                "[{}] {} #{} (distance {:.4})",
                rank + 1,
                passage.filename,
                passage.chunk_index,
                distance
            );
            println!("{}\n", passage.chunk_text.trim());
        }

        Ok(())
    }
}
