//! SQLite persistence for embedded passages.

use crate::types::{KnowledgeStats, Passage};
use rusqlite::{params, Connection};
use std::path::Path;
use tutor_core::{AppError, AppResult};

/// Initialize the SQLite passage database.
pub fn init_store(db_path: &Path) -> AppResult<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::Knowledge(format!("Failed to create knowledge directory: {}", e))
        })?;
    }

    let conn = Connection::open(db_path)
        .map_err(|e| AppError::Knowledge(format!("Failed to open SQLite store: {}", e)))?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS passages (
            position INTEGER PRIMARY KEY,
            filename TEXT NOT NULL,
            chunk_index INTEGER NOT NULL,
            chunk_text TEXT NOT NULL,
            embedding BLOB NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_passages_file ON passages(filename);
        "#,
    )
    .map_err(|e| AppError::Knowledge(format!("Failed to create tables: {}", e)))?;

    tracing::debug!("Initialized SQLite store at {:?}", db_path);
    Ok(conn)
}

/// Number of passages stored.
pub fn count_passages(conn: &Connection) -> AppResult<u32> {
    conn.query_row("SELECT COUNT(*) FROM passages", [], |row| {
        row.get::<_, i64>(0).map(|v| v as u32)
    })
    .map_err(|e| AppError::Knowledge(format!("Failed to count passages: {}", e)))
}

/// Embedding dimension of the stored passages, if any exist.
pub fn stored_dimensions(conn: &Connection) -> AppResult<Option<usize>> {
    let mut stmt = conn
        .prepare("SELECT length(embedding) FROM passages ORDER BY position LIMIT 1")
        .map_err(|e| AppError::Knowledge(format!("Failed to prepare query: {}", e)))?;
    let mut rows = stmt
        .query([])
        .map_err(|e| AppError::Knowledge(format!("Failed to query dimensions: {}", e)))?;

    match rows
        .next()
        .map_err(|e| AppError::Knowledge(format!("Failed to read dimensions: {}", e)))?
    {
        Some(row) => {
            let bytes: i64 = row
                .get(0)
                .map_err(|e| AppError::Knowledge(format!("Failed to read dimensions: {}", e)))?;
            Ok(Some(bytes as usize / 4))
        }
        None => Ok(None),
    }
}

/// Append a passage at the next free position and return that position.
pub fn insert_passage(conn: &Connection, passage: &Passage, embedding: &[f32]) -> AppResult<i64> {
    let position = count_passages(conn)? as i64;

    conn.execute(
        "INSERT INTO passages (position, filename, chunk_index, chunk_text, embedding)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            position,
            passage.filename,
            passage.chunk_index as i64,
            passage.chunk_text,
            embedding_to_bytes(embedding),
        ],
    )
    .map_err(|e| AppError::Knowledge(format!("Failed to insert passage: {}", e)))?;

    Ok(position)
}

/// Load every passage with its embedding, ordered by position.
pub fn load_all(conn: &Connection) -> AppResult<Vec<(Passage, Vec<f32>)>> {
    let mut stmt = conn
        .prepare(
            "SELECT filename, chunk_index, chunk_text, embedding FROM passages ORDER BY position",
        )
        .map_err(|e| AppError::Knowledge(format!("Failed to prepare query: {}", e)))?;

    let rows = stmt
        .query_map([], |row| {
            let bytes: Vec<u8> = row.get(3)?;
            Ok((
                Passage {
                    filename: row.get(0)?,
                    chunk_index: row.get::<_, i64>(1)? as u32,
                    chunk_text: row.get(2)?,
                },
                bytes,
            ))
        })
        .map_err(|e| AppError::Knowledge(format!("Failed to query passages: {}", e)))?;

    let mut passages = Vec::new();
    for row in rows {
        let (passage, bytes) =
            row.map_err(|e| AppError::Knowledge(format!("Failed to read passage: {}", e)))?;
        passages.push((passage, bytes_to_embedding(&bytes)?));
    }
    Ok(passages)
}

/// Get statistics for the store.
pub fn get_stats(conn: &Connection, db_path: &Path) -> AppResult<KnowledgeStats> {
    let passages_count = count_passages(conn)?;

    let files_count: u32 = conn
        .query_row("SELECT COUNT(DISTINCT filename) FROM passages", [], |row| {
            row.get::<_, i64>(0).map(|v| v as u32)
        })
        .map_err(|e| AppError::Knowledge(format!("Failed to count files: {}", e)))?;

    let db_size_bytes = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    Ok(KnowledgeStats {
        passages_count,
        files_count,
        dimensions: stored_dimensions(conn)?,
        db_size_bytes,
    })
}

/// Reset the store (delete all passages).
pub fn reset_store(conn: &Connection) -> AppResult<()> {
    conn.execute("DELETE FROM passages", [])
        .map_err(|e| AppError::Knowledge(format!("Failed to delete passages: {}", e)))?;

    tracing::info!("Reset passage store");
    Ok(())
}

/// Convert embedding vector to little-endian bytes for storage.
fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for &value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Convert bytes back to embedding vector.
fn bytes_to_embedding(bytes: &[u8]) -> AppResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(AppError::Knowledge(
            "Invalid embedding bytes length".to_string(),
        ));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
