//! Knowledge base locations inside the workspace.

use std::path::{Path, PathBuf};

/// Directory holding the passage store.
pub fn get_knowledge_dir(workspace: &Path) -> PathBuf {
    workspace.join(".tutor").join("knowledge")
}

/// Get the SQLite store path.
pub fn get_index_path(workspace: &Path) -> PathBuf {
    get_knowledge_dir(workspace).join("index.sqlite")
}
