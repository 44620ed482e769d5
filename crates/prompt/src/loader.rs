//! Loader for workspace prompt overrides.

use crate::templates::PromptTemplates;
use crate::types::{Category, PromptTemplate};
use std::path::{Path, PathBuf};
use tutor_core::{AppError, AppResult};

/// Path of the override file for a category.
pub fn override_path(tutor_dir: &Path, category: Category) -> PathBuf {
    tutor_dir
        .join("prompts")
        .join(format!("{}.yml", category.as_str()))
}

/// Load the template set, applying any overrides found in `<tutor_dir>/prompts/`.
///
/// Each category may be overridden by `<category>.yml` holding `instructions`
/// and an optional `user` template. Missing files keep the built-in template.
///
/// # Example
/// ```no_run
/// use tutor_prompt::load_templates;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let templates = load_templates(Path::new(".tutor"))?;
/// println!("{}", templates.normal.instructions);
/// # Ok(())
/// # }
/// ```
pub fn load_templates(tutor_dir: &Path) -> AppResult<PromptTemplates> {
    let mut templates = PromptTemplates::default();

    for category in Category::ALL {
        let path = override_path(tutor_dir, category);
        if !path.exists() {
            continue;
        }

        tracing::debug!("Loading prompt override from: {:?}", path);

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e))
        })?;

        let template: PromptTemplate = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e))
        })?;

        if template.instructions.trim().is_empty() {
            return Err(AppError::Prompt(format!(
                "Prompt override {:?} has empty instructions",
                path
            )));
        }

        tracing::info!("Using prompt override for '{}'", category);
        templates.set(category, template);
    }

    Ok(templates)
}
