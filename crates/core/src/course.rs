//! Course metadata used to frame prompts and classification questions.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AppError, AppResult};

const DEFAULT_ASSISTANT_NAME: &str = "AI Assistant";

/// Descriptive metadata for the course the tutor serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    #[serde(rename = "className", default)]
    pub class_name: String,

    #[serde(default)]
    pub professor: String,

    /// Teaching assistants, free text (e.g. "Ana and Luis")
    #[serde(default)]
    pub assistants: String,

    #[serde(rename = "classDescription", default)]
    pub class_description: String,

    /// Extra instructions from the course staff (not used by the built-in templates)
    #[serde(default)]
    pub instructions: String,

    /// Persona the tutor answers as
    #[serde(rename = "assistantName", default = "default_assistant_name")]
    pub assistant_name: String,
}

fn default_assistant_name() -> String {
    DEFAULT_ASSISTANT_NAME.to_string()
}

impl Default for CourseInfo {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            professor: String::new(),
            assistants: String::new(),
            class_description: String::new(),
            instructions: String::new(),
            assistant_name: default_assistant_name(),
        }
    }
}

impl CourseInfo {
    /// Parse legacy `key=value` settings text.
    ///
    /// Blank lines and lines without `=` are ignored, keys and values are
    /// trimmed, and only the first `=` splits a line. Unknown keys are ignored.
    pub fn from_settings_str(contents: &str) -> Self {
        let mut info = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().to_string();

            match key.trim() {
                "classname" => info.class_name = value,
                "professor" => info.professor = value,
                "assistants" => info.assistants = value,
                "classdescription" => info.class_description = value,
                "instructions" => info.instructions = value,
                "assistantname" => info.assistant_name = value,
                other => tracing::debug!("Ignoring unknown settings key '{}'", other),
            }
        }

        info
    }

    /// Read a legacy `settings.txt` file.
    pub fn load_settings_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read settings file {:?}: {}", path, e))
        })?;
        Ok(Self::from_settings_str(&contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_parsing() {
        let text = "\
classname = CS 101
professor=Dr. Rivera

not a setting
assistants= Ana and Luis
classdescription=Intro to programming = fun
assistantname=Ada
";
        let info = CourseInfo::from_settings_str(text);
        assert_eq!(info.class_name, "CS 101");
        assert_eq!(info.professor, "Dr. Rivera");
        assert_eq!(info.assistants, "Ana and Luis");
        assert_eq!(info.class_description, "Intro to programming = fun");
        assert_eq!(info.assistant_name, "Ada");
        assert_eq!(info.instructions, "");
    }

    #[test]
    fn test_assistant_name_default() {
        let info = CourseInfo::from_settings_str("classname=Algorithms");
        assert_eq!(info.assistant_name, "AI Assistant");
    }

    #[test]
    fn test_yaml_defaults() {
        let info: CourseInfo = serde_yaml::from_str("className: Algorithms").unwrap();
        assert_eq!(info.class_name, "Algorithms");
        assert_eq!(info.assistant_name, "AI Assistant");
    }

    #[test]
    fn test_load_missing_settings_file() {
        let result = CourseInfo::load_settings_file(Path::new("/nonexistent/settings.txt"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
