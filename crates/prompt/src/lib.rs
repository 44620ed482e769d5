//! Prompt system for the course tutor.
//!
//! This crate provides:
//! - The question `Category` that selects an instruction template
//! - Handlebars template rendering into a `PromptSpec`
//! - Workspace overrides for the built-in templates

pub mod builder;
pub mod loader;
pub mod templates;
pub mod types;

// Re-export main types
pub use builder::{PromptBuilder, CONTEXT_HEADER};
pub use loader::load_templates;
pub use templates::PromptTemplates;
pub use types::{Category, PromptSpec, PromptTemplate};
