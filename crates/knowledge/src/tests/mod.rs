//! Pipeline and knowledge base tests against in-memory services.

mod support;
