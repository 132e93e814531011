//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: the marketplace REST API over reqwest, with its middleware
//!   pipeline
//! - **token_store**: persisted session tokens
//!
//! Adapters are thin translators between domain types and wire or file
//! representations. They contain no business logic.

pub mod http;
pub mod token_store;
