//! mnemo-core — domain types and trait seams for the mnemo agent.
//!
//! This crate holds the value objects and collaborator traits shared by the
//! rest of the workspace: messages, tools, the model transport, the retriever
//! seam, the agent identity, and the error tree.

pub mod error;
pub mod identity;
pub mod message;
pub mod provider;
pub mod retriever;
pub mod tool;

pub use error::{Error, Result};
pub use identity::Identity;
pub use message::{Message, Role};
pub use provider::Provider;
pub use retriever::{RetrievedDocument, Retriever};
pub use tool::{Tool, ToolRegistry};
