//! Shared types for the relay bot
//!
//! This crate provides the common types used across the message
//! pipeline and the completion client: incoming messages, per-user
//! session state, pipeline outcomes, and the traits the pipeline
//! calls its external collaborators through.

pub mod message;
pub mod outcome;
pub mod session;
pub mod traits;

// Re-export commonly used types
pub use message::IncomingMessage;
pub use outcome::{PipelineResult, RejectReason, ValidationOutcome};
pub use session::UserSession;
pub use traits::{ChatTransport, CompletionClient, SendOutcome};
