//! Research chat flow
//!
//! This module contains the conversation transcript, citation source
//! handling, and the [`ResearchDesk`] that drives a research turn.

pub mod desk;
pub mod sources;
pub mod transcript;

pub use desk::{ResearchDesk, ResearchEvent, SubmitOutcome};
pub use sources::{sources_from_grounding, GroundingSource, SourceList, DEFAULT_SOURCE_TITLE};
pub use transcript::{ChatMessage, Role, Transcript};
