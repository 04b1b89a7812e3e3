//! # RIFT Core
//!
//! The data model shared by everything that talks to the RIFT pipeline:
//! token triplets and their validation bits, the hex pattern matcher,
//! pipeline stage identifiers, and the replica consensus check.

pub mod consensus;
pub mod pattern;
pub mod stage;
pub mod token;

// Re-export the common types so users can just use `rift_core::TokenTriplet`
pub use consensus::Replicas;
pub use pattern::{CaptureBinding, HexMatch, HexMatcher, PatternCapture, PatternDescriptor};
pub use stage::Stage;
pub use token::{TokenError, TokenMemory, TokenState, TokenTriplet, TokenType, TokenValue, ValidationBits};
