//! # RIFT Bridge
//!
//! Owned-handle access to the native RIFT pipeline.
//! One `BridgeHandle` owns one native session and walks it through
//! create → initialize → execute → release, turning native status codes
//! into `BridgeError`s on the way.
//!
//! The native calls sit behind `PipelineBackend`; enable the `native`
//! feature to link the real `rift_pipeline` library.

pub mod backend;
pub mod config;
pub mod deadline;
pub mod error;
pub mod handle;
#[cfg(feature = "native")]
pub mod native;
pub mod version;

pub use backend::{NativeStatus, PipelineBackend};
pub use config::{BridgeConfig, Polar};
pub use deadline::{Deadline, execute_with_deadline};
pub use error::{BridgeError, Result};
pub use handle::{BridgeHandle, LifecycleState, UNKNOWN_ERROR};
#[cfg(feature = "native")]
pub use native::{NativeBackend, NativeSession};
pub use version::{BridgeVersion, UNKNOWN_VERSION, version};
