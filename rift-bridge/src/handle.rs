use std::ffi::CString;
use std::fmt;

use rift_core::Stage;
use tracing::{debug, error, info, warn};

use crate::backend::{NativeStatus, PipelineBackend};
use crate::config::{BridgeConfig, Polar};
use crate::error::{BridgeError, Result};

/// Returned when the native side has no error text, or text that does not
/// decode.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Observable lifecycle of a bridge handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Initialized,
    Destroyed,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleState::Created => "created",
            LifecycleState::Initialized => "initialized",
            LifecycleState::Destroyed => "destroyed",
        };
        f.write_str(s)
    }
}

/// The session lives inside the live states only, so a destroyed handle has
/// nothing left to release.
enum Lifecycle<S> {
    Created(S),
    Initialized(S),
    Destroyed,
}

impl<S> Lifecycle<S> {
    fn state(&self) -> LifecycleState {
        match self {
            Lifecycle::Created(_) => LifecycleState::Created,
            Lifecycle::Initialized(_) => LifecycleState::Initialized,
            Lifecycle::Destroyed => LifecycleState::Destroyed,
        }
    }

    fn session(&self) -> Option<&S> {
        match self {
            Lifecycle::Created(s) | Lifecycle::Initialized(s) => Some(s),
            Lifecycle::Destroyed => None,
        }
    }

    /// The session, if the handle is ready to run pipeline work.
    fn ready(&mut self, operation: &'static str) -> Result<&mut S> {
        match self {
            Lifecycle::Initialized(s) => Ok(s),
            Lifecycle::Created(_) => Err(BridgeError::InvalidState {
                operation,
                state: LifecycleState::Created,
            }),
            Lifecycle::Destroyed => Err(BridgeError::UseAfterRelease { operation }),
        }
    }

    fn promote(self) -> Self {
        match self {
            Lifecycle::Created(s) | Lifecycle::Initialized(s) => Lifecycle::Initialized(s),
            Lifecycle::Destroyed => Lifecycle::Destroyed,
        }
    }
}

/// Exclusive owner of one native pipeline session.
///
/// Order of use is `create` → `initialize` → `execute_pipeline`* →
/// `release`. Failures never advance the state. `release` is idempotent and
/// also runs from `Drop` if the caller forgets it.
///
/// All mutating calls take `&mut self`; one handle per thread.
pub struct BridgeHandle<B: PipelineBackend> {
    backend: B,
    polar: Polar,
    lifecycle: Lifecycle<B::Session>,
    last_error: Option<String>,
}

impl<B: PipelineBackend> fmt::Debug for BridgeHandle<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeHandle")
            .field("polar", &self.polar)
            .field("state", &self.state())
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl<B: PipelineBackend> BridgeHandle<B> {
    /// Ask the backend for a fresh session. A null session is fatal for this
    /// attempt; there is no handle to release afterwards.
    pub fn create(backend: B, config: &BridgeConfig) -> Result<Self> {
        let Some(session) = backend.create(config.polar) else {
            error!("RIFT bridge factory returned null (polar: {})", config.polar);
            return Err(BridgeError::Creation);
        };

        info!("RIFT bridge created (polar: {})", config.polar);

        Ok(Self {
            backend,
            polar: config.polar,
            lifecycle: Lifecycle::Created(session),
            last_error: None,
        })
    }

    /// `create` with the default config.
    pub fn new(backend: B) -> Result<Self> {
        Self::create(backend, &BridgeConfig::default())
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn polar(&self) -> Polar {
        self.polar
    }

    pub fn is_released(&self) -> bool {
        self.state() == LifecycleState::Destroyed
    }

    /// Error text captured at the most recent native failure.
    pub fn cached_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn initialize(&mut self) -> Result<()> {
        let status = match &mut self.lifecycle {
            Lifecycle::Created(s) | Lifecycle::Initialized(s) => self.backend.initialize(s),
            Lifecycle::Destroyed => {
                return Err(BridgeError::UseAfterRelease {
                    operation: "initialize",
                });
            }
        };

        if !status.is_success() {
            let message = self.capture_error();
            warn!("RIFT bridge initialize failed ({}): {}", status.0, message);
            return Err(BridgeError::Initialization { message });
        }

        let lifecycle = std::mem::replace(&mut self.lifecycle, Lifecycle::Destroyed);
        self.lifecycle = lifecycle.promote();

        info!("RIFT bridge initialized");
        Ok(())
    }

    pub fn execute_pipeline(&mut self, input: &str) -> Result<()> {
        let session = self.lifecycle.ready("execute pipeline")?;
        let input = to_c_input(input)?;

        debug!("Executing RIFT pipeline on {} bytes", input.as_bytes().len());
        let status = self.backend.execute(session, &input);

        if !status.is_success() {
            let message = self.capture_error();
            warn!("RIFT pipeline failed ({}): {}", status.0, message);
            return Err(BridgeError::execution(message));
        }

        Ok(())
    }

    /// Run stage 000 on its own.
    pub fn tokenize(&mut self, input: &str) -> Result<()> {
        let session = self.lifecycle.ready("tokenize")?;
        let input = to_c_input(input)?;
        let status = self.backend.tokenize(session, &input);
        self.finish_stage(Stage::Tokenization, status)
    }

    /// Run stage 001 on the tokens left by `tokenize`.
    pub fn process(&mut self) -> Result<()> {
        let session = self.lifecycle.ready("process")?;
        let status = self.backend.process(session);
        self.finish_stage(Stage::Process, status)
    }

    pub fn build_ast(&mut self) -> Result<()> {
        let session = self.lifecycle.ready("build AST")?;
        let status = self.backend.build_ast(session);
        self.finish_stage(Stage::Ast, status)
    }

    pub fn generate_target(&mut self) -> Result<()> {
        let session = self.lifecycle.ready("generate target")?;
        let status = self.backend.generate_target(session);
        self.finish_stage(Stage::Target, status)
    }

    /// Dispatch to the stage method for `stage`. Only tokenization reads
    /// `input`.
    pub fn run_stage(&mut self, stage: Stage, input: &str) -> Result<()> {
        match stage {
            Stage::Tokenization => self.tokenize(input),
            Stage::Process => self.process(),
            Stage::Ast => self.build_ast(),
            Stage::Target => self.generate_target(),
            Stage::Semantic | Stage::Ir | Stage::Bridge => {
                self.lifecycle.ready("run stage")?;
                Err(BridgeError::UnsupportedStage(stage))
            }
        }
    }

    /// Never fails. On a live handle this asks the native side; on a
    /// released one it returns the last captured text.
    pub fn last_error_message(&self) -> String {
        match self.lifecycle.session() {
            Some(session) => decode_text(self.backend.last_error(session), UNKNOWN_ERROR),
            None => self
                .last_error
                .clone()
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        }
    }

    /// Destroy the native session. Safe to call any number of times.
    pub fn release(&mut self) {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Destroyed) {
            Lifecycle::Created(s) | Lifecycle::Initialized(s) => {
                self.backend.destroy(s);
                info!("RIFT bridge released");
            }
            Lifecycle::Destroyed => {}
        }
    }

    fn finish_stage(&mut self, stage: Stage, status: NativeStatus) -> Result<()> {
        if status.is_success() {
            debug!("RIFT stage {} done", stage);
            return Ok(());
        }

        let message = self.capture_error();
        warn!("RIFT stage {} failed ({}): {}", stage, status.0, message);
        Err(BridgeError::Execution {
            stage: Some(stage),
            message,
        })
    }

    fn capture_error(&mut self) -> String {
        let message = self.last_error_message();
        self.last_error = Some(message.clone());
        message
    }
}

impl<B: PipelineBackend> Drop for BridgeHandle<B> {
    fn drop(&mut self) {
        if !self.is_released() {
            warn!("RIFT bridge dropped without release; releasing now");
            self.release();
        }
    }
}

fn to_c_input(input: &str) -> Result<CString> {
    CString::new(input).map_err(|e| BridgeError::Execution {
        stage: None,
        message: format!("input contains a NUL byte at offset {}", e.nul_position()),
    })
}

/// Boundary text is raw bytes of unknown encoding. Anything that is not
/// valid UTF-8 becomes the sentinel.
pub(crate) fn decode_text(bytes: Option<Vec<u8>>, sentinel: &str) -> String {
    match bytes.map(String::from_utf8) {
        Some(Ok(text)) => text,
        Some(Err(e)) => {
            debug!("Undecodable native text: {}", e);
            sentinel.to_string()
        }
        None => sentinel.to_string(),
    }
}
