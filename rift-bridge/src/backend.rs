use std::ffi::CStr;

use crate::config::Polar;

/// Raw status word returned by native calls. Only zero vs non-zero carries
/// meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeStatus(pub i32);

impl NativeStatus {
    pub const OK: NativeStatus = NativeStatus(0);

    pub fn is_success(self) -> bool {
        self.0 == 0
    }
}

/// The calls a bridge handle needs from the pipeline library.
///
/// `Session` is the opaque per-bridge reference. `destroy` takes it by
/// value, so a session can only ever be released once.
///
/// Text coming back is copied out as raw bytes; decoding is the handle's
/// job.
pub trait PipelineBackend {
    type Session;

    /// `None` means the factory returned null.
    fn create(&self, polar: Polar) -> Option<Self::Session>;

    fn initialize(&self, session: &mut Self::Session) -> NativeStatus;

    fn execute(&self, session: &mut Self::Session, input: &CStr) -> NativeStatus;

    /// Stage 000 alone. Later stages work on what this leaves behind.
    fn tokenize(&self, session: &mut Self::Session, input: &CStr) -> NativeStatus;

    /// Stage 001.
    fn process(&self, session: &mut Self::Session) -> NativeStatus;

    /// Stage 333.
    fn build_ast(&self, session: &mut Self::Session) -> NativeStatus;

    /// Stage 444.
    fn generate_target(&self, session: &mut Self::Session) -> NativeStatus;

    fn last_error(&self, session: &Self::Session) -> Option<Vec<u8>>;

    fn destroy(&self, session: Self::Session);

    /// Process-wide; needs no session.
    fn version(&self) -> Option<Vec<u8>>;
}
