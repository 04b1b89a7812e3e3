//! Backend that calls into the `rift_pipeline` shared library.
//!
//! Only compiled with the `native` feature, since it needs the library at
//! link time.

use std::ffi::{CStr, c_char};
use std::ptr::NonNull;

use crate::backend::{NativeStatus, PipelineBackend};
use crate::config::Polar;

mod sys {
    use std::ffi::{c_char, c_int};

    /// Opaque `RiftBridge` struct owned by the library.
    #[repr(C)]
    pub struct RiftBridge {
        _private: [u8; 0],
    }

    #[link(name = "rift_pipeline")]
    unsafe extern "C" {
        pub fn riftbridge_create(polar: c_int) -> *mut RiftBridge;
        pub fn riftbridge_initialize(bridge: *mut RiftBridge) -> c_int;
        pub fn riftbridge_execute_pipeline(bridge: *mut RiftBridge, input: *const c_char) -> c_int;
        pub fn riftbridge_tokenize(bridge: *mut RiftBridge, input: *const c_char) -> c_int;
        pub fn riftbridge_process(bridge: *mut RiftBridge) -> c_int;
        pub fn riftbridge_build_ast(bridge: *mut RiftBridge) -> c_int;
        pub fn riftbridge_generate_target(bridge: *mut RiftBridge) -> c_int;
        pub fn riftbridge_get_error_cs(bridge: *mut RiftBridge) -> *const c_char;
        pub fn riftbridge_destroy(bridge: *mut RiftBridge);
        pub fn riftbridge_version_string() -> *const c_char;
    }
}

/// A live `RiftBridge*`. Never null, never copied.
#[derive(Debug)]
pub struct NativeSession(NonNull<sys::RiftBridge>);

// The library keeps no thread-local state per bridge, so moving ownership to
// another thread is fine. Shared access is not, hence no `Sync`.
unsafe impl Send for NativeSession {}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

/// Copy a NUL-terminated string out of library memory.
///
/// # Safety
/// `ptr` must be null or point at a NUL-terminated buffer that stays valid
/// for the duration of this call.
unsafe fn copy_text(ptr: *const c_char) -> Option<Vec<u8>> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_bytes().to_vec())
}

impl PipelineBackend for NativeBackend {
    type Session = NativeSession;

    fn create(&self, polar: Polar) -> Option<NativeSession> {
        // SAFETY: takes a plain integer; a null result is handled by `NonNull::new`.
        let raw = unsafe { sys::riftbridge_create(polar.raw()) };
        NonNull::new(raw).map(NativeSession)
    }

    fn initialize(&self, session: &mut NativeSession) -> NativeStatus {
        // SAFETY: the session pointer is non-null and not yet destroyed; `destroy`
        // consumes it.
        NativeStatus(unsafe { sys::riftbridge_initialize(session.0.as_ptr()) })
    }

    fn execute(&self, session: &mut NativeSession, input: &CStr) -> NativeStatus {
        // SAFETY: live session as above; `input` is a NUL-terminated buffer
        // borrowed for the whole call.
        NativeStatus(unsafe { sys::riftbridge_execute_pipeline(session.0.as_ptr(), input.as_ptr()) })
    }

    fn tokenize(&self, session: &mut NativeSession, input: &CStr) -> NativeStatus {
        // SAFETY: live session; `input` outlives the call.
        NativeStatus(unsafe { sys::riftbridge_tokenize(session.0.as_ptr(), input.as_ptr()) })
    }

    fn process(&self, session: &mut NativeSession) -> NativeStatus {
        // SAFETY: live session.
        NativeStatus(unsafe { sys::riftbridge_process(session.0.as_ptr()) })
    }

    fn build_ast(&self, session: &mut NativeSession) -> NativeStatus {
        // SAFETY: live session.
        NativeStatus(unsafe { sys::riftbridge_build_ast(session.0.as_ptr()) })
    }

    fn generate_target(&self, session: &mut NativeSession) -> NativeStatus {
        // SAFETY: live session.
        NativeStatus(unsafe { sys::riftbridge_generate_target(session.0.as_ptr()) })
    }

    fn last_error(&self, session: &NativeSession) -> Option<Vec<u8>> {
        // SAFETY: live session. The error buffer lives inside the bridge
        // struct, so it is copied before anything else touches the session.
        unsafe { copy_text(sys::riftbridge_get_error_cs(session.0.as_ptr())) }
    }

    fn destroy(&self, session: NativeSession) {
        // SAFETY: the session is taken by value, so this pointer is freed once
        // and never used again.
        unsafe { sys::riftbridge_destroy(session.0.as_ptr()) }
    }

    fn version(&self) -> Option<Vec<u8>> {
        // SAFETY: returns null or a static NUL-terminated string.
        unsafe { copy_text(sys::riftbridge_version_string()) }
    }
}

/// Version of the linked library, or `"Unknown"`.
pub fn version() -> String {
    crate::version::version(&NativeBackend)
}
