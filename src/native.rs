//! The opaque native capability surface.
//!
//! The actual GPT-SoVITS inference math lives in a prebuilt native library
//! reached through four calls: init, reference conditioning, inference and
//! free. This module models that boundary as a trait so the pipeline can be
//! driven by the real bindings in production and by scripted backends in
//! tests. Handles are opaque integers owned by the
//! [registry](crate::registry::ModelRegistry); `0` means "no model".

use std::path::Path;

use crate::assets::ModelPaths;

/// Raw handle value as it crosses the native boundary.
pub type RawHandle = u64;

/// The reserved value the native init call returns on failure.
pub const INVALID_HANDLE: RawHandle = 0;

/// An opaque reference to a loaded native model instance.
///
/// A handle is only meaningful to the backend that produced it. At most one
/// valid handle exists per variant, and the registry is its sole owner; no
/// other code may free it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(RawHandle);

impl ModelHandle {
    /// Wrap a raw value as returned by the native init call.
    pub fn from_raw(raw: RawHandle) -> Self {
        ModelHandle(raw)
    }

    /// The sentinel handle denoting absence.
    pub fn invalid() -> Self {
        ModelHandle(INVALID_HANDLE)
    }

    pub fn is_valid(self) -> bool {
        self.0 != INVALID_HANDLE
    }

    /// The raw value to pass back across the native boundary.
    pub fn raw(self) -> RawHandle {
        self.0
    }
}

/// The four-call native inference capability.
///
/// Implementations must be callable from the worker thread; the pipeline
/// guarantees no two of these calls are ever in flight simultaneously, so
/// implementations need no internal serialization of their own.
pub trait NativeBackend: Send + Sync {
    /// Initialize a model from the eight staged asset paths.
    ///
    /// Returns [`ModelHandle::invalid`] on failure.
    fn init(&self, models: &ModelPaths) -> ModelHandle;

    /// Prime a loaded model with a reference clip and its transcript.
    ///
    /// Returns `false` on failure; the handle itself stays usable only for
    /// freeing afterwards.
    fn condition_reference(
        &self,
        handle: ModelHandle,
        reference_audio: &Path,
        reference_text: &str,
        lang_id: u64,
    ) -> bool;

    /// Synthesize raw audio samples from text. `None` signals failure.
    fn infer(&self, handle: ModelHandle, text: &str, lang_id: u64) -> Option<Vec<f32>>;

    /// Release a model instance. Assumed non-failing; never called twice
    /// for the same handle.
    fn free(&self, handle: ModelHandle);
}
