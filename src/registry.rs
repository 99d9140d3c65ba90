//! Ownership tracking for live native model handles.
//!
//! The registry is the only place handles live between pipeline steps.
//! Two invariants funnel through it: at most one valid handle per variant,
//! and at most one variant holding a handle across the whole table (loading
//! a variant first releases all others). All mutation goes through
//! [`install`](ModelRegistry::install) and the release methods so a handle
//! is freed exactly once.

use std::collections::HashMap;

use crate::native::{ModelHandle, NativeBackend};
use crate::variant::LanguageVariant;

/// Table of live model handles, keyed by variant.
///
/// Not internally synchronized; callers that share a registry across
/// threads wrap it in a mutex (the pipeline does).
#[derive(Debug, Default)]
pub struct ModelRegistry {
    handles: HashMap<LanguageVariant, ModelHandle>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the live handle for `variant`, if any. No side effects.
    pub fn acquire(&self, variant: LanguageVariant) -> Option<ModelHandle> {
        self.handles.get(&variant).copied()
    }

    /// The variant currently holding a handle, if any.
    pub fn loaded_variant(&self) -> Option<LanguageVariant> {
        self.handles.keys().next().copied()
    }

    /// Store a freshly initialized handle for `variant`.
    ///
    /// Callers must have released every other variant first; installing
    /// over a populated table would break cross-variant exclusivity.
    pub fn install(&mut self, variant: LanguageVariant, handle: ModelHandle) {
        debug_assert!(
            self.handles.is_empty(),
            "install() requires all other handles released first"
        );
        debug_assert!(handle.is_valid(), "install() requires a valid handle");
        log::debug!("installing model handle for {variant}");
        self.handles.insert(variant, handle);
    }

    /// Free `variant`'s handle if present. Idempotent: releasing an absent
    /// entry is a no-op, and the native free is invoked exactly once per
    /// installed handle.
    pub fn release(&mut self, native: &dyn NativeBackend, variant: LanguageVariant) {
        if let Some(handle) = self.handles.remove(&variant) {
            log::debug!("freeing model handle for {variant}");
            native.free(handle);
        }
    }

    /// Release every variant except `keep`. Used when switching the target
    /// variant before loading it.
    pub fn release_all_except(&mut self, native: &dyn NativeBackend, keep: LanguageVariant) {
        let others: Vec<LanguageVariant> = self
            .handles
            .keys()
            .copied()
            .filter(|v| *v != keep)
            .collect();
        for variant in others {
            self.release(native, variant);
        }
    }

    /// Release everything. Called on pipeline shutdown after the worker has
    /// drained, so no handle is freed while still in use.
    pub fn release_all(&mut self, native: &dyn NativeBackend) {
        let all: Vec<LanguageVariant> = self.handles.keys().copied().collect();
        for variant in all {
            self.release(native, variant);
        }
    }
}
