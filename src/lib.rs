//! # sovits-tts
//!
//! Core pipeline for a GPT-SoVITS speech-synthesis app: model-session
//! lifecycle, serialized load/condition/infer orchestration, and binary WAV
//! output. The native inference math is out of scope and reached only
//! through the opaque [`NativeBackend`] capability surface.
//!
//! ## Features
//!
//! - **One live model at a time**: the registry enforces cross-variant
//!   exclusivity and frees native handles exactly once.
//! - **Serialized native calls**: a single worker thread runs every
//!   submission end to end; init, conditioning, inference and free are
//!   never in flight concurrently.
//! - **Deterministic WAV output**: byte-exact 16-bit mono containers at the
//!   vocoder's 32 kHz rate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sovits_tts::{
//!     LanguageVariant, NativeBackend, PipelineConfigBuilder, SynthesisPipeline,
//!     SynthesisRequestBuilder,
//! };
//!
//! # fn bindings() -> Arc<dyn NativeBackend> { unimplemented!() }
//! let config = PipelineConfigBuilder::default()
//!     .staging_dir("/data/cache/models")
//!     .clips_dir("/data/cache/clips")
//!     .build()?;
//! let pipeline = SynthesisPipeline::new(bindings(), config)?;
//!
//! let request = SynthesisRequestBuilder::default()
//!     .model_root("/sdcard/gpt-sovits")
//!     .variant(LanguageVariant::Mandarin)
//!     .reference_text("格式化，可以给自家的奶带来大量的")
//!     .text("你好，欢迎来到小鱼的TTS测试。")
//!     .build()?;
//! let clip = pipeline.synthesize_blocking(request)?;
//! println!("wrote {}", clip.path.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assets;
pub mod config;
pub mod encoder;
pub mod error;
pub mod library;
pub mod native;
pub mod pipeline;
pub mod registry;
pub mod variant;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::SynthesisError;
pub use library::{ClipLibrary, ClipRecord};
pub use native::{ModelHandle, NativeBackend};
pub use pipeline::{
    PipelineEvent, PipelineState, SynthesisPipeline, SynthesisRequest, SynthesisRequestBuilder,
};
pub use registry::ModelRegistry;
pub use variant::LanguageVariant;
