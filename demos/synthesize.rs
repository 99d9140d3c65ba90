use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use sovits_tts::assets::ModelPaths;
use sovits_tts::{
    LanguageVariant, ModelHandle, NativeBackend, PipelineConfigBuilder, SynthesisPipeline,
    SynthesisRequestBuilder,
};

/// Stand-in for the real GPT-SoVITS bindings: produces one second of a
/// 440 Hz tone so the pipeline can be exercised without the native library.
struct ToneBackend;

impl NativeBackend for ToneBackend {
    fn init(&self, models: &ModelPaths) -> ModelHandle {
        println!("init with vocoder at {}", models.vits.display());
        ModelHandle::from_raw(1)
    }

    fn condition_reference(
        &self,
        _handle: ModelHandle,
        reference_audio: &Path,
        reference_text: &str,
        lang_id: u64,
    ) -> bool {
        println!(
            "conditioning on {} ({reference_text:?}, lang {lang_id})",
            reference_audio.display()
        );
        true
    }

    fn infer(&self, _handle: ModelHandle, text: &str, lang_id: u64) -> Option<Vec<f32>> {
        println!("inferring {text:?} (lang {lang_id})");
        let samples = (0..32000)
            .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 32000.0).sin() * 0.5)
            .collect();
        Some(samples)
    }

    fn free(&self, _handle: ModelHandle) {
        println!("freed model");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let model_root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("models"));

    let config = PipelineConfigBuilder::default()
        .staging_dir("target/demo/staging")
        .clips_dir("target/demo/clips")
        .build()?;
    let pipeline = SynthesisPipeline::new(Arc::new(ToneBackend), config)?;

    let request = SynthesisRequestBuilder::default()
        .model_root(model_root)
        .variant(LanguageVariant::Mandarin)
        .reference_text("格式化，可以给自家的奶带来大量的")
        .text("Hello, this is a test.")
        .build()?;

    let start = Instant::now();
    let clip = pipeline.synthesize_blocking(request)?;
    println!(
        "Synthesized {} in {:.2?} (loaded variant: {:?})",
        clip.display_name,
        start.elapsed(),
        pipeline.loaded_variant()
    );

    Ok(())
}
