//! Single-worker synthesis orchestration.
//!
//! All native calls happen on one background thread. Submissions queue
//! behind each other on a job channel, so no two native calls are ever in
//! flight at once, regardless of which variant they target. Each submission
//! reports back through its own one-way event channel; the caller never
//! blocks the worker and the worker never touches caller state directly.
//!
//! Per submission the worker walks
//! `Loading -> Conditioning -> Inferring -> Done | Failed`, skipping the
//! first two states when the target variant's model is already installed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use derive_builder::Builder;

use crate::assets;
use crate::config::PipelineConfig;
use crate::encoder::{self, PcmSpec};
use crate::error::SynthesisError;
use crate::library::{ClipLibrary, ClipRecord};
use crate::native::NativeBackend;
use crate::registry::ModelRegistry;
use crate::variant::LanguageVariant;

/// Progress states reported while a submission is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Staging assets and initializing the native model.
    Loading,
    /// Priming the model with the reference clip.
    Conditioning,
    /// Running free-text inference.
    Inferring,
}

/// One-way messages from the worker to the submitter.
#[derive(Debug)]
pub enum PipelineEvent {
    State(PipelineState),
    Done(ClipRecord),
    Failed(SynthesisError),
}

/// A single synthesis submission.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct SynthesisRequest {
    /// Root of the model source tree containing per-variant subfolders.
    pub model_root: PathBuf,
    pub variant: LanguageVariant,
    /// Transcript of the variant's reference clip, used for conditioning.
    pub reference_text: String,
    /// Text to synthesize.
    pub text: String,
}

struct Job {
    request: SynthesisRequest,
    events: Sender<PipelineEvent>,
}

/// Owner of the worker thread, the handle registry and the clip library.
///
/// Dropping the pipeline drains the job queue, joins the worker and only
/// then frees any installed handles, so a handle is never freed while a
/// native call may still be using it.
pub struct SynthesisPipeline {
    jobs: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
    native: Arc<dyn NativeBackend>,
    registry: Arc<Mutex<ModelRegistry>>,
    library: Arc<Mutex<ClipLibrary>>,
}

impl SynthesisPipeline {
    /// Start the worker and seed the clip library from the clips directory.
    pub fn new(
        native: Arc<dyn NativeBackend>,
        config: PipelineConfig,
    ) -> Result<Self, SynthesisError> {
        fs::create_dir_all(&config.staging_dir)?;
        fs::create_dir_all(&config.clips_dir)?;

        let registry = Arc::new(Mutex::new(ModelRegistry::new()));
        let library = Arc::new(Mutex::new(ClipLibrary::scan(&config.clips_dir)));

        let (jobs, queue) = mpsc::channel::<Job>();
        let worker = {
            let native = Arc::clone(&native);
            let registry = Arc::clone(&registry);
            let library = Arc::clone(&library);
            thread::spawn(move || worker_loop(queue, &*native, &registry, &library, &config))
        };

        Ok(Self {
            jobs: Some(jobs),
            worker: Some(worker),
            native,
            registry,
            library,
        })
    }

    /// Queue a submission and return its event stream.
    ///
    /// The receiver yields state transitions in worker order and ends with
    /// exactly one `Done` or `Failed`.
    pub fn submit(
        &self,
        request: SynthesisRequest,
    ) -> Result<Receiver<PipelineEvent>, SynthesisError> {
        let (events, receiver) = mpsc::channel();
        let jobs = self.jobs.as_ref().ok_or(SynthesisError::WorkerUnavailable)?;
        jobs.send(Job { request, events })
            .map_err(|_| SynthesisError::WorkerUnavailable)?;
        Ok(receiver)
    }

    /// Submit and block until the terminal event.
    pub fn synthesize_blocking(
        &self,
        request: SynthesisRequest,
    ) -> Result<ClipRecord, SynthesisError> {
        let events = self.submit(request)?;
        for event in events {
            match event {
                PipelineEvent::Done(record) => return Ok(record),
                PipelineEvent::Failed(err) => return Err(err),
                PipelineEvent::State(_) => {}
            }
        }
        Err(SynthesisError::WorkerUnavailable)
    }

    /// The variant whose model is currently installed, if any.
    pub fn loaded_variant(&self) -> Option<LanguageVariant> {
        self.registry.lock().unwrap().loaded_variant()
    }

    /// Shared clip library, for UI-side removal and reordering.
    pub fn library(&self) -> Arc<Mutex<ClipLibrary>> {
        Arc::clone(&self.library)
    }
}

impl Drop for SynthesisPipeline {
    fn drop(&mut self) {
        // Closing the queue lets the worker finish in-flight jobs and exit;
        // handles are released only after the join.
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("synthesis worker panicked");
            }
        }
        self.registry.lock().unwrap().release_all(&*self.native);
    }
}

fn worker_loop(
    queue: Receiver<Job>,
    native: &dyn NativeBackend,
    registry: &Mutex<ModelRegistry>,
    library: &Mutex<ClipLibrary>,
    config: &PipelineConfig,
) {
    while let Ok(job) = queue.recv() {
        let outcome = run_job(native, registry, library, config, &job.request, &job.events);
        // Send failures mean the submitter dropped its receiver; the work
        // itself is still committed (clip written, registry updated).
        let _ = match outcome {
            Ok(record) => job.events.send(PipelineEvent::Done(record)),
            Err(err) => {
                log::warn!("synthesis for {} failed: {err}", job.request.variant);
                job.events.send(PipelineEvent::Failed(err))
            }
        };
    }
}

fn run_job(
    native: &dyn NativeBackend,
    registry: &Mutex<ModelRegistry>,
    library: &Mutex<ClipLibrary>,
    config: &PipelineConfig,
    request: &SynthesisRequest,
    events: &Sender<PipelineEvent>,
) -> Result<ClipRecord, SynthesisError> {
    let variant = request.variant;
    let lang_id = variant.inference_lang_id();

    let installed = registry.lock().unwrap().acquire(variant);
    let handle = match installed {
        Some(handle) => {
            log::debug!("reusing installed model for {variant}");
            handle
        }
        None => {
            let _ = events.send(PipelineEvent::State(PipelineState::Loading));
            registry.lock().unwrap().release_all_except(native, variant);

            let staged = assets::stage(&request.model_root, variant, &config.staging_dir)?;
            let handle = native.init(&staged.models);
            if !handle.is_valid() {
                return Err(SynthesisError::InitializationFailed);
            }
            registry.lock().unwrap().install(variant, handle);

            let _ = events.send(PipelineEvent::State(PipelineState::Conditioning));
            let conditioned = native.condition_reference(
                handle,
                &staged.reference_audio,
                &request.reference_text,
                lang_id,
            );
            if !conditioned {
                // Undo the install; the handle is useless unconditioned.
                registry.lock().unwrap().release(native, variant);
                return Err(SynthesisError::ReferenceProcessingFailed);
            }
            handle
        }
    };

    let _ = events.send(PipelineEvent::State(PipelineState::Inferring));
    let samples = native
        .infer(handle, &request.text, lang_id)
        .ok_or(SynthesisError::InferenceFailed)?;
    // On InferenceFailed the handle stays installed; a retry for the same
    // variant goes straight back to Inferring.

    let spec = PcmSpec {
        sample_rate: config.sample_rate,
        ..PcmSpec::default()
    };
    let path = unique_clip_path(&config.clips_dir, &clip_base_name(&request.text));
    encoder::write_wav(&path, &samples, spec)?;
    log::info!(
        "Synthesized {} samples for {variant} -> {}",
        samples.len(),
        path.display()
    );

    let record = ClipRecord::new(path);
    library.lock().unwrap().append(record.clone());
    Ok(record)
}

/// Derive a file base name from the inference text.
///
/// Characters outside `[A-Za-z0-9_.-]` become underscores; text that trims
/// to nothing falls back to `output`.
fn clip_base_name(text: &str) -> String {
    let base: String = text
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if base.is_empty() {
        "output".to_string()
    } else {
        base
    }
}

/// First non-colliding `<base>.wav`, `<base>_1.wav`, `<base>_2.wav`, … in `dir`.
fn unique_clip_path(dir: &Path, base: &str) -> PathBuf {
    let mut path = dir.join(format!("{base}.wav"));
    let mut counter = 1;
    while path.exists() {
        path = dir.join(format!("{base}_{counter}.wav"));
        counter += 1;
    }
    path
}
