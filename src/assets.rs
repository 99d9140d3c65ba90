//! Model asset staging.
//!
//! A variant's assets live under `<root>/<variant>/` in a source tree the
//! user points at (on Android this is a document tree the app can only read
//! through a provider, which is why everything is byte-copied into a private
//! staging directory first). The manifest is fixed:
//!
//! ```text
//! <root>/zh/
//! ├── g2pW.onnx                      # phonemizer
//! ├── g2p_en/                        # English text-normalization models
//! ├── custom_vits.onnx               # vocoder
//! ├── ssl.onnx                       # self-supervised encoder
//! ├── custom_t2s_encoder.onnx        # text-to-semantic encoder
//! ├── custom_t2s_fs_decoder.onnx     # fixed-step decoder
//! ├── custom_t2s_s_decoder.onnx      # step decoder
//! ├── bert.onnx                      # embedding model
//! └── ref.wav                        # reference clip for conditioning
//! ```
//!
//! Staging is all-or-nothing in outcome but not transactional: a failure
//! partway through leaves already-copied files in the staging directory.
//! They are overwritten by the next successful run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SynthesisError;
use crate::variant::LanguageVariant;

/// Reserved name of the reference clip; excluded from clip-library scans.
pub const REFERENCE_CLIP_NAME: &str = "ref.wav";

/// The eight local model paths handed to the native init call.
///
/// All paths are guaranteed to exist inside the staging directory when this
/// struct is produced by [`stage`].
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub g2pw: PathBuf,
    /// Directory of English g2p models, staged as a whole.
    pub g2p_en: PathBuf,
    pub vits: PathBuf,
    pub ssl: PathBuf,
    pub t2s_encoder: PathBuf,
    pub t2s_fs_decoder: PathBuf,
    pub t2s_s_decoder: PathBuf,
    pub bert: PathBuf,
}

/// A fully staged asset set for one variant.
#[derive(Debug, Clone)]
pub struct StagedAssets {
    pub models: ModelPaths,
    /// The staged reference clip, consumed by conditioning (not by init).
    pub reference_audio: PathBuf,
}

/// Resolve and stage every manifest entry for `variant`.
///
/// Fails fast with [`SynthesisError::AssetMissing`] on the first entry that
/// cannot be found, and with [`SynthesisError::CopyFailed`] on the first
/// I/O error. Prior staged copies of the same names are overwritten.
pub fn stage(
    root: &Path,
    variant: LanguageVariant,
    staging_dir: &Path,
) -> Result<StagedAssets, SynthesisError> {
    let source = root.join(variant.dir_name());
    if !source.is_dir() {
        return Err(SynthesisError::AssetMissing(format!(
            "variant folder '{}' not found under {}",
            variant.dir_name(),
            root.display()
        )));
    }
    fs::create_dir_all(staging_dir)?;

    log::info!(
        "Staging {} assets from {} into {}",
        variant,
        source.display(),
        staging_dir.display()
    );

    Ok(StagedAssets {
        models: ModelPaths {
            g2pw: stage_file(&source, staging_dir, "g2pW.onnx")?,
            g2p_en: stage_dir(&source, staging_dir, "g2p_en")?,
            vits: stage_file(&source, staging_dir, "custom_vits.onnx")?,
            ssl: stage_file(&source, staging_dir, "ssl.onnx")?,
            t2s_encoder: stage_file(&source, staging_dir, "custom_t2s_encoder.onnx")?,
            t2s_fs_decoder: stage_file(&source, staging_dir, "custom_t2s_fs_decoder.onnx")?,
            t2s_s_decoder: stage_file(&source, staging_dir, "custom_t2s_s_decoder.onnx")?,
            bert: stage_file(&source, staging_dir, "bert.onnx")?,
        },
        reference_audio: stage_file(&source, staging_dir, REFERENCE_CLIP_NAME)?,
    })
}

/// Copy a single manifest file into the staging directory.
fn stage_file(source: &Path, staging_dir: &Path, name: &str) -> Result<PathBuf, SynthesisError> {
    let src = source.join(name);
    if !src.is_file() {
        return Err(SynthesisError::AssetMissing(name.to_string()));
    }
    let dst = staging_dir.join(name);
    fs::copy(&src, &dst).map_err(|e| SynthesisError::CopyFailed {
        name: name.to_string(),
        source: e,
    })?;
    Ok(dst)
}

/// Recursively copy a manifest directory into the staging directory.
///
/// A source directory that exists but yields no staged files is treated as
/// missing, matching the all-or-nothing manifest contract.
fn stage_dir(source: &Path, staging_dir: &Path, name: &str) -> Result<PathBuf, SynthesisError> {
    let src = source.join(name);
    if !src.is_dir() {
        return Err(SynthesisError::AssetMissing(name.to_string()));
    }
    let dst = staging_dir.join(name);
    let copied = copy_tree(&src, &dst).map_err(|e| SynthesisError::CopyFailed {
        name: name.to_string(),
        source: e,
    })?;
    if copied == 0 {
        return Err(SynthesisError::AssetMissing(format!(
            "{name} (empty after staging)"
        )));
    }
    Ok(dst)
}

/// Copy every file under `src` into `dst`, returning the file count.
fn copy_tree(src: &Path, dst: &Path) -> std::io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let path = entry.path();
        let target = dst.join(entry.file_name());
        if path.is_dir() {
            copied += copy_tree(&path, &target)?;
        } else {
            fs::copy(&path, &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
