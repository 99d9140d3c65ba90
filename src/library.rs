//! Ordered collection of synthesized audio clips.
//!
//! The pipeline appends records after successful syntheses; a UI layer
//! removes and reorders them. Removal deletes the backing file best-effort:
//! a failed delete is logged but never keeps the record alive.

use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::REFERENCE_CLIP_NAME;

/// One synthesized clip on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRecord {
    /// Absolute path of the WAV file.
    pub path: PathBuf,
    /// File name shown to the user.
    pub display_name: String,
}

impl ClipRecord {
    pub fn new(path: PathBuf) -> Self {
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, display_name }
    }
}

/// Insertion-ordered clip records.
#[derive(Debug, Default)]
pub struct ClipLibrary {
    clips: Vec<ClipRecord>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a library by scanning `dir` for recognized audio files.
    ///
    /// Picks up `.wav` and `.mp3`, skips the reserved reference clip, and
    /// sorts by file name so the initial ordering is stable across runs.
    pub fn scan(dir: &Path) -> Self {
        let mut clips = Vec::new();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("clip directory scan failed for {}: {e}", dir.display());
                return Self::default();
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || !is_clip_file(&path) {
                continue;
            }
            clips.push(ClipRecord::new(path));
        }
        clips.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        log::info!("Seeded clip library with {} clips", clips.len());
        Self { clips }
    }

    pub fn append(&mut self, record: ClipRecord) {
        self.clips.push(record);
    }

    /// Remove the record at `index`, deleting its file first.
    ///
    /// The record is removed even if the file delete fails; the library
    /// never blocks on disk cleanup. Returns the removed record, or `None`
    /// if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<ClipRecord> {
        if index >= self.clips.len() {
            return None;
        }
        let record = self.clips.remove(index);
        if let Err(e) = fs::remove_file(&record.path) {
            log::warn!("failed to delete clip {}: {e}", record.path.display());
        }
        Some(record)
    }

    /// Exchange two positions; every other record keeps its place.
    pub fn swap(&mut self, i: usize, j: usize) {
        if i < self.clips.len() && j < self.clips.len() {
            self.clips.swap(i, j);
        }
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClipRecord> {
        self.clips.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClipRecord> {
        self.clips.iter()
    }
}

fn is_clip_file(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    if name.eq_ignore_ascii_case(REFERENCE_CLIP_NAME) {
        return false;
    }
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("wav") || ext.eq_ignore_ascii_case("mp3")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(name: &str) -> ClipRecord {
        ClipRecord::new(PathBuf::from(format!("/clips/{name}")))
    }

    #[test]
    fn double_swap_restores_order() {
        let mut library = ClipLibrary::new();
        library.append(record("a.wav"));
        library.append(record("b.wav"));
        library.append(record("c.wav"));

        library.swap(0, 2);
        library.swap(0, 2);

        let names: Vec<&str> = library.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, ["a.wav", "b.wav", "c.wav"]);
    }

    #[test]
    fn swap_leaves_middle_untouched() {
        let mut library = ClipLibrary::new();
        library.append(record("a.wav"));
        library.append(record("b.wav"));
        library.append(record("c.wav"));

        library.swap(0, 2);

        let names: Vec<&str> = library.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, ["c.wav", "b.wav", "a.wav"]);
    }

    #[test]
    fn remove_at_deletes_file_and_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        fs::write(&path, b"riff").unwrap();

        let mut library = ClipLibrary::new();
        library.append(ClipRecord::new(path.clone()));

        let removed = library.remove_at(0).unwrap();
        assert_eq!(removed.path, path);
        assert!(!path.exists());
        assert!(library.is_empty());
    }

    #[test]
    fn remove_at_drops_record_even_without_file() {
        let mut library = ClipLibrary::new();
        library.append(record("gone.wav"));

        assert!(library.remove_at(0).is_some());
        assert!(library.is_empty());
        assert!(library.remove_at(0).is_none());
    }

    #[test]
    fn scan_skips_reference_clip_and_foreign_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hello.wav"), b"riff").unwrap();
        fs::write(dir.path().join("song.mp3"), b"id3").unwrap();
        fs::write(dir.path().join("REF.WAV"), b"riff").unwrap();
        fs::write(dir.path().join("notes.txt"), b"text").unwrap();

        let library = ClipLibrary::scan(dir.path());

        let names: Vec<&str> = library.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, ["hello.wav", "song.mp3"]);
    }

    #[test]
    fn scan_of_missing_directory_is_empty() {
        let library = ClipLibrary::scan(Path::new("/definitely/not/here"));
        assert!(library.is_empty());
    }
}
