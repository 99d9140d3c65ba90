//! Deterministic WAV encoding of raw inference output.
//!
//! The native layer hands back `f32` samples nominally in [-1, 1] but with
//! no hard bound; encoding clamps out-of-range values instead of wrapping.
//! Output is a plain RIFF/WAVE container: 44-byte header, 16-byte fmt
//! chunk (linear PCM), 16-bit little-endian samples. Identical input always
//! yields byte-identical output.

use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::SynthesisError;

/// Output sample rate of the GPT-SoVITS vocoder.
pub const SAMPLE_RATE: u32 = 32000;

/// Shape of the encoded PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmSpec {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for PcmSpec {
    /// Mono 16-bit at the vocoder's native rate.
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

impl PcmSpec {
    fn wav_spec(self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: SampleFormat::Int,
        }
    }
}

/// Encode samples into a complete WAV container in memory.
///
/// Per-sample transform: `clamp(round(s * 32767), -32768, 32767)` as i16.
/// Clamping after scaling means an input of `2.0` saturates to `32767`
/// rather than wrapping.
pub fn encode(samples: &[f32], spec: PcmSpec) -> Result<Vec<u8>, SynthesisError> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec.wav_spec())?;
        for &sample in samples {
            writer.write_sample(quantize(sample))?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Encode samples and write the container to `path`.
pub fn write_wav(path: &Path, samples: &[f32], spec: PcmSpec) -> Result<(), SynthesisError> {
    let bytes = encode(samples, spec)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn quantize(sample: f32) -> i16 {
    (sample * 32767.0).round().clamp(-32768.0, 32767.0) as i16
}
