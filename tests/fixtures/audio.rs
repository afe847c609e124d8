//! Generated audio payloads for recognition requests.
//!
//! 16 kHz, 16-bit signed little-endian mono PCM.

use std::f32::consts::PI;

pub const SAMPLE_RATE: u32 = 16000;

/// 100ms at 16kHz
pub const MS_100: usize = 1600;

/// Generate a sine wave tone as raw PCM bytes.
pub fn sine_wave_pcm(duration_samples: usize, frequency: f32) -> Vec<u8> {
    let max_amplitude = 0.5 * i16::MAX as f32;
    let angular_freq = 2.0 * PI * frequency / SAMPLE_RATE as f32;

    (0..duration_samples)
        .flat_map(|i| (((angular_freq * i as f32).sin() * max_amplitude) as i16).to_le_bytes())
        .collect()
}

/// Wrap PCM bytes in a canonical 44-byte RIFF/WAVE header.
pub fn wav(pcm: &[u8]) -> Vec<u8> {
    let byte_rate = SAMPLE_RATE * 2;
    let mut out = Vec::with_capacity(44 + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + pcm.len() as u32).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(pcm.len() as u32).to_le_bytes());
    out.extend_from_slice(pcm);
    out
}

/// A short 440Hz tone as a WAV file.
pub fn a440_wav() -> Vec<u8> {
    wav(&sine_wave_pcm(MS_100, 440.0))
}
