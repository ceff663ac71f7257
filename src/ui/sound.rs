/// Sound engine: procedural retro sound effects via rodio.
///
/// All sounds are generated as in-memory WAV buffers at init time.
/// Playback is fire-and-forget (non-blocking) via rodio's Sink.
///
/// Compile without the "sound" feature to disable audio entirely
/// (the stub SoundEngine does nothing).

#[cfg(feature = "sound")]
mod inner {
    use std::f32::consts::PI;
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};
    use tracing::debug;

    const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_gold: Arc<Vec<u8>>,
        sfx_crash: Arc<Vec<u8>>,
        sfx_win: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        /// None when no audio output device is available.
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    debug!("no audio output: {e}");
                    return None;
                }
            };

            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_gold: Arc::new(make_wav(&gen_pickup())),
                sfx_crash: Arc::new(make_wav(&gen_crash())),
                sfx_win: Arc::new(make_wav(&gen_win())),
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }

        pub fn play_gold(&self) { self.play(&self.sfx_gold); }
        pub fn play_crash(&self) { self.play(&self.sfx_crash); }
        pub fn play_win(&self) { self.play(&self.sfx_win); }
    }

    // ── Waveform generators (mono f32 samples) ──

    fn tone(freq: f32, i: usize) -> f32 {
        let t = i as f32 / SAMPLE_RATE as f32;
        (t * freq * 2.0 * PI).sin()
    }

    /// Gold pickup: quick ascending arpeggio C6→E6→G6
    fn gen_pickup() -> Vec<f32> {
        let notes = [1047.0_f32, 1319.0, 1568.0];
        let n = (SAMPLE_RATE as f32 * 0.045) as usize;
        let mut samples = Vec::with_capacity(n * notes.len());
        for &freq in &notes {
            for i in 0..n {
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                let wave = tone(freq, i) * 0.7 + tone(freq * 3.0, i) * 0.3;
                samples.push(wave * env * 0.25);
            }
        }
        samples
    }

    /// Wall hit: noisy descending crunch
    fn gen_crash() -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * 0.35) as usize;
        let mut rng: u32 = 0x2545_f491;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 420.0 - t * 320.0;
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let env = (1.0 - t).powf(0.7);
                (tone(freq, i) * 0.5 + noise * 0.5) * env * 0.3
            })
            .collect()
    }

    /// All gold collected: ascending fanfare C5→E5→G5→C6 with a held last note
    fn gen_win() -> Vec<f32> {
        let notes = [523.0_f32, 659.0, 784.0, 1047.0];
        let n = (SAMPLE_RATE as f32 * 0.1) as usize;
        let mut samples = Vec::new();
        for &freq in &notes {
            for i in 0..n {
                let env = 1.0 - (i as f32 / n as f32) * 0.3;
                let wave = tone(freq, i) * 0.6 + tone(freq * 2.0, i) * 0.3 + tone(freq * 3.0, i) * 0.1;
                samples.push(wave * env * 0.3);
            }
        }
        let hold = (SAMPLE_RATE as f32 * 0.25) as usize;
        for i in 0..hold {
            let env = 1.0 - (i as f32 / hold as f32);
            samples.push(tone(1047.0, i) * env * 0.3);
        }
        samples
    }

    // ── WAV encoder: 16-bit PCM mono ──

    const CHANNELS: u16 = 1;
    const BITS: u16 = 16;

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let pcm: Vec<u8> = samples
            .iter()
            .flat_map(|s| ((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16).to_le_bytes())
            .collect();
        let data_len = pcm.len() as u32;
        let block_align = CHANNELS * BITS / 8;

        let header: [&[u8]; 13] = [
            b"RIFF",
            &(36 + data_len).to_le_bytes(),
            b"WAVE",
            b"fmt ",
            &16u32.to_le_bytes(),
            &1u16.to_le_bytes(), // PCM
            &CHANNELS.to_le_bytes(),
            &SAMPLE_RATE.to_le_bytes(),
            &(SAMPLE_RATE * block_align as u32).to_le_bytes(),
            &block_align.to_le_bytes(),
            &BITS.to_le_bytes(),
            b"data",
            &data_len.to_le_bytes(),
        ];

        let mut wav = Vec::with_capacity(44 + pcm.len());
        for field in header {
            wav.extend_from_slice(field);
        }
        wav.extend_from_slice(&pcm);
        wav
    }

}

// ── Public API: compiles to no-ops when the sound feature is off ──

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_gold(&self) {}
    pub fn play_crash(&self) {}
    pub fn play_win(&self) {}
}
