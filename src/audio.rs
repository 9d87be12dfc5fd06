//! Synthesized sound: a decaying noise burst on crashes and a looping 60 Hz hum.
//!
//! Clips are generated at startup, wrapped in an in-memory WAV and handed to
//! ggez. Missing audio hardware only disables sound; the game keeps running.

use ggez::{
    audio::{SoundData, SoundSource, Source},
    Context,
};
use rand::Rng;

const SAMPLE_RATE: u32 = 22_050;
const CRASH_SECS: f32 = 0.3;
const HUM_SECS: f32 = 2.0;
const HUM_FREQUENCY: f32 = 60.0;
const HUM_AMPLITUDE: f32 = 1000.0;
const HUM_VOLUME: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Crash,
}

/// Events raised during a frame, played once the frame's ticks are done.
#[derive(Debug, Default)]
pub struct AudioQueue {
    events: Vec<AudioEvent>,
}

impl AudioQueue {
    pub fn push(&mut self, event: AudioEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = AudioEvent> + '_ {
        self.events.drain(..)
    }
}

/// White noise fading linearly to silence over [`CRASH_SECS`].
pub fn crash_samples(rng: &mut impl Rng) -> Vec<i16> {
    let frames = (CRASH_SECS * SAMPLE_RATE as f32) as usize;
    (0..frames)
        .map(|i| {
            let envelope = 1.0 - i as f32 / frames as f32;
            let noise: f32 = rng.gen_range(-1.0..1.0);
            (noise * envelope * i16::MAX as f32) as i16
        })
        .collect()
}

/// Low sine hum. The clip holds a whole number of cycles so it loops cleanly.
pub fn hum_samples() -> Vec<i16> {
    let frames = (HUM_SECS * SAMPLE_RATE as f32) as usize;
    (0..frames)
        .map(|i| {
            let phase = std::f32::consts::TAU * HUM_FREQUENCY * i as f32 / SAMPLE_RATE as f32;
            (HUM_AMPLITUDE * phase.sin()) as i16
        })
        .collect()
}

/// 16-bit mono PCM WAV container around `samples`.
pub fn wav_bytes(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    const CHANNELS: u16 = 1;
    const BITS: u16 = 16;
    let block_align = CHANNELS * BITS / 8;
    let data_len = (samples.len() * 2) as u32;

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&CHANNELS.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

fn clip(samples: &[i16]) -> SoundData {
    SoundData::from_bytes(&wav_bytes(samples, SAMPLE_RATE))
}

/// Loaded clips. Either may be absent if the audio device refused it.
pub struct Audio {
    crash: Option<SoundData>,
    hum: Option<Source>,
}

impl Audio {
    pub fn new(ctx: &mut Context) -> Self {
        let crash = clip(&crash_samples(&mut rand::thread_rng()));
        let crash = match Source::from_data(ctx, crash.clone()) {
            Ok(_) => Some(crash),
            Err(err) => {
                tracing::warn!(error = %err, "crash sound unavailable");
                None
            },
        };
        let hum = match Source::from_data(ctx, clip(&hum_samples())) {
            Ok(mut source) => {
                source.set_repeat(true);
                source.set_volume(HUM_VOLUME);
                Some(source)
            },
            Err(err) => {
                tracing::warn!(error = %err, "background hum unavailable");
                None
            },
        };
        Audio { crash, hum }
    }

    /// An instance with nothing loaded, for running without sound.
    pub fn silent() -> Self {
        Audio {
            crash: None,
            hum: None,
        }
    }

    pub fn start_hum(&mut self, ctx: &mut Context) {
        if let Some(hum) = self.hum.as_mut() {
            if let Err(err) = hum.play(ctx) {
                tracing::warn!(error = %err, "failed to start background hum");
            }
        }
    }

    pub fn play(&mut self, ctx: &mut Context, queue: &mut AudioQueue) {
        for event in queue.drain() {
            match event {
                AudioEvent::Crash => {
                    let Some(data) = self.crash.clone() else {
                        continue;
                    };
                    // Detached so overlapping crashes each play in full.
                    let played = Source::from_data(ctx, data)
                        .and_then(|mut source| source.play_detached(ctx));
                    if let Err(err) = played {
                        tracing::warn!(error = %err, "failed to play crash sound");
                    }
                },
            }
        }
    }
}
