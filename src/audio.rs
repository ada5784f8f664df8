//! Audio boundary.
//!
//! The simulation emits [`AudioCue`]s and never waits for playback; actual
//! sound output is an external collaborator behind [`AudioSink`]. The
//! shipped binary uses [`NullAudio`].

use crate::types::AudioCue;

/// Receiver for fire-and-forget sound cues.
pub trait AudioSink {
    /// Play a cue. Must not block the game loop.
    fn play(&mut self, cue: AudioCue);

    /// Advance to the next background track once the current one finishes.
    /// Track sequencing is entirely the sink's concern.
    fn next_track(&mut self) {}
}

/// Sink that discards every cue.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}
