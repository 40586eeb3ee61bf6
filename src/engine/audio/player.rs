use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};
use rodio::{Decoder, OutputStream, Source};

use crate::error::AudioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Shot,
    Hit,
}

/// Encoded sound files keyed by cue. Decoding happens on the audio thread.
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    sounds: HashMap<SoundCue, Arc<[u8]>>,
}

impl SoundBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every file it can; unreadable ones leave their cue silent.
    pub fn load(entries: &[(SoundCue, &Path)]) -> Self {
        let mut bank = Self::new();
        for (cue, path) in entries {
            match fs::read(path) {
                Ok(bytes) => {
                    info!("[audio] Loaded {:?} from {}", cue, path.display());
                    bank.insert(*cue, bytes);
                }
                Err(e) => warn!("Failed to read sound '{}': {}, {:?} will be silent", path.display(), e, cue),
            }
        }
        bank
    }

    pub fn insert(&mut self, cue: SoundCue, bytes: Vec<u8>) {
        self.sounds.insert(cue, Arc::from(bytes));
    }

    pub fn get(&self, cue: SoundCue) -> Option<Arc<[u8]>> {
        self.sounds.get(&cue).cloned()
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

/// Sends cues to a worker thread that owns the output device.
pub struct AudioPlayer {
    sender: Option<Sender<SoundCue>>,
    worker: Option<JoinHandle<()>>,
}

impl AudioPlayer {
    pub fn start(bank: SoundBank, volume: f32) -> Result<Self, AudioError> {
        let (sender, receiver) = unbounded();
        let worker = thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || run_worker(receiver, bank, volume))
            .map_err(AudioError::Spawn)?;
        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    pub fn disabled() -> Self {
        Self {
            sender: None,
            worker: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    pub fn play(&self, cue: SoundCue) {
        if let Some(sender) = &self.sender {
            if sender.send(cue).is_err() {
                debug!("Audio thread has stopped, dropping {:?}", cue);
            }
        }
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker(receiver: Receiver<SoundCue>, bank: SoundBank, volume: f32) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(output) => output,
        Err(e) => {
            warn!("No audio output device available: {}", e);
            for cue in receiver.iter() {
                debug!("Muted {:?}", cue);
            }
            return;
        }
    };

    for cue in receiver.iter() {
        let Some(bytes) = bank.get(cue) else {
            continue;
        };
        // Each cue gets its own source, so overlapping shots all play.
        match Decoder::new(Cursor::new(bytes)) {
            Ok(source) => {
                if let Err(e) = handle.play_raw(source.amplify(volume).convert_samples()) {
                    warn!("Failed to play {:?}: {}", cue, e);
                }
            }
            Err(e) => warn!("Failed to decode {:?}: {}", cue, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_leave_bank_empty() {
        let bank = SoundBank::load(&[
            (SoundCue::Shot, Path::new("no/such/shot.wav")),
            (SoundCue::Hit, Path::new("no/such/hit.wav")),
        ]);
        assert!(bank.is_empty());
        assert!(bank.get(SoundCue::Shot).is_none());
    }

    #[test]
    fn bank_returns_shared_bytes() {
        let mut bank = SoundBank::new();
        bank.insert(SoundCue::Hit, vec![1, 2, 3]);
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.get(SoundCue::Hit).as_deref(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn disabled_player_ignores_cues() {
        let player = AudioPlayer::disabled();
        assert!(!player.is_enabled());
        player.play(SoundCue::Shot);
    }
}
