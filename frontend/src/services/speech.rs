//! Speech synthesizers for the read-aloud controls

use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};

use shared::SpeechSynthesizer;

use crate::config::SpeechConfig;

/// Speech handle shared between views and handlers
pub type SharedSpeech = Arc<dyn SpeechSynthesizer + Send + Sync>;

/// Pick the synthesizer described by configuration
pub fn from_config(config: &SpeechConfig) -> SharedSpeech {
    match &config.command {
        Some(program) => Arc::new(CommandSpeech::new(program.clone(), config.args.clone())),
        None => Arc::new(SilentSpeech),
    }
}

/// Speaks through an external TTS program (espeak, say, ...)
///
/// One utterance at a time: speaking again cancels the previous one.
#[derive(Debug)]
pub struct CommandSpeech {
    program: String,
    args: Vec<String>,
    child: Mutex<Option<Child>>,
}

impl CommandSpeech {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            child: Mutex::new(None),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Child>> {
        match self.child.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn cancel(child: &mut Option<Child>) {
    if let Some(mut running) = child.take() {
        if let Err(e) = running.kill() {
            tracing::debug!("Speech process already finished: {}", e);
        }
        let _ = running.wait();
    }
}

impl SpeechSynthesizer for CommandSpeech {
    fn speak(&self, text: &str) {
        let mut child = self.slot();
        cancel(&mut child);

        match Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(spawned) => {
                tracing::info!(program = %self.program, chars = text.len(), "Reading aloud");
                *child = Some(spawned);
            }
            Err(e) => tracing::error!("Failed to start {}: {}", self.program, e),
        }
    }

    fn stop(&self) {
        cancel(&mut self.slot());
    }

    fn is_speaking(&self) -> bool {
        let mut child = self.slot();
        match child.as_mut().map(|c| c.try_wait()) {
            Some(Ok(None)) => true,
            Some(_) => {
                *child = None;
                false
            }
            None => false,
        }
    }
}

/// Synthesizer for hosts without audio: only logs what would be read
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeech;

impl SpeechSynthesizer for SilentSpeech {
    fn speak(&self, text: &str) {
        tracing::info!(chars = text.len(), "No speech engine configured, skipping read-aloud");
    }

    fn stop(&self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}
