//! The single-pass question pipeline.
//!
//! Strictly sequential: load inputs, transcribe the question, ask the
//! reasoner, synthesize the answer. Each stage consumes the previous
//! stage's output; any failure propagates immediately and ends the run.
//! Persisting the output file and playing it happen at the application
//! layer, after `run` returns.

use crate::error::Result;
use crate::loader;
use crate::stt::Transcriber;
use crate::tts::Synthesizer;
use crate::vision::VisualReasoner;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Pipeline stages, in execution order.
///
/// `Persisting` and `Playing` run at the application layer but are reported
/// through the same observer for a single coherent progress stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Transcribing,
    Reasoning,
    Synthesizing,
    Persisting,
    Playing,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Loading => "loading",
            Stage::Transcribing => "transcribing",
            Stage::Reasoning => "reasoning",
            Stage::Synthesizing => "synthesizing",
            Stage::Persisting => "persisting",
            Stage::Playing => "playing",
        };
        write!(f, "{name}")
    }
}

/// Observer for stage progress. The pipeline itself never prints.
pub trait StageReporter: Send + Sync {
    fn stage_started(&self, stage: Stage);
    fn stage_finished(&self, stage: Stage, elapsed: Duration);
}

/// Reporter that discards all events.
pub struct NullReporter;

impl StageReporter for NullReporter {
    fn stage_started(&self, _stage: Stage) {}
    fn stage_finished(&self, _stage: Stage, _elapsed: Duration) {}
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The transcribed question
    pub question: String,
    /// The reasoner's answer
    pub answer: String,
    /// The synthesized answer audio (raw MP3 bytes by default)
    pub audio: Vec<u8>,
}

/// The pipeline holds one shared handle per provider adapter, constructed
/// once at startup and injected — never rebuilt per call.
pub struct Pipeline {
    transcriber: Arc<dyn Transcriber>,
    reasoner: Arc<dyn VisualReasoner>,
    synthesizer: Arc<dyn Synthesizer>,
    reporter: Arc<dyn StageReporter>,
}

impl Pipeline {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        reasoner: Arc<dyn VisualReasoner>,
        synthesizer: Arc<dyn Synthesizer>,
    ) -> Self {
        Self {
            transcriber,
            reasoner,
            synthesizer,
            reporter: Arc::new(NullReporter),
        }
    }

    /// Attach a stage progress reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn StageReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Run the pipeline once: (audio question, image) → answer audio.
    ///
    /// Does not persist or play anything; the returned audio is the
    /// caller's to write and play.
    pub async fn run(&self, audio_path: &Path, image_path: &Path) -> Result<RunOutcome> {
        let inputs = self.timed(Stage::Loading, || {
            loader::load_inputs(audio_path, image_path)
        })?;

        self.reporter.stage_started(Stage::Transcribing);
        let started = Instant::now();
        let question = self
            .transcriber
            .transcribe(&inputs.audio, &inputs.audio_filename)
            .await?;
        self.reporter
            .stage_finished(Stage::Transcribing, started.elapsed());

        self.reporter.stage_started(Stage::Reasoning);
        let started = Instant::now();
        let answer = self.reasoner.ask(&question, &inputs.image_b64).await?;
        self.reporter
            .stage_finished(Stage::Reasoning, started.elapsed());

        self.reporter.stage_started(Stage::Synthesizing);
        let started = Instant::now();
        let audio = self.synthesizer.synthesize(&answer).await?;
        self.reporter
            .stage_finished(Stage::Synthesizing, started.elapsed());

        Ok(RunOutcome {
            question,
            answer,
            audio,
        })
    }

    fn timed<T>(&self, stage: Stage, f: impl FnOnce() -> Result<T>) -> Result<T> {
        self.reporter.stage_started(stage);
        let started = Instant::now();
        let value = f()?;
        self.reporter.stage_finished(stage, started.elapsed());
        Ok(value)
    }
}
