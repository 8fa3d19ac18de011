//! Application entry point for the default invocation.
//!
//! Composes the full flow: build provider clients once, run the pipeline
//! (load → transcribe → reason → synthesize), persist the answer audio,
//! then play it back.

use crate::config::Config;
use crate::defaults;
use crate::error::Result;
use crate::output::{self, ConsoleReporter};
use crate::pipeline::{Pipeline, Stage, StageReporter};
use crate::stt::WhisperApiTranscriber;
use crate::tts::GoogleSynthesizer;
use crate::vision::OpenAiReasoner;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Resolved input/output paths for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPaths {
    pub audio: PathBuf,
    pub image: PathBuf,
    pub output: PathBuf,
}

impl RunPaths {
    /// Resolve paths from the run number, with explicit overrides winning.
    pub fn resolve(
        run: u32,
        audio: Option<PathBuf>,
        image: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> Self {
        Self {
            audio: audio.unwrap_or_else(|| PathBuf::from(defaults::default_audio_path(run))),
            image: image.unwrap_or_else(|| PathBuf::from(defaults::default_image_path(run))),
            output: output.unwrap_or_else(|| PathBuf::from(defaults::default_output_path(run))),
        }
    }
}

/// Run the ask command: transcribe the spoken question, answer it from the
/// image, synthesize the answer, write the output file and play it.
#[allow(clippy::too_many_arguments)]
pub async fn run_ask_command(
    config: Config,
    run: u32,
    audio: Option<PathBuf>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    no_play: bool,
    quiet: bool,
    verbosity: u8,
) -> Result<()> {
    let paths = RunPaths::resolve(run, audio, image, output);
    let reporter: Arc<dyn StageReporter> = Arc::new(ConsoleReporter::new(quiet, verbosity));

    // One HTTP client for all providers, with the configured timeout.
    // Credentials are read here, once — never inside the pipeline.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.pipeline.request_timeout_secs))
        .build()
        .map_err(|e| crate::error::TiresiasError::Other(format!("HTTP client setup failed: {e}")))?;

    let transcriber = Arc::new(WhisperApiTranscriber::new(
        client.clone(),
        &config.transcription,
    )?);
    let reasoner = Arc::new(OpenAiReasoner::new(client.clone(), &config.reasoning)?);
    let synthesizer = Arc::new(GoogleSynthesizer::new(client, &config.synthesis)?);

    let pipeline = Pipeline::new(transcriber, reasoner, synthesizer)
        .with_reporter(reporter.clone());

    let outcome = pipeline.run(&paths.audio, &paths.image).await?;
    output::render_exchange(&outcome.question, &outcome.answer, quiet);

    // Persist before playback: a playback failure leaves the file behind.
    reporter.stage_started(Stage::Persisting);
    let started = Instant::now();
    std::fs::write(&paths.output, &outcome.audio)?;
    reporter.stage_finished(Stage::Persisting, started.elapsed());
    output::render_saved(&paths.output, quiet);

    if config.playback.enabled && !no_play {
        reporter.stage_started(Stage::Playing);
        let started = Instant::now();
        play_answer(
            outcome.audio,
            Duration::from_millis(config.playback.poll_interval_ms),
        )
        .await?;
        reporter.stage_finished(Stage::Playing, started.elapsed());
    }

    Ok(())
}

/// Play the synthesized answer to completion on the default output device.
///
/// Playback blocks until the device reports not-busy, so it runs on a
/// blocking task off the async runtime.
#[cfg(feature = "playback")]
async fn play_answer(audio: Vec<u8>, poll_interval: Duration) -> Result<()> {
    use crate::error::TiresiasError;
    use crate::playback::{self, RodioPlaybackDevice};

    tokio::task::spawn_blocking(move || {
        let mut device = RodioPlaybackDevice::try_default()?;
        playback::play(&mut device, &audio, poll_interval)
    })
    .await
    .map_err(|e| TiresiasError::Playback {
        message: format!("playback task failed: {e}"),
    })?
}

#[cfg(not(feature = "playback"))]
async fn play_answer(_audio: Vec<u8>, _poll_interval: Duration) -> Result<()> {
    eprintln!("tiresias was built without playback support; skipping playback");
    Ok(())
}
