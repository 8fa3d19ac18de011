//! Pre-flight diagnostics behind the `check` subcommand.
//!
//! Verifies that credentials are set, the configuration parses and the
//! default audio output device can be opened, so a misconfigured run fails
//! here instead of mid-pipeline.

use crate::config::Config;
use crate::defaults;
use std::path::Path;

/// Result of one diagnostic check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Everything in order
    Ok,
    /// Missing and required for at least one pipeline stage
    NotFound,
    /// Present but suspicious
    Warning(String),
}

/// Check that an environment variable holds a non-empty value.
fn check_env_var(variable: &str) -> CheckResult {
    match std::env::var(variable) {
        Ok(value) if !value.trim().is_empty() => CheckResult::Ok,
        Ok(_) => CheckResult::Warning(format!("{variable} is set but empty")),
        Err(_) => CheckResult::NotFound,
    }
}

/// Check that the configuration file, if present, parses.
fn check_config(path: &Path) -> CheckResult {
    if !path.exists() {
        return CheckResult::Warning(format!(
            "no config file at {} (defaults will be used)",
            path.display()
        ));
    }
    match Config::load(path) {
        Ok(_) => CheckResult::Ok,
        Err(e) => CheckResult::Warning(format!("config does not parse: {e}")),
    }
}

/// Check that the default audio output device can be opened.
#[cfg(feature = "playback")]
fn check_output_device() -> CheckResult {
    match crate::playback::RodioPlaybackDevice::try_default() {
        Ok(_) => CheckResult::Ok,
        Err(e) => CheckResult::Warning(format!("{e} (use --no-play to skip playback)")),
    }
}

#[cfg(not(feature = "playback"))]
fn check_output_device() -> CheckResult {
    CheckResult::Warning("built without playback support".to_string())
}

fn print_result(label: &str, result: &CheckResult) {
    match result {
        CheckResult::Ok => println!("  [ok]      {label}"),
        CheckResult::NotFound => println!("  [missing] {label}"),
        CheckResult::Warning(message) => println!("  [warn]    {label}: {message}"),
    }
}

/// Run all checks and print a report. Returns true when every required
/// item is present.
pub fn check_dependencies(config_path: &Path) -> bool {
    println!("Checking tiresias prerequisites:");

    let openai = check_env_var(defaults::OPENAI_KEY_VAR);
    print_result("OPENAI_API_KEY (transcription + reasoning)", &openai);

    let google = check_env_var(defaults::GOOGLE_KEY_VAR);
    print_result("GOOGLE_TTS_API_KEY (speech synthesis)", &google);

    let config = check_config(config_path);
    print_result("configuration file", &config);

    let device = check_output_device();
    print_result("audio output device", &device);

    let ok = !matches!(openai, CheckResult::NotFound) && !matches!(google, CheckResult::NotFound);
    if !ok {
        println!();
        println!("Set the missing credentials before running the pipeline.");
    }
    ok
}
