use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineSettings,
    pub transcription: TranscriptionConfig,
    pub reasoning: ReasoningConfig,
    pub synthesis: SynthesisConfig,
    pub playback: PlaybackConfig,
}

/// Run-level pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    /// Per-request timeout in seconds for all provider calls
    pub request_timeout_secs: u64,
}

/// Transcription provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub model: String,
    pub endpoint: String,
}

/// Visual reasoning provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReasoningConfig {
    pub model: String,
    pub endpoint: String,
    /// Generation token cap — a brevity hint, not a hard character limit
    pub max_tokens: u32,
    /// Appended to the transcribed question to keep answers short
    pub style_hint: String,
}

/// Speech synthesis provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthesisConfig {
    pub endpoint: String,
    pub language_code: String,
    pub voice: String,
    pub encoding: String,
}

/// Local playback configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    pub enabled: bool,
    pub poll_interval_ms: u64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: defaults::TRANSCRIPTION_MODEL.to_string(),
            endpoint: defaults::TRANSCRIPTION_ENDPOINT.to_string(),
        }
    }
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            model: defaults::REASONING_MODEL.to_string(),
            endpoint: defaults::REASONING_ENDPOINT.to_string(),
            max_tokens: defaults::REASONING_MAX_TOKENS,
            style_hint: defaults::STYLE_HINT.to_string(),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::SYNTHESIS_ENDPOINT.to_string(),
            language_code: defaults::SYNTHESIS_LANGUAGE.to_string(),
            voice: defaults::SYNTHESIS_VOICE.to_string(),
            encoding: defaults::SYNTHESIS_ENCODING.to_string(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_ms: defaults::PLAYBACK_POLL_MS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Default configuration file path: `~/.config/tiresias/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("tiresias")
            .join("config.toml")
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - TIRESIAS_TRANSCRIPTION_MODEL → transcription.model
    /// - TIRESIAS_REASONING_MODEL → reasoning.model
    /// - TIRESIAS_VOICE → synthesis.voice
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("TIRESIAS_TRANSCRIPTION_MODEL")
            && !model.is_empty()
        {
            self.transcription.model = model;
        }
        if let Ok(model) = std::env::var("TIRESIAS_REASONING_MODEL")
            && !model.is_empty()
        {
            self.reasoning.model = model;
        }
        if let Ok(voice) = std::env::var("TIRESIAS_VOICE")
            && !voice.is_empty()
        {
            self.synthesis.voice = voice;
        }
        self
    }

    /// Get a configuration value by dotted key path (for `config get`)
    pub fn get_value(&self, key: &str) -> anyhow::Result<String> {
        let value = match key {
            "pipeline.request_timeout_secs" => self.pipeline.request_timeout_secs.to_string(),
            "transcription.model" => self.transcription.model.clone(),
            "transcription.endpoint" => self.transcription.endpoint.clone(),
            "reasoning.model" => self.reasoning.model.clone(),
            "reasoning.endpoint" => self.reasoning.endpoint.clone(),
            "reasoning.max_tokens" => self.reasoning.max_tokens.to_string(),
            "reasoning.style_hint" => self.reasoning.style_hint.clone(),
            "synthesis.endpoint" => self.synthesis.endpoint.clone(),
            "synthesis.language_code" => self.synthesis.language_code.clone(),
            "synthesis.voice" => self.synthesis.voice.clone(),
            "synthesis.encoding" => self.synthesis.encoding.clone(),
            "playback.enabled" => self.playback.enabled.to_string(),
            "playback.poll_interval_ms" => self.playback.poll_interval_ms.to_string(),
            _ => anyhow::bail!("Unknown configuration key: {key}"),
        };
        Ok(value)
    }

    /// Set a configuration value by dotted key path and persist the file
    /// (for `config set`)
    pub fn set_value(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
        let mut config = Self::load_or_default(path)?;

        match key {
            "pipeline.request_timeout_secs" => {
                config.pipeline.request_timeout_secs = parse_number(key, value)?;
            }
            "transcription.model" => config.transcription.model = value.to_string(),
            "transcription.endpoint" => config.transcription.endpoint = value.to_string(),
            "reasoning.model" => config.reasoning.model = value.to_string(),
            "reasoning.endpoint" => config.reasoning.endpoint = value.to_string(),
            "reasoning.max_tokens" => {
                config.reasoning.max_tokens = parse_number(key, value)?;
            }
            "reasoning.style_hint" => config.reasoning.style_hint = value.to_string(),
            "synthesis.endpoint" => config.synthesis.endpoint = value.to_string(),
            "synthesis.language_code" => config.synthesis.language_code = value.to_string(),
            "synthesis.voice" => config.synthesis.voice = value.to_string(),
            "synthesis.encoding" => config.synthesis.encoding = value.to_string(),
            "playback.enabled" => {
                config.playback.enabled = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid value for {key}: expected true or false")
                })?;
            }
            "playback.poll_interval_ms" => {
                config.playback.poll_interval_ms = parse_number(key, value)?;
            }
            _ => anyhow::bail!("Unknown configuration key: {key}"),
        }

        config.save(path)
    }

    /// Serialize the current configuration back to the given path
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Render the full default configuration as TOML (for `config dump`)
    pub fn dump_template() -> String {
        // SAFETY: serializing a plain default struct cannot fail
        toml::to_string_pretty(&Config::default()).unwrap_or_default()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> anyhow::Result<T> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid value for {key}: expected a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_preserves_reference_values() {
        let config = Config::default();
        assert_eq!(config.transcription.model, "whisper-1");
        assert_eq!(config.reasoning.model, "gpt-4-vision-preview");
        assert_eq!(config.reasoning.max_tokens, 200);
        assert_eq!(config.synthesis.language_code, "en-US");
        assert_eq!(config.synthesis.voice, "en-US-Standard-C");
        assert_eq!(config.synthesis.encoding, "MP3");
        assert_eq!(config.playback.poll_interval_ms, 1000);
        assert!(config.playback.enabled);
    }

    #[test]
    fn load_parses_partial_toml_with_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[reasoning]\nmax_tokens = 50").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.reasoning.max_tokens, 50);
        // untouched sections keep their defaults
        assert_eq!(config.transcription.model, "whisper-1");
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid = = toml").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn load_or_default_returns_defaults_for_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_or_default_propagates_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[playback]\nenabled = \"maybe\"").unwrap();

        assert!(Config::load_or_default(file.path()).is_err());
    }

    #[test]
    fn get_value_known_keys() {
        let config = Config::default();
        assert_eq!(config.get_value("reasoning.max_tokens").unwrap(), "200");
        assert_eq!(config.get_value("synthesis.voice").unwrap(), "en-US-Standard-C");
        assert_eq!(config.get_value("playback.enabled").unwrap(), "true");
    }

    #[test]
    fn get_value_unknown_key_fails() {
        let config = Config::default();
        assert!(config.get_value("no.such.key").is_err());
    }

    #[test]
    fn set_value_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::set_value(&path, "synthesis.voice", "en-US-Standard-E").unwrap();
        Config::set_value(&path, "reasoning.max_tokens", "120").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.synthesis.voice, "en-US-Standard-E");
        assert_eq!(config.reasoning.max_tokens, 120);
    }

    #[test]
    fn set_value_rejects_bad_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(Config::set_value(&path, "reasoning.max_tokens", "many").is_err());
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(Config::set_value(&path, "no.such.key", "1").is_err());
    }

    #[test]
    fn dump_template_is_valid_toml() {
        let template = Config::dump_template();
        let parsed: Config = toml::from_str(&template).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn env_overrides_apply_when_set() {
        // Env vars are process-global; set and clean up in one test to avoid
        // interference between parallel tests on the same variables.
        unsafe {
            std::env::set_var("TIRESIAS_REASONING_MODEL", "gpt-4o");
        }
        let config = Config::default().with_env_overrides();
        unsafe {
            std::env::remove_var("TIRESIAS_REASONING_MODEL");
        }
        assert_eq!(config.reasoning.model, "gpt-4o");
    }

    #[test]
    fn default_path_ends_with_expected_components() {
        let path = Config::default_path();
        assert!(path.ends_with("tiresias/config.toml"));
    }
}
