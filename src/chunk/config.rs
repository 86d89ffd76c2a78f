//! Configuration loading
//!
//! `defaults/tagchunk.default.toml` is embedded into the binary, so the
//! documented defaults and runtime behavior stay in sync. User files and
//! command-line overrides are layered on top with [`Loader`] before
//! deserializing into [`ChunkerConfig`].

use crate::chunk::chunking::Chunker;
use crate::chunk::grammar::GrammarError;
use crate::chunk::notation::parse_grammar;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/tagchunk.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkerConfig {
    pub grammar: GrammarConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrammarConfig {
    pub root_label: String,
    /// One notation line per entry
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub trace: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl GrammarConfig {
    /// The rules as one multi-line notation source
    pub fn source(&self) -> String {
        let mut source = self.rules.join("\n");
        source.push('\n');
        source
    }
}

impl ChunkerConfig {
    /// Parse the configured rules and build a chunker with the configured root label
    pub fn build_chunker(&self) -> Result<Chunker, GrammarError> {
        let grammar = parse_grammar(&self.grammar.source())?;
        Ok(Chunker::new(grammar).with_root_label(self.grammar.root_label.clone()))
    }
}

/// Layers user overrides over the built-in defaults
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may be absent
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a command-line flag
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ChunkerConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<ChunkerConfig, ConfigError> {
    Loader::new().build()
}
