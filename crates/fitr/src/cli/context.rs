//! Shared context for running CLI commands.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use fitr_config::Config;
use fitr_engine::{Corpus, Engine, Profile};
use fitr_text::Lexicon;
use serde_json::Value;

use super::output::report_error;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (default if no config files were found).
    pub config: Config,
    /// Verbosity count from the command line.
    pub verbose: u8,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(verbose: u8) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            verbose,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only(verbose: u8) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            verbose,
        })
    }

    /// Builds an engine over the loaded configuration.
    pub fn engine<'a>(&self, lexicon: &'a Lexicon) -> Result<Engine<'a>, ExitCode> {
        Engine::new(lexicon, &self.config).map_err(|e| {
            report_error(e);
            ExitCode::FAILURE
        })
    }

    /// Reads a profile file, relative to the working directory.
    pub fn read_profile(&self, path: &Path) -> Result<Profile, ExitCode> {
        let value = self.read_json(path)?;
        Profile::from_value(value).map_err(|e| {
            report_error(format_args!("{}: {e}", path.display()));
            ExitCode::FAILURE
        })
    }

    /// Reads a posting corpus file, relative to the working directory.
    pub fn read_corpus(&self, path: &Path) -> Result<Corpus, ExitCode> {
        let value = self.read_json(path)?;
        Corpus::from_value(value).map_err(|e| {
            report_error(format_args!("{}: {e}", path.display()));
            ExitCode::FAILURE
        })
    }

    /// Reads and parses a JSON file.
    fn read_json(&self, path: &Path) -> Result<Value, ExitCode> {
        let full = self.cwd.join(path);
        let contents = fs::read_to_string(&full).map_err(|e| {
            report_error(format_args!("failed to read {}: {e}", path.display()));
            ExitCode::FAILURE
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            report_error(format_args!("failed to parse {}: {e}", path.display()));
            ExitCode::FAILURE
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        report_error(format_args!("could not determine current directory: {e}"));
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        report_error(format_args!("failed to load configuration: {e}"));
        ExitCode::FAILURE
    })
}
