//! Process-wide execution context.

use std::path::Path;

use crate::chain::{PasswordPrompt, TerminalPrompt};
use crate::config::{Config, load_config};
use crate::error::Error;
use crate::settle::Strategy;

/// Configuration and operator I/O, built once in `main` and lent to every
/// command.
#[allow(missing_debug_implementations)]
pub struct Context {
    config: Config,
    prompt: Box<dyn PasswordPrompt>,
}

impl Context {
    /// Context with an explicit config and password source.
    #[must_use]
    pub fn new(config: Config, prompt: Box<dyn PasswordPrompt>) -> Self {
        Self { config, prompt }
    }

    /// Context from an optional config file, prompting on the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is given but cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let config = path.map(load_config).transpose()?.unwrap_or_default();
        tracing::debug!(?config, "configuration loaded");
        Ok(Self::new(config, Box::new(TerminalPrompt)))
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Password source for wallet unlocking.
    #[must_use]
    pub fn prompt(&self) -> &dyn PasswordPrompt {
        self.prompt.as_ref()
    }

    /// Settlement strategy for bind commands.
    #[must_use]
    pub const fn settlement(&self) -> Strategy {
        self.config.settlement.strategy()
    }
}
