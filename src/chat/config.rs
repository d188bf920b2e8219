//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::DEFAULT_TIMEOUT;
use crate::error::{Error, Result};
use crate::types::Mode;

/// Command-line arguments for the advisor-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the chat service.
    #[arrrg(optional, "Service base URL (default: http://localhost:5000)", "URL")]
    pub base_url: Option<String>,

    /// Deadline for each chat exchange, in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 30)", "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Input mode to select up front.
    #[arrrg(optional, "Preselect the input mode (idea or references)", "MODE")]
    pub mode: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Skip the reachability probe at startup.
    #[arrrg(flag, "Do not probe the service at startup")]
    pub skip_probe: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Base URL of the service; `None` defers to the environment or default.
    pub base_url: Option<String>,

    /// Deadline for each chat exchange.
    pub timeout: Duration,

    /// Mode to select as soon as the session starts.
    pub mode: Option<Mode>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether to probe the service when the session starts.
    pub probe_on_start: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Base URL: from the environment, else http://localhost:5000
    /// - Timeout: 30 seconds
    /// - Mode: chosen interactively
    /// - Color: enabled
    /// - Startup probe: enabled
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            mode: None,
            use_color: true,
            probe_on_start: true,
        }
    }

    /// Sets the service base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the per-exchange deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Preselects the input mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Disables the startup probe.
    pub fn without_probe(mut self) -> Self {
        self.probe_on_start = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = Error;

    fn try_from(args: ChatArgs) -> Result<Self> {
        let mode = args
            .mode
            .map(|m| {
                m.parse::<Mode>()
                    .map_err(|err| Error::validation(err, Some("mode".to_string())))
            })
            .transpose()?;
        if args.timeout_secs == Some(0) {
            return Err(Error::validation(
                "timeout must be at least one second",
                Some("timeout-secs".to_string()),
            ));
        }

        Ok(ChatConfig {
            base_url: args.base_url,
            timeout: args
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            mode,
            use_color: !args.no_color,
            probe_on_start: !args.skip_probe,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert!(config.base_url.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.mode.is_none());
        assert!(config.use_color);
        assert!(config.probe_on_start);
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::try_from(ChatArgs::default()).unwrap();
        assert_eq!(config, ChatConfig::new());
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            base_url: Some("http://10.0.0.2:5000".to_string()),
            timeout_secs: Some(10),
            mode: Some("references".to_string()),
            no_color: true,
            skip_probe: true,
        };
        let config = ChatConfig::try_from(args).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://10.0.0.2:5000"));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.mode, Some(Mode::References));
        assert!(!config.use_color);
        assert!(!config.probe_on_start);
    }

    #[test]
    fn config_from_args_rejects_bad_mode() {
        let args = ChatArgs {
            mode: Some("thesis".to_string()),
            ..ChatArgs::default()
        };
        let err = ChatConfig::try_from(args).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn config_from_args_rejects_zero_timeout() {
        let args = ChatArgs {
            timeout_secs: Some(0),
            ..ChatArgs::default()
        };
        assert!(ChatConfig::try_from(args).is_err());
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_base_url("https://advisor.example.org")
            .with_timeout(Duration::from_secs(5))
            .with_mode(Mode::Idea)
            .without_color()
            .without_probe();

        assert_eq!(
            config.base_url.as_deref(),
            Some("https://advisor.example.org")
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.mode, Some(Mode::Idea));
        assert!(!config.use_color);
        assert!(!config.probe_on_start);
    }
}
