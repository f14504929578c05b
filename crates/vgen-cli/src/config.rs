//! CLI configuration.

use std::time::Duration;

use vgen_client::ClientConfig;
use vgen_poller::PollerConfig;

use crate::cli::{Cli, PollArgs};

/// Client and poller settings, from the environment with flag overrides.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub client: ClientConfig,
    pub poller: PollerConfig,
}

impl CliConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::from_env(),
            poller: PollerConfig::from_env(),
        }
    }

    /// Apply the global flags.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.api_url {
            self.client.base_url = url.clone();
        }
        if let Some(secs) = cli.timeout_secs.filter(|s| *s > 0) {
            self.client.timeout = Duration::from_secs(secs);
        }
        self
    }

    /// Poller settings for a command's poll flags.
    pub fn poller_for(&self, args: &PollArgs) -> PollerConfig {
        let mut config = self.poller.clone();
        if let Some(ms) = args.interval_ms.filter(|ms| *ms > 0) {
            config.interval = Duration::from_millis(ms);
        }
        if let Some(max) = args.max_failures {
            config = config.with_max_consecutive_failures(max);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_flags_override_env() {
        std::env::set_var("VGEN_API_URL", "http://from-env:8000");
        std::env::set_var("VGEN_POLL_INTERVAL_MS", "1500");

        let cli = Cli::try_parse_from([
            "vgen",
            "--api-url",
            "http://from-flag:9000",
            "watch",
            "job-1",
            "--max-failures",
            "4",
        ])
        .unwrap();

        let config = CliConfig::from_env().with_cli(&cli);
        assert_eq!(config.client.base_url, "http://from-flag:9000");
        assert_eq!(config.client.timeout, Duration::from_secs(30));

        let poll = match &cli.command {
            crate::cli::Commands::Watch { poll, .. } => config.poller_for(poll),
            other => panic!("Expected watch, got {:?}", other),
        };
        assert_eq!(poll.interval, Duration::from_millis(1500));
        assert_eq!(poll.max_consecutive_failures, Some(4));

        std::env::remove_var("VGEN_API_URL");
        std::env::remove_var("VGEN_POLL_INTERVAL_MS");
    }

    #[test]
    #[serial]
    fn test_env_used_without_flags() {
        std::env::set_var("VGEN_API_URL", "http://from-env:8000");

        let cli = Cli::try_parse_from(["vgen", "health"]).unwrap();
        let config = CliConfig::from_env().with_cli(&cli);
        assert_eq!(config.client.base_url, "http://from-env:8000");

        let poll = config.poller_for(&PollArgs {
            interval_ms: Some(0),
            max_failures: None,
        });
        assert_eq!(poll.interval, Duration::from_millis(2000));
        assert_eq!(poll.max_consecutive_failures, None);

        let poll = config.poller_for(&PollArgs {
            interval_ms: None,
            max_failures: Some(0),
        });
        assert_eq!(poll.max_consecutive_failures, None);

        std::env::remove_var("VGEN_API_URL");
    }
}
