//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use vgen_models::{Style, VideoId};

#[derive(Debug, Parser)]
#[command(name = "vgen")]
#[command(about = "Generate product review videos", version)]
pub struct Cli {
    /// Base URL of the generation service (default: $VGEN_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (default: $VGEN_API_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Submit a new video job
    Create(CreateArgs),

    /// Follow a job until it finishes
    Watch {
        /// Job ID
        id: VideoId,

        #[command(flatten)]
        poll: PollArgs,

        /// Download the finished video to this path
        #[arg(long)]
        download: Option<PathBuf>,
    },

    /// Print a job's current status
    Status {
        /// Job ID
        id: VideoId,
    },

    /// Print a job as JSON
    Show {
        /// Job ID
        id: VideoId,
    },

    /// Download a finished video
    Download {
        /// Job ID
        id: VideoId,

        /// Output path (default: <product name>_review.mp4)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Check that the service is up
    Health,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Product name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Product description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Visual style (luxury, minimal, tech, lifestyle)
    #[arg(long, short = 's', default_value = "minimal")]
    pub style: Style,

    /// Product image; repeat for more (at most three are sent)
    #[arg(long = "image", short = 'i')]
    pub images: Vec<PathBuf>,

    /// Print the job ID and exit without waiting
    #[arg(long)]
    pub no_wait: bool,

    #[command(flatten)]
    pub poll: PollArgs,

    /// Download the finished video to this path
    #[arg(long)]
    pub download: Option<PathBuf>,
}

#[derive(Debug, Default, Args)]
pub struct PollArgs {
    /// Delay between status checks in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Give up after this many consecutive failed status checks (0: never)
    #[arg(long)]
    pub max_failures: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "vgen",
            "--api-url",
            "http://videos:8000",
            "create",
            "--name",
            "Aroma Diffuser X1",
            "--style",
            "tech",
            "-i",
            "a.png",
            "-i",
            "b.jpg",
            "--interval-ms",
            "500",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://videos:8000"));
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.name, "Aroma Diffuser X1");
                assert_eq!(args.style, Style::Tech);
                assert_eq!(args.images.len(), 2);
                assert_eq!(args.poll.interval_ms, Some(500));
                assert!(!args.no_wait);
            }
            other => panic!("Expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_style_defaults_to_minimal() {
        let cli = Cli::try_parse_from(["vgen", "create", "--name", "Lamp"]).unwrap();
        match cli.command {
            Commands::Create(args) => assert_eq!(args.style, Style::Minimal),
            other => panic!("Expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_style_and_blank_id() {
        assert!(Cli::try_parse_from(["vgen", "create", "--name", "Lamp", "--style", "retro"]).is_err());
        assert!(Cli::try_parse_from(["vgen", "status", "  "]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vgen", "health", "--timeout-secs", "3"]).unwrap();
        assert_eq!(cli.timeout_secs, Some(3));
        assert!(matches!(cli.command, Commands::Health));
    }
}
