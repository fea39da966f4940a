use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Subcommand, PartialEq)]
pub(crate) enum Command {
    /// Replay a recorded session through the event pipeline.
    Replay {
        /// The recording to replay
        recording: PathBuf,
        /// Profile file to use instead of the workspace profile
        #[clap(short, long)]
        profile: Option<PathBuf>,
        /// Pace ticks at the recorded rate instead of running flat out
        #[clap(long)]
        realtime: bool,
        /// Log every fired event
        #[clap(long)]
        trace: bool,
    },
    /// Validate a profile and print the effective thresholds.
    Check {
        /// Profile file to check instead of the workspace profile
        #[clap(short, long)]
        profile: Option<PathBuf>,
    },
    /// List every event kind.
    Kinds,
}

/// Turns polled VR controller state into click, tap and swipe events.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_replay_flags() {
        let cli = Cli::try_parse_from([
            "viveventd",
            "--no-color",
            "replay",
            "session.yaml",
            "--realtime",
            "-p",
            "profile.yaml",
        ])
        .expect("cli should parse");
        assert!(cli.no_color);
        assert_eq!(
            cli.command,
            Command::Replay {
                recording: PathBuf::from("session.yaml"),
                profile: Some(PathBuf::from("profile.yaml")),
                realtime: true,
                trace: false,
            }
        );
    }

    #[test]
    fn replay_requires_recording() {
        assert!(Cli::try_parse_from(["viveventd", "replay"]).is_err());
    }
}
