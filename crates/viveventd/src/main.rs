mod cli;
mod runner;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use crossbeam_channel::unbounded;

use viveventd::app::{EventKind, EventManager};
use viveventd::{logging, print_debug, print_error, print_info, print_warning};
use vivevents_device::{Recording, RecordingProvider};
use vivevents_profile::{Profile, ProfileError, Workspace};

use crate::cli::{Cli, Command};
use crate::runner::ReplayRunner;

/// Resolve the profile to run with. An explicit path must exist; otherwise the
/// workspace profile is used when present, falling back to defaults.
fn load_profile(path: Option<&Path>) -> Result<Profile, ProfileError> {
    if let Some(path) = path {
        return Workspace::load_profile_from(path);
    }
    let workspace = match Workspace::new(None) {
        Ok(workspace) => workspace,
        Err(ProfileError::EnvVarNotSet(var)) => {
            print_warning!("{var} is not set, using default profile");
            return Ok(Profile::default());
        }
        Err(e) => return Err(e),
    };
    match workspace.load_profile()? {
        Some(profile) => {
            print_debug!("using profile {}", workspace.profile_path().display());
            Ok(profile)
        }
        None => {
            print_debug!("no profile at {}, using defaults", workspace.path().display());
            Ok(Profile::default())
        }
    }
}

fn print_profile(profile: &Profile) {
    let t = &profile.thresholds;
    print_info!("click time:     {} ms", t.click_time.as_millis());
    print_info!("swipe time:     {} ms", t.swipe_time.as_millis());
    print_info!("swipe distance: {}", t.swipe_distance);
    print_info!("trace:          {}", profile.trace);
}

fn replay(recording: &Path, profile: Option<&Path>, realtime: bool, trace: bool) -> ExitCode {
    let profile = match load_profile(profile) {
        Ok(profile) => profile,
        Err(e) => {
            print_error!("failed to load profile: {e}");
            return ExitCode::FAILURE;
        }
    };
    let recording = match Recording::from_path(recording) {
        Ok(recording) => recording,
        Err(e) => {
            print_error!("failed to load recording: {e}");
            return ExitCode::FAILURE;
        }
    };

    let tick = recording.tick();
    print_info!("replaying {} frames at {} ms per tick", recording.len(), tick.as_millis());

    let mut manager = EventManager::from_profile(&profile);
    if trace {
        manager.set_trace(true);
    }
    let mut runner = ReplayRunner::new(manager, RecordingProvider::new(recording), tick);

    let total = if realtime {
        let (stop_tx, stop_rx) = unbounded::<()>();
        if let Err(e) = ctrlc::set_handler(move || {
            let _ = stop_tx.send(());
        }) {
            print_error!("failed to set Ctrl+C handler: {e}");
            return ExitCode::FAILURE;
        }
        runner.run_paced(&stop_rx)
    } else {
        runner.run()
    };
    runner.print_summary(&total);

    if total.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn check(profile: Option<&Path>) -> ExitCode {
    match load_profile(profile) {
        Ok(profile) => {
            print_info!("profile is valid");
            print_profile(&profile);
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::setup(cli.verbose, cli.no_color) {
        eprintln!("unable to set up logger: {e}");
        return ExitCode::FAILURE;
    }

    match cli.command {
        Command::Replay {
            recording,
            profile,
            realtime,
            trace,
        } => replay(&recording, profile.as_deref(), realtime, trace),
        Command::Check { profile } => check(profile.as_deref()),
        Command::Kinds => {
            for kind in EventKind::ALL {
                print_info!("{kind}");
            }
            ExitCode::SUCCESS
        }
    }
}
