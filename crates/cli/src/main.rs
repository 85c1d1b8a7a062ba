#![warn(clippy::pedantic)]

use std::{io, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use gymlog_domain::{Name, Service, WorkoutNaming};
use gymlog_storage::JsonStorage;
use log::debug;

use crate::{
    chat::{Chat, Command as ChatCommand},
    config::Settings,
};

mod chat;
mod config;
mod logger;

/// Log workouts written in shorthand notation.
#[derive(Parser)]
#[command(name = "gymlog", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// User whose workouts are logged
    #[arg(long, short, global = true)]
    user: Option<String>,

    /// Exercise registry file
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Directory of the user profiles
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Increase the log level (-v: debug, -vv: trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Log a workout, e.g. "Overhead Press: 2x8 60kg, Machine Row 3x10 50kg"
    Workout {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show the last logged workout
    LastWorkout,
    /// Check that the exercise registry can be loaded
    Reload,
    /// Read chat commands like "!workout ..." from stdin
    Chat,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(user) = &self.user {
            settings.username.clone_from(user);
        }
        if let Some(registry) = &self.registry {
            settings.registry_path.clone_from(registry);
        }
        if let Some(data_dir) = &self.data_dir {
            settings.data_dir.clone_from(data_dir);
        }
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    logger::init(logger::raise(settings.level_filter()?, cli.verbose))
        .context("failed to initialize logger")?;
    debug!("{settings:?}");

    let username = Name::new(&settings.username)
        .with_context(|| format!("invalid username \"{}\"", settings.username))?;
    let service = Service::new(
        JsonStorage::new(&settings.registry_path, &settings.data_dir),
        WorkoutNaming::new(&settings.workout_name),
    )
    .with_context(|| {
        format!(
            "failed to load exercise registry {}",
            settings.registry_path.display()
        )
    })?;
    let chat = Chat::new(&service, &username);

    match cli.command {
        Command::Workout { text } => {
            println!("{}", chat.reply(ChatCommand::Workout(&text.join(" "))));
        }
        Command::LastWorkout => println!("{}", chat.reply(ChatCommand::LastWorkout)),
        Command::Reload => println!("{}", chat.reply(ChatCommand::Reload)),
        Command::Chat => chat
            .run(io::stdin().lock(), io::stdout().lock())
            .context("failed to read commands")?,
    }

    Ok(())
}
