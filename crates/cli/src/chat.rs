use std::io::{self, BufRead, Write};

use gymlog_domain::{
    Name, ProfileRepository, ReadError, RegistryRepository, Service, WorkoutRecord,
};

pub const PREFIX: char = '!';

pub const HELP: &str = "\
Commands:
!workout <exercise> <sets>, ... - log a workout, e.g. !workout Overhead Press 2x8 60kg, Machine Row 3x10 50kg
!lastworkout - show your last workout
!reload - reload the exercise registry
!help - show this message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Workout(&'a str),
    LastWorkout,
    Reload,
    Help,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Lines which do not start with the command prefix are not commands.
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let rest = line.trim_start().strip_prefix(PREFIX)?;
        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim_start()),
            None => (rest, ""),
        };
        Some(match name {
            "workout" => Command::Workout(argument),
            "lastworkout" => Command::LastWorkout,
            "reload" => Command::Reload,
            "help" => Command::Help,
            _ => Command::Unknown(name),
        })
    }
}

/// Answers commands on behalf of a single user.
pub struct Chat<'a, R> {
    service: &'a Service<R>,
    username: &'a Name,
}

impl<'a, R> Chat<'a, R>
where
    R: RegistryRepository + ProfileRepository,
{
    pub fn new(service: &'a Service<R>, username: &'a Name) -> Self {
        Self { service, username }
    }

    pub fn reply(&self, command: Command) -> String {
        let username = self.username;
        match command {
            Command::Workout(text) => match self.service.log_workout(username, text) {
                Ok(_) => format!("Workout saved for {username}! ✅"),
                Err(err) => format!("Error parsing workout: {err}"),
            },
            Command::LastWorkout => match self.service.last_workout(username) {
                Ok(Some(workout)) => format_last_workout(username, &workout),
                Ok(None) => format!("No workouts found for {username}."),
                Err(ReadError::NotFound) => format!("No file found for user {username}."),
                Err(err) => format!("Error reading workouts for {username}: {err}"),
            },
            Command::Reload => match self.service.reload_registry() {
                Ok(registry) => format!("Reloaded {} exercises.", registry.len()),
                Err(err) => format!("Error reloading exercises: {err}"),
            },
            Command::Help => HELP.to_string(),
            Command::Unknown(name) => {
                format!("Unknown command {PREFIX}{name}. Type {PREFIX}help for a list of commands.")
            }
        }
    }

    /// Replies to every command line read from `input` until the input is exhausted.
    pub fn run(&self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            if let Some(command) = Command::parse(&line) {
                writeln!(output, "{}", self.reply(command))?;
                output.flush()?;
            }
        }
        Ok(())
    }
}

#[must_use]
pub fn format_last_workout(username: &Name, workout: &WorkoutRecord) -> String {
    let mut lines = vec![
        format!("Last workout for {username}:"),
        format!(
            "**{}** on {}",
            workout.name,
            workout.timestamp.format("%a %H:%M, %B %d, %Y")
        ),
    ];
    lines.extend(workout.exercises.iter().map(|exercise| {
        let sets = exercise
            .sets
            .iter()
            .map(|set| format!("{}x{}", set.reps, set.weight))
            .collect::<Vec<_>>()
            .join(", ");
        format!("- {}: {sets}", exercise.exercise_name)
    }));
    lines.join("\n")
}
