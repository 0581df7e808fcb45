//! # Dice Roulette
//!
//! Terminal front-end for `roulette_core`.
//!
//! ```bash
//! # Interactive
//! roulette --config roulette.toml
//!
//! # Ten spins, no input, reproducible
//! roulette --auto 10 --seed 42
//!
//! # More detail (audio and haptic cues)
//! RUST_LOG=debug roulette
//! ```
//!
//! The game loop sleeps on the command channel until the next timer
//! deadline, so timers fire on time while input stays responsive.

mod cli;
mod console;
mod input;

use std::process::ExitCode;
use std::time::Instant;

use crossbeam_channel::{never, Receiver, RecvTimeoutError};
use roulette_core::{Dice, RouletteConfig, RouletteSession, ScriptedDice, Sinks, UniformDice};
use tracing_subscriber::EnvFilter;

use cli::{CliError, Command, Options, USAGE};
use console::{print_stats, ConsoleAudio, ConsoleHaptics, ConsoleMusic, ConsoleScreen};

type Session = RouletteSession<Box<dyn Dice>>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let options = Options::parse(std::env::args().skip(1))?;
    if options.help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config = match &options.config {
        Some(path) => RouletteConfig::from_file(path)?,
        None => RouletteConfig::default(),
    };
    if options.seed.is_some() {
        config.seed = options.seed;
    }

    let dice: Box<dyn Dice> = match options.script.clone() {
        Some(script) => Box::new(
            ScriptedDice::new(script).then(UniformDice::from_seed_option(config.seed)),
        ),
        None => Box::new(UniformDice::from_seed_option(config.seed)),
    };
    let sinks = Sinks::new(ConsoleScreen::default(), ConsoleAudio, ConsoleHaptics);
    let mut session: Session = RouletteSession::new(&config, dice, sinks, ConsoleMusic);

    println!("╔══════════════════════════════════════════════╗");
    println!("║              🎲 DICE ROULETTE 🎲              ║");
    println!("╚══════════════════════════════════════════════╝");

    match options.auto {
        Some(spins) => run_auto(&mut session, spins),
        None => {
            println!("Press <enter> to spin, `help` for commands.");
            let commands = input::spawn_reader()?;
            run_interactive(&mut session, &commands);
        }
    }

    print_stats(&session.snapshot());
    Ok(())
}

/// Spins back to back in real time, then returns.
fn run_auto(session: &mut Session, spins: u32) {
    let clock = Instant::now();
    let idle = never::<Command>();
    let mut remaining = spins;

    loop {
        session.fire_due(clock.elapsed());
        if session.controller().is_idle() {
            if remaining == 0 {
                break;
            }
            session.press_start();
            remaining -= 1;
        }
        let _ = wait(session, &clock, &idle);
    }
}

/// Serves typed commands until `quit` or EOF, letting any running spin
/// finish first on EOF.
fn run_interactive(session: &mut Session, commands: &Receiver<Command>) {
    let clock = Instant::now();
    let mut input_open = true;

    loop {
        session.fire_due(clock.elapsed());

        if !input_open {
            if session.controller().is_idle() {
                break;
            }
            let _ = wait(session, &clock, &never());
            continue;
        }

        match wait(session, &clock, commands) {
            Wake::Command(command) => {
                if !handle(session, command) {
                    break;
                }
            }
            Wake::Deadline => {}
            Wake::InputClosed => input_open = false,
        }
    }
}

/// Why the game loop woke up.
enum Wake {
    /// A command arrived.
    Command(Command),
    /// The next timer deadline passed.
    Deadline,
    /// The input channel closed.
    InputClosed,
}

/// Blocks until the next timer deadline or the next command.
fn wait(session: &mut Session, clock: &Instant, commands: &Receiver<Command>) -> Wake {
    let received = match session.next_deadline() {
        Some(deadline) => {
            let timeout = deadline.saturating_sub(clock.elapsed());
            commands.recv_timeout(timeout)
        }
        None => commands.recv().map_err(|_| RecvTimeoutError::Disconnected),
    };

    match received {
        Ok(command) => Wake::Command(command),
        Err(RecvTimeoutError::Timeout) => Wake::Deadline,
        Err(RecvTimeoutError::Disconnected) => Wake::InputClosed,
    }
}

/// Applies one command. Returns `false` to leave the loop.
fn handle(session: &mut Session, command: Command) -> bool {
    match command {
        Command::Spin => {
            if !session.press_start() {
                println!("  still spinning...");
            }
        }
        Command::Music(track) => {
            if let Err(err) = session.select_music(track.as_deref()) {
                println!("  {err}");
            }
        }
        Command::Tracks => {
            let tracks = session.music().tracks();
            if tracks.is_empty() {
                println!("  no music tracks configured");
            }
            for track in tracks {
                println!("  {:<12} {}", track.id, track.title);
            }
        }
        Command::Stats => print_stats(&session.snapshot()),
        Command::Help => println!("{USAGE}"),
        Command::Quit => return false,
    }
    true
}
