//! Stdin reader thread.
//!
//! Owns no game state. Parsed commands travel to the game loop over a
//! bounded channel; the channel closes when stdin hits EOF.

use std::io::{self, BufRead};
use std::thread;

use crossbeam_channel::{bounded, Receiver};

use crate::cli::Command;

/// Commands queued before the game loop picks them up.
const INPUT_CAPACITY: usize = 16;

/// Spawns the reader and returns its command stream.
pub fn spawn_reader() -> io::Result<Receiver<Command>> {
    let (sender, receiver) = bounded(INPUT_CAPACITY);

    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        tracing::warn!("stdin read failed: {err}");
                        break;
                    }
                };
                match Command::parse(&line) {
                    Ok(command) => {
                        let quit = command == Command::Quit;
                        if sender.send(command).is_err() || quit {
                            break;
                        }
                    }
                    Err(err) => println!("  {err}"),
                }
            }
            tracing::debug!("stdin reader finished");
        })?;

    Ok(receiver)
}
