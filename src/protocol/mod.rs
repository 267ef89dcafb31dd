//! # Text protocol
//! A line based front-end to a single [`Engine`], standing in for a graphical
//! board: `select` plays the role of a click on a cell, `submit` the role of
//! the manual destination field.
//!
//! ## Constraints and guarantees
//! - all communication is done **through the given input/output streams**
//! - all commands sent and received **end with the newline character**
//! - the session is **fault tolerant**, unknown or malformed commands are
//!   reported and the session keeps going
//! - rejected moves are silent on the `select` path, but reported on the
//!   `submit` path
//! - a captured king is always reported with a `gameover` message

use std::{
    io::{Read, Write},
    sync::mpsc,
};

use crate::game::{engine::Engine, side::Side};

pub mod commands;
pub mod endpoint;

use commands::{Command, Message};
use endpoint::{CommandReader, MessageWriter};

/// Behaviour of a session.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct SessionOptions {
    /// Sends the board after each `select`, `submit` and `new` command.
    pub echo_board: bool,
}
impl Default for SessionOptions {
    fn default() -> Self {
        Self { echo_board: true }
    }
}

/// Runs a session until `quit` is received or the input is exhausted.
///
/// The engine is left without any observer added by the session, even when the
/// session stops on an I/O error.
pub fn run_session<I: Read, O: Write>(
    engine: &mut Engine,
    input: I,
    output: O,
    options: SessionOptions,
) -> std::io::Result<()> {
    let (game_over_tx, game_over_rx) = mpsc::channel();
    let observer = engine.on_game_over(move |loser| {
        // The observer is removed before the receiver is dropped.
        let _ = game_over_tx.send(loser);
    });

    let result = session_loop(
        engine,
        CommandReader::new(input),
        MessageWriter::new(output),
        &game_over_rx,
        options,
    );
    engine.remove_game_over_observer(observer);
    result
}

fn session_loop<I: Read, O: Write>(
    engine: &mut Engine,
    mut reader: CommandReader<I>,
    mut writer: MessageWriter<O>,
    game_over_rx: &mpsc::Receiver<Side>,
    options: SessionOptions,
) -> std::io::Result<()> {
    'session: while let Some(command) = reader.read_command()? {
        let command = match command {
            Ok(command) => command,
            Err(e) => {
                log::debug!("Unparsable command: {e}");
                writer.send_message(Message::Error(e.to_string()))?;
                continue;
            }
        };
        log::info!("Received command {command:?}");

        let mut show_board = options.echo_board;
        match command {
            Command::Select { row, col } => match engine.select_cell(row, col) {
                Ok(selection) => writer.send_message(Message::Selection(selection))?,
                Err(e) => {
                    show_board = false;
                    writer.send_message(Message::Error(e.to_string()))?
                }
            },
            Command::Submit(text) => match engine.submit_destination(&text) {
                Ok(outcome) => writer.send_message(Message::Moved(outcome))?,
                Err(e) => writer.send_message(Message::Error(e.to_string()))?,
            },
            Command::ShowBoard => show_board = true,
            Command::ShowCaptured => {
                show_board = false;
                writer.send_message(Message::Captured(engine.captured().to_vec()))?
            }
            Command::ShowSelection => {
                show_board = false;
                writer.send_message(Message::Selection(engine.selection()))?
            }
            Command::ShowTargets => {
                show_board = false;
                let targets = engine
                    .selection()
                    .map(|origin| engine.legal_targets(origin).to_vec())
                    .unwrap_or_default();
                writer.send_message(Message::Targets(targets))?
            }
            Command::NewGame => engine.reset(),
            Command::Quit => break 'session,
        }

        for loser in game_over_rx.try_iter() {
            writer.send_message(Message::GameOver(loser))?
        }
        if show_board {
            writer.send_message(Message::Board {
                board: *engine.board(),
                selection: engine.selection(),
            })?
        }
    }

    Ok(())
}
