//! # Commands/Messages
//! Commands are received from the player, one per line. Messages are sent back
//! in response, each ending with a newline.

use thiserror::Error;

use crate::game::{
    board::Board,
    coord::{Coord, GRID_SIZE},
    engine::MoveOutcome,
    piece::Piece,
    side::Side,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Unknown command verb: {0}")]
    UnknownCommandVerb(String),
    #[error("Empty command")]
    EmptyCommand,
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid parameter: expected {expected}, got {got}")]
    InvalidParameter { got: String, expected: &'static str },
    #[error("Command is not valid UTF-8")]
    InvalidUtf8,
}

/// Commands that can be received from the player.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    /// Picks a cell, as a click on the board would. Bounds are checked by the
    /// engine.
    Select { row: i64, col: i64 },
    /// Sends the selected piece to a typed-in `row,col` destination.
    Submit(String),
    ShowBoard,
    ShowCaptured,
    ShowSelection,
    /// Lists the cells the selected piece may step to.
    ShowTargets,
    NewGame,
    Quit,
}
impl std::str::FromStr for Command {
    type Err = ProtocolError;

    /// Parses a command in string format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let rest = rest.trim();
        match verb {
            "" => Err(ProtocolError::EmptyCommand),
            "select" => parse_cell(rest),
            "submit" => {
                if rest.is_empty() {
                    Err(ProtocolError::MissingParameter("<row,col>"))
                } else {
                    Ok(Command::Submit(rest.to_string()))
                }
            }
            "board" => Ok(Command::ShowBoard),
            "captured" => Ok(Command::ShowCaptured),
            "selection" => Ok(Command::ShowSelection),
            "targets" => Ok(Command::ShowTargets),
            "new" => Ok(Command::NewGame),
            "quit" => Ok(Command::Quit),
            verb => Err(ProtocolError::UnknownCommandVerb(verb.to_string())),
        }
    }
}

/// Parses `<row> <col>` or `<row>,<col>`.
fn parse_cell(s: &str) -> Result<Command, ProtocolError> {
    const EXPECTED: &str = "<row> <col>";

    let mut tokens = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty());
    let mut next_int = || -> Result<i64, ProtocolError> {
        let token = tokens.next().ok_or(ProtocolError::MissingParameter(EXPECTED))?;
        token.parse().map_err(|_| ProtocolError::InvalidParameter {
            got: token.to_string(),
            expected: EXPECTED,
        })
    };
    let row = next_int()?;
    let col = next_int()?;

    match tokens.next() {
        None => Ok(Command::Select { row, col }),
        Some(extra) => Err(ProtocolError::InvalidParameter {
            got: extra.to_string(),
            expected: EXPECTED,
        }),
    }
}

/// Messages sent to the player in response to a command.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Message {
    Board {
        board: Board,
        selection: Option<Coord>,
    },
    Selection(Option<Coord>),
    Moved(MoveOutcome),
    Captured(Vec<Piece>),
    Targets(Vec<Coord>),
    GameOver(Side),
    Error(String),
}
impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Board { board, selection } => {
                write!(f, " ")?;
                for col in 0..GRID_SIZE {
                    write!(f, " {col} ")?
                }
                writeln!(f)?;
                for (row, cells) in board.grid().iter().enumerate() {
                    write!(f, "{row}")?;
                    for (col, cell) in cells.iter().enumerate() {
                        let symbol = cell.map_or('.', |piece| piece.symbol());
                        if selection.is_some_and(|s| s.row() == row && s.col() == col) {
                            write!(f, "[{symbol}]")?
                        } else {
                            write!(f, " {symbol} ")?
                        }
                    }
                    writeln!(f)?
                }
                Ok(())
            }
            Self::Selection(None) => writeln!(f, "selected none"),
            Self::Selection(Some(coord)) => writeln!(f, "selected {coord}"),
            Self::Moved(outcome) => {
                write!(f, "moved {} {} -> {}", outcome.piece, outcome.from, outcome.to)?;
                if let Some(captured) = outcome.captured {
                    write!(f, " captures {captured}")?
                }
                writeln!(f)
            }
            Self::Captured(pieces) => {
                write!(f, "captured")?;
                for (i, piece) in pieces.iter().enumerate() {
                    write!(f, "{}{piece}", if i == 0 { " " } else { ", " })?
                }
                writeln!(f)
            }
            Self::Targets(targets) => {
                write!(f, "targets")?;
                for target in targets {
                    write!(f, " {target}")?
                }
                writeln!(f)
            }
            Self::GameOver(loser) => writeln!(f, "gameover {loser} loses"),
            Self::Error(msg) => writeln!(f, "error {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::piece::PieceKind;

    #[test]
    fn parse_select() {
        assert_eq!("select 7 1".parse(), Ok(Command::Select { row: 7, col: 1 }));
        assert_eq!("select 5,0".parse(), Ok(Command::Select { row: 5, col: 0 }));
        assert_eq!(
            "  select  -1 , 9 ".parse(),
            Ok(Command::Select { row: -1, col: 9 })
        );
    }

    #[test]
    fn parse_select_invalid() {
        assert_eq!(
            "select 7".parse::<Command>(),
            Err(ProtocolError::MissingParameter("<row> <col>"))
        );
        assert_eq!(
            "select a 1".parse::<Command>(),
            Err(ProtocolError::InvalidParameter {
                got: "a".to_string(),
                expected: "<row> <col>"
            })
        );
        assert_eq!(
            "select 1 2 3".parse::<Command>(),
            Err(ProtocolError::InvalidParameter {
                got: "3".to_string(),
                expected: "<row> <col>"
            })
        );
    }

    #[test]
    fn parse_submit_keeps_raw_text() {
        assert_eq!(
            "submit 4, 4".parse(),
            Ok(Command::Submit("4, 4".to_string()))
        );
        assert_eq!(
            "submit".parse::<Command>(),
            Err(ProtocolError::MissingParameter("<row,col>"))
        );
    }

    #[test]
    fn parse_simple_verbs() {
        assert_eq!("board\n".parse(), Ok(Command::ShowBoard));
        assert_eq!("captured".parse(), Ok(Command::ShowCaptured));
        assert_eq!("selection".parse(), Ok(Command::ShowSelection));
        assert_eq!("targets".parse(), Ok(Command::ShowTargets));
        assert_eq!("new".parse(), Ok(Command::NewGame));
        assert_eq!("quit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Command>(), Err(ProtocolError::EmptyCommand));
        assert_eq!(
            "castle".parse::<Command>(),
            Err(ProtocolError::UnknownCommandVerb("castle".to_string()))
        );
    }

    #[test]
    fn render_board_with_selection() {
        let message = Message::Board {
            board: Board::initial(),
            selection: Coord::new(7, 1).ok(),
        };
        let rendered = message.to_string();
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines[1], "0 r  n  b  q  k  b  n  r ");
        assert_eq!(lines[8], "7 R [N] B  Q  K  B  N  R ");
    }

    #[test]
    fn render_moves_and_captures() {
        let outcome = MoveOutcome {
            piece: Piece::new(PieceKind::Queen, Side::White),
            from: Coord::new(7, 3).unwrap(),
            to: Coord::new(0, 4).unwrap(),
            captured: Some(Piece::new(PieceKind::King, Side::Black)),
            game_over: Some(Side::Black),
        };
        assert_eq!(
            Message::Moved(outcome).to_string(),
            "moved Q 7,3 -> 0,4 captures k\n"
        );
        assert_eq!(
            Message::Captured(vec![
                Piece::new(PieceKind::Pawn, Side::Black),
                Piece::new(PieceKind::Knight, Side::White)
            ])
            .to_string(),
            "captured p, N\n"
        );
        assert_eq!(Message::Captured(vec![]).to_string(), "captured\n");
        assert_eq!(
            Message::GameOver(Side::Black).to_string(),
            "gameover black loses\n"
        );
    }
}
