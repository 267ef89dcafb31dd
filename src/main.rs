use chequer::{
    game::{
        board::Board,
        engine::{Engine, EngineConfig},
    },
    protocol::{run_session, SessionOptions},
};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plays a game through standard I/O (DEFAULT)
    Play {
        /// Rejects every move once a king has been captured
        #[arg(long)]
        lock_after_game_over: bool,
        /// Does not show the board after each command
        #[arg(long)]
        no_board: bool,
        /// Starting layout as a placement string, rows separated by `/`
        #[arg(short, long)]
        placement: Option<String>,
    },
    /// Prints a board and exits
    Show {
        /// Layout as a placement string, defaults to the initial layout
        placement: Option<String>,
    },
}

pub fn main() {
    let args = Arguments::parse();
    env_logger::init();

    let command = args.command.unwrap_or(Command::Play {
        lock_after_game_over: false,
        no_board: false,
        placement: None,
    });

    match command {
        Command::Play {
            lock_after_game_over,
            no_board,
            placement,
        } => {
            let config = EngineConfig::new().with_lockout(lock_after_game_over);
            let mut engine = match placement {
                Some(placement) => Engine::from_board(parse_board(&placement), config)
                    .unwrap_or_else(|e| {
                        eprintln!("Invalid starting layout `{placement}`: {e}");
                        std::process::exit(2)
                    }),
                None => Engine::with_config(config),
            };
            let options = SessionOptions {
                echo_board: !no_board,
            };
            if let Err(e) = run_session(&mut engine, std::io::stdin(), std::io::stdout(), options)
            {
                log::error!("Session aborted: {e}");
                std::process::exit(1)
            }
        }
        Command::Show { placement } => {
            let board = placement.map_or_else(Board::initial, |p| parse_board(&p));
            print!("{board}")
        }
    }
}

fn parse_board(placement: &str) -> Board {
    match Board::from_placement(placement) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Invalid placement `{placement}`: {e}");
            std::process::exit(2)
        }
    }
}
