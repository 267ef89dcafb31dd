//! Main API to interact with a game in progress.
//!
//! The [`Engine`] owns the board, the current selection and the list of
//! captured pieces. It is driven by two entry points with different contracts:
//! - [`Engine::select_cell`], the validated path. Picking a piece then a
//!   destination resolves a move against the move table.
//! - [`Engine::submit_destination`], the manual override. The selected piece is
//!   relocated to a typed-in `row,col` destination *without* checking the move
//!   table. Capture bookkeeping and the friendly-fire block still apply.
//!
//! Either side may move any piece at any time, there is no turn order.
//!
//! # Example
//! ```
//! # use chequer::game::{coord::Coord, engine::Engine};
//! let mut engine = Engine::new();
//! // Pick the white knight, then a cell one knight-jump away.
//! assert_eq!(engine.select_cell(7, 1), Ok(Coord::new(7, 1).ok()));
//! assert_eq!(engine.select_cell(5, 0), Ok(None));
//! assert!(engine.board().is_empty(Coord::new(7, 1).unwrap()));
//! ```

use super::{
    board::{Board, Grid, PlacementError},
    coord::Coord,
    moves::{self, TargetList},
    piece::Piece,
    side::Side,
    EngineError, IllegalMove,
};

/// Callback fired with the losing side when a king is captured.
pub type GameOverObserver = Box<dyn FnMut(Side) + Send>;

/// Handle to a registered [`GameOverObserver`], used to unregister it.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct ObserverId(usize);

/// Settings of an [`Engine`].
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub struct EngineConfig {
    lock_after_game_over: bool,
}
impl EngineConfig {
    /// Default configuration: play may continue after a king is captured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the engine reject any further move once a king has been captured.
    pub fn with_lockout(mut self, lock_after_game_over: bool) -> Self {
        self.lock_after_game_over = lock_after_game_over;
        self
    }

    /// Returns `true` if moves are rejected after the game ended.
    pub fn locks_after_game_over(&self) -> bool {
        self.lock_after_game_over
    }
}

/// Whether a king has been captured yet.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum GameStatus {
    Ongoing,
    Ended { loser: Side },
}

/// Result of a move that was applied to the board.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct MoveOutcome {
    pub piece: Piece,
    pub from: Coord,
    pub to: Coord,
    pub captured: Option<Piece>,
    /// Losing side, if this move captured a king.
    pub game_over: Option<Side>,
}

/// Single-owner game session.
pub struct Engine {
    board: Board,
    selection: Option<Coord>,
    captured: Vec<Piece>,
    status: GameStatus,
    config: EngineConfig,
    observers: Vec<(ObserverId, GameOverObserver)>,
    next_observer: usize,
}
impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}
impl Engine {
    /// A new game on the initial layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new game on the initial layout with the given settings.
    pub fn with_config(config: EngineConfig) -> Self {
        Self::from_board_unchecked(Board::initial(), config)
    }

    /// A new game on an arbitrary board.
    /// # Errors
    /// The board must hold exactly one king per side, otherwise a game could
    /// never end or would start already decided.
    pub fn from_board(board: Board, config: EngineConfig) -> Result<Self, PlacementError> {
        board.check_kings()?;
        Ok(Self::from_board_unchecked(board, config))
    }

    /// A new game on any board, kings or not. Used for partial test fixtures.
    pub(crate) fn from_board_unchecked(board: Board, config: EngineConfig) -> Self {
        log::debug!("Starting game from {board:?} with {config:?}");
        Self {
            board,
            selection: None,
            captured: Vec::new(),
            status: GameStatus::Ongoing,
            config,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Puts the initial layout back and forgets captures and selection.
    ///
    /// Registered observers are kept.
    pub fn reset(&mut self) {
        self.board = Board::initial();
        self.selection = None;
        self.captured.clear();
        self.status = GameStatus::Ongoing;
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// A copy of the grid, detached from the engine.
    #[inline]
    pub fn snapshot(&self) -> Grid {
        self.board.grid()
    }

    /// Captured pieces, in capture order.
    #[inline]
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    #[inline]
    pub fn selection(&self) -> Option<Coord> {
        self.selection
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Registers a callback, fired synchronously whenever a king is captured.
    ///
    /// The returned id unregisters it through
    /// [`Engine::remove_game_over_observer`].
    pub fn on_game_over<F: FnMut(Side) + Send + 'static>(&mut self, observer: F) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Unregisters an observer. Returns `false` if it was already removed.
    pub fn remove_game_over_observer(&mut self, id: ObserverId) -> bool {
        let count = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != count
    }

    /// Cells the piece on `origin` may step to, ignoring their content.
    ///
    /// Empty if `origin` holds no piece.
    pub fn legal_targets(&self, origin: Coord) -> TargetList {
        self.board
            .piece_on(origin)
            .map(|piece| moves::reachable_from(piece, origin))
            .unwrap_or_default()
    }

    /// Handles a user picking the cell at `(row, col)`.
    ///
    /// - With no selection, an occupied cell becomes selected and an empty one
    ///   is ignored.
    /// - Picking the selected cell again deselects it.
    /// - Picking any other cell attempts to move the selected piece there, then
    ///   clears the selection whatever the result. Illegal moves are silently
    ///   dropped, use [`Engine::try_move`] to learn why a move is refused.
    ///
    /// Returns the selection after the call.
    /// # Errors
    /// Out of grid coordinates are rejected without any change of state.
    pub fn select_cell(
        &mut self,
        row: impl Into<i64>,
        col: impl Into<i64>,
    ) -> Result<Option<Coord>, EngineError> {
        let target = Coord::new(row, col)?;

        match self.selection {
            None if self.board.is_empty(target) => {
                log::debug!("Ignoring selection of empty cell {target}")
            }
            None => {
                log::debug!("Selected {target}");
                self.selection = Some(target)
            }
            Some(origin) if origin == target => {
                log::debug!("Deselected {origin}");
                self.selection = None
            }
            Some(origin) => {
                if let Err(e) = self.try_move(origin, target) {
                    log::debug!("Rejected move {origin} -> {target}: {e}")
                }
                self.selection = None
            }
        }

        Ok(self.selection)
    }

    /// Moves the piece on `from` to `to` if the move table allows it.
    ///
    /// The selection is left untouched.
    /// # Errors
    /// Fails without mutating anything if `from` is empty, if `to` is not a
    /// single table step away, if `to` holds a piece of the same side, or if
    /// the game ended and the engine is configured to lock.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, IllegalMove> {
        self.ensure_ongoing()?;
        let piece = self
            .board
            .piece_on(from)
            .ok_or(IllegalMove::EmptyOrigin(from))?;
        if !moves::is_legal_vector(piece, from, to) {
            return Err(IllegalMove::Unreachable { piece, from, to });
        }
        self.apply(from, to)
    }

    /// Relocates the selected piece to a `row,col` destination typed in by the
    /// user.
    ///
    /// This is a deliberate override: the move table is **not** consulted, so
    /// any piece may be sent to any cell. Landing on a friendly piece is still
    /// refused, landing on an enemy piece is still a capture.
    ///
    /// The selection is cleared once the text parsed, whether the relocation
    /// succeeded or not.
    /// # Errors
    /// Fails if the text is not a valid coordinate, if nothing is selected, or
    /// with the [`IllegalMove`] that prevented the relocation.
    pub fn submit_destination(&mut self, text: &str) -> Result<MoveOutcome, EngineError> {
        let target: Coord = text.parse()?;
        let origin = self.selection.take().ok_or(EngineError::NoSelection)?;
        self.ensure_ongoing()?;

        log::warn!("Unchecked relocation {origin} -> {target}");
        Ok(self.apply(origin, target)?)
    }

    fn ensure_ongoing(&self) -> Result<(), IllegalMove> {
        match self.status {
            GameStatus::Ended { loser } if self.config.lock_after_game_over => {
                Err(IllegalMove::GameOver { loser })
            }
            _ => Ok(()),
        }
    }

    /// Resolves the destination content and relocates the piece.
    fn apply(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, IllegalMove> {
        let piece = self
            .board
            .piece_on(from)
            .ok_or(IllegalMove::EmptyOrigin(from))?;

        let captured = match self.board.piece_on(to) {
            Some(occupant) if occupant.side == piece.side => {
                return Err(IllegalMove::FriendlyFire {
                    occupant,
                    target: to,
                })
            }
            occupant => occupant,
        };

        self.board.relocate(from, to);
        let mut outcome = MoveOutcome {
            piece,
            from,
            to,
            captured,
            game_over: None,
        };

        match captured {
            Some(victim) => {
                log::info!("{piece} {from} -> {to} captures {victim}");
                self.captured.push(victim);
                if victim.is_king() {
                    outcome.game_over = Some(victim.side);
                    self.end_game(victim.side);
                }
            }
            None => log::info!("{piece} {from} -> {to}"),
        }

        Ok(outcome)
    }

    fn end_game(&mut self, loser: Side) {
        log::warn!("Game over, {loser} loses");
        if self.status == GameStatus::Ongoing {
            self.status = GameStatus::Ended { loser };
        }
        for (_, observer) in self.observers.iter_mut() {
            observer(loser)
        }
    }
}
impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("board", &self.board)
            .field("selection", &self.selection)
            .field("captured", &self.captured)
            .field("status", &self.status)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}
