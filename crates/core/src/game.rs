//! Game controller: spawn, fall, lock, clear, score, level.
//!
//! [`Game`] owns the board and the logic clock through the small
//! [`Playfield`] and [`LogicTimer`] traits, injected at construction. The
//! default instantiation `Game<Board, GameClock>` is the real game; tests
//! swap in scripted fakes to pin down the controller's decisions without
//! touching a wall clock or a real grid.
//!
//! Lifecycle: NewGame (timer paused, waiting for a start command) ->
//! Playing -> Paused (from Playing only) -> GameOver (until restart). The
//! only game-over trigger is a spawn that fails validation.

use gridfall_types::{
    Command, TileKind, BASE_GAME_SPEED, BOARD_COLS, DROP_COOLDOWN_TICKS, LEVEL_FACTOR,
    POINTS_PER_LINE, SOFT_DROP_CYCLES_PER_SECOND, SPEED_STEP, TOTAL_ROWS,
};

use crate::board::Board;
use crate::catalog::{self, ROTATION_COUNT};
use crate::clock::GameClock;
use crate::rng::SimpleRng;

/// What the controller needs from the grid.
pub trait Playfield {
    fn is_valid_and_empty(&self, kind: TileKind, col: i8, row: i8, rotation: usize) -> bool;
    fn add_piece(&mut self, kind: TileKind, col: i8, row: i8, rotation: usize);
    fn check_lines(&mut self) -> usize;
    fn clear(&mut self);
}

impl Playfield for Board {
    fn is_valid_and_empty(&self, kind: TileKind, col: i8, row: i8, rotation: usize) -> bool {
        Board::is_valid_and_empty(self, kind, col, row, rotation)
    }

    fn add_piece(&mut self, kind: TileKind, col: i8, row: i8, rotation: usize) {
        Board::add_piece(self, kind, col, row, rotation);
    }

    fn check_lines(&mut self) -> usize {
        Board::check_lines(self)
    }

    fn clear(&mut self) {
        Board::clear(self);
    }
}

/// What the controller needs from the timing source.
pub trait LogicTimer {
    fn update(&mut self);
    fn has_elapsed_cycle(&mut self) -> bool;
    fn set_cycles_per_second(&mut self, cycles_per_second: f32);
    fn set_paused(&mut self, paused: bool);
    fn is_paused(&self) -> bool;
    fn reset(&mut self);
}

impl LogicTimer for GameClock {
    fn update(&mut self) {
        GameClock::update(self);
    }

    fn has_elapsed_cycle(&mut self) -> bool {
        GameClock::has_elapsed_cycle(self)
    }

    fn set_cycles_per_second(&mut self, cycles_per_second: f32) {
        GameClock::set_cycles_per_second(self, cycles_per_second);
    }

    fn set_paused(&mut self, paused: bool) {
        GameClock::set_paused(self, paused);
    }

    fn is_paused(&self) -> bool {
        GameClock::is_paused(self)
    }

    fn reset(&mut self) {
        GameClock::reset(self);
    }
}

/// The falling piece: its kind plus the transient position and rotation of
/// its bounding box. Replaced wholesale on every spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: TileKind,
    /// Column of the bounding box's left edge.
    pub col: i8,
    /// Row of the bounding box's top edge.
    pub row: i8,
    /// Always kept in `0..4`.
    pub rotation: usize,
}

/// The game state machine.
pub struct Game<B = Board, C = GameClock> {
    board: B,
    timer: C,
    rng: SimpleRng,
    active: Option<ActivePiece>,
    next: TileKind,
    score: u32,
    level: u32,
    game_speed: f32,
    drop_cooldown: u32,
    new_game: bool,
    paused: bool,
    game_over: bool,
}

impl Game {
    /// A real game on an empty board with a wall-clock timer, waiting for the
    /// start command.
    pub fn new(seed: u32) -> Self {
        Self::with_parts(Board::new(), GameClock::new(BASE_GAME_SPEED), seed)
    }
}

impl<B: Playfield, C: LogicTimer> Game<B, C> {
    /// Assemble a controller from explicit collaborators.
    ///
    /// This is the dependency-injection seam: tests pass fakes implementing
    /// [`Playfield`] and [`LogicTimer`].
    pub fn with_parts(board: B, mut timer: C, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = draw_kind(&mut rng);
        // Nothing ticks until the first start command.
        timer.set_paused(true);
        Self {
            board,
            timer,
            rng,
            active: None,
            next,
            score: 0,
            level: 1,
            game_speed: BASE_GAME_SPEED,
            drop_cooldown: 0,
            new_game: true,
            paused: false,
            game_over: false,
        }
    }

    /// Advance one frame: sample the timer and run at most one simulation
    /// cycle.
    pub fn update(&mut self) {
        self.timer.update();
        if self.timer.has_elapsed_cycle() {
            self.update_game();
        }
    }

    /// One simulation cycle: descend the active piece, or lock it and run the
    /// clear/score/level/spawn sequence.
    pub fn update_game(&mut self) {
        // The post-lock grace window eats cycles before anything moves, so
        // the successor piece is not evaluated the tick it spawned.
        if self.drop_cooldown > 0 {
            self.drop_cooldown -= 1;
            return;
        }

        let Some(active) = self.active else {
            return;
        };

        if self
            .board
            .is_valid_and_empty(active.kind, active.col, active.row + 1, active.rotation)
        {
            self.active = Some(ActivePiece {
                row: active.row + 1,
                ..active
            });
            return;
        }

        // Landed: commit, clear, then speed up regardless of clears.
        self.board
            .add_piece(active.kind, active.col, active.row, active.rotation);
        let cleared = self.board.check_lines();
        if cleared > 0 {
            self.score += POINTS_PER_LINE * cleared as u32;
        }
        self.game_speed += SPEED_STEP;
        self.level = (self.game_speed * LEVEL_FACTOR) as u32;
        self.timer.set_cycles_per_second(self.game_speed);
        self.timer.reset();
        self.drop_cooldown = DROP_COOLDOWN_TICKS;
        self.spawn_piece();
    }

    /// Promote the held next piece to active and draw a fresh next.
    ///
    /// The sole game-over trigger: if the spawn position fails validation the
    /// game ends and the timer pauses, with the unplaceable piece left in
    /// place as the frozen final snapshot.
    pub fn spawn_piece(&mut self) {
        let kind = self.next;
        self.next = draw_kind(&mut self.rng);

        let piece = ActivePiece {
            kind,
            col: catalog::spawn_column(kind),
            row: catalog::spawn_row(kind),
            rotation: 0,
        };
        self.active = Some(piece);

        if !self
            .board
            .is_valid_and_empty(piece.kind, piece.col, piece.row, piece.rotation)
        {
            self.game_over = true;
            self.timer.set_paused(true);
        }
    }

    /// Start a fresh game: zero the score, reset speed and level, clear the
    /// board, rearm the timer, and spawn the first piece (which may itself
    /// end the game immediately — a normal, if unlikely, path).
    pub fn reset_game(&mut self) {
        self.score = 0;
        self.level = 1;
        self.game_speed = BASE_GAME_SPEED;
        self.drop_cooldown = 0;
        self.new_game = false;
        self.game_over = false;
        self.paused = false;
        self.board.clear();
        self.timer.set_cycles_per_second(self.game_speed);
        self.timer.reset();
        self.next = draw_kind(&mut self.rng);
        self.spawn_piece();
    }

    /// Rotate the active piece one step in `direction` (+1 clockwise, -1
    /// counter-clockwise), nudging it back inside the board if the new
    /// rotation would overhang an edge.
    ///
    /// The nudge uses the insets of the new rotation: a left deficit shifts
    /// right until the leftmost filled cell touches column 0, otherwise a
    /// right overflow shifts left; top and bottom are handled the same way
    /// and independently of the horizontal shift. The adjusted position is
    /// validated once; on failure the piece is left entirely unchanged.
    pub fn rotate_piece(&mut self, direction: i8) {
        let Some(active) = self.active else {
            return;
        };

        let new_rotation =
            (active.rotation as i8 + direction).rem_euclid(ROTATION_COUNT as i8) as usize;
        let dim = catalog::dimension(active.kind);
        let left = catalog::left_inset(active.kind, new_rotation);
        let right = catalog::right_inset(active.kind, new_rotation);
        let top = catalog::top_inset(active.kind, new_rotation);
        let bottom = catalog::bottom_inset(active.kind, new_rotation);

        let mut new_col = active.col;
        let mut new_row = active.row;

        if active.col + left < 0 {
            new_col = -left;
        } else if active.col + dim - right > BOARD_COLS {
            new_col = BOARD_COLS - dim + right;
        }

        if active.row + top < 0 {
            new_row = -top;
        } else if active.row + dim - bottom > TOTAL_ROWS {
            new_row = TOTAL_ROWS - dim + bottom;
        }

        if self
            .board
            .is_valid_and_empty(active.kind, new_col, new_row, new_rotation)
        {
            self.active = Some(ActivePiece {
                col: new_col,
                row: new_row,
                rotation: new_rotation,
                ..active
            });
        }
    }

    fn move_piece(&mut self, dx: i8) {
        let Some(active) = self.active else {
            return;
        };
        if self
            .board
            .is_valid_and_empty(active.kind, active.col + dx, active.row, active.rotation)
        {
            self.active = Some(ActivePiece {
                col: active.col + dx,
                ..active
            });
        }
    }

    /// Apply one discrete player command.
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::MoveLeft => {
                if self.playing() {
                    self.move_piece(-1);
                }
            }
            Command::MoveRight => {
                if self.playing() {
                    self.move_piece(1);
                }
            }
            Command::RotateCw => {
                if self.playing() {
                    self.rotate_piece(1);
                }
            }
            Command::RotateCcw => {
                if self.playing() {
                    self.rotate_piece(-1);
                }
            }
            Command::SoftDropPress => {
                // The grace window after a lock also blocks fast-dropping the
                // fresh piece.
                if self.playing() && self.drop_cooldown == 0 {
                    self.timer.set_cycles_per_second(SOFT_DROP_CYCLES_PER_SECOND);
                }
            }
            Command::SoftDropRelease => {
                if self.playing() {
                    self.timer.set_cycles_per_second(self.game_speed);
                    self.timer.reset();
                }
            }
            Command::TogglePause => {
                if !self.game_over && !self.new_game {
                    self.paused = !self.paused;
                    self.timer.set_paused(self.paused);
                }
            }
            Command::Start => {
                if self.new_game || self.game_over {
                    self.reset_game();
                }
            }
        }
    }

    fn playing(&self) -> bool {
        !self.paused && !self.game_over && !self.new_game
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn timer(&self) -> &C {
        &self.timer
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_new_game(&self) -> bool {
        self.new_game
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn game_speed(&self) -> f32 {
        self.game_speed
    }

    pub fn drop_cooldown(&self) -> u32 {
        self.drop_cooldown
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// The kind queued for the following spawn.
    pub fn next_kind(&self) -> TileKind {
        self.next
    }
}

fn draw_kind(rng: &mut SimpleRng) -> TileKind {
    TileKind::ALL[rng.next_range(TileKind::COUNT as u32) as usize]
}
