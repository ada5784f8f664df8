//! Shared constants and plain data types.
//!
//! Everything here is fixed at build time; there is no runtime configuration
//! surface.

/// Playfield pixel dimensions the board geometry is derived from.
pub const PLAYFIELD_WIDTH_PX: u32 = 400;
pub const PLAYFIELD_HEIGHT_PX: u32 = 800;
pub const BLOCK_SIZE_PX: u32 = 40;

/// Board dimensions in cells.
pub const BOARD_COLS: u8 = (PLAYFIELD_WIDTH_PX / BLOCK_SIZE_PX) as u8;
pub const BOARD_ROWS: u8 = (PLAYFIELD_HEIGHT_PX / BLOCK_SIZE_PX) as u8;

/// Target frame cadence for the terminal runner (milliseconds).
pub const TICK_MS: u32 = 16;

/// Horizontal auto-repeat: one move on key-down, the next after the initial
/// interval, then one per continuous interval while held.
pub const INITIAL_MOVE_INTERVAL_MS: u32 = 200;
pub const CONTINUOUS_MOVE_INTERVAL_MS: u32 = 50;

/// Gravity override while the soft-drop key is held.
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Terminals without key-release reporting only send repeated presses. A
/// held key is treated as released this long after its last press.
pub const KEY_RELEASE_FALLBACK_MS: u32 = 150;

/// The level counter advances once per this much play time.
pub const LEVEL_UP_INTERVAL_MS: u32 = 30_000;

/// Level-derived fall speed: `max(MIN, BASE - (level-1) * STEP)`.
pub const BASE_FALL_MS: u32 = 3000;
pub const FALL_STEP_PER_LEVEL_MS: u32 = 58;
pub const MIN_FALL_MS: u32 = 100;

/// Number of upcoming pieces shown to the player.
pub const LOOKAHEAD_LEN: usize = 2;

/// Score weights: `score = lines * LINE_SCORE + (level-1) * LEVEL_SCORE`.
pub const LINE_SCORE: u32 = 500;
pub const LEVEL_SCORE: u32 = 5000;

/// The seven piece kinds. The tag doubles as the color identity of cells
/// locked into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    S,
    Z,
    L,
    J,
    T,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::T,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::L => "L",
            ShapeKind::J => "J",
            ShapeKind::T => "T",
        }
    }
}

/// Cell on the board (None = empty, Some = locked piece kind).
pub type Cell = Option<ShapeKind>;

/// Discrete input events consumed by the session state machine.
///
/// Directional keys carry separate down/up events so the session can drive
/// its own auto-repeat timers instead of relying on terminal key repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeftDown,
    MoveLeftUp,
    MoveRightDown,
    MoveRightUp,
    SoftDropDown,
    SoftDropUp,
    Rotate,
    HardDrop,
    Quit,
}

/// Fire-and-forget cues for the audio boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    PieceLocked,
    GameOver,
}
