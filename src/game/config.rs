use serde::{Deserialize, Serialize};

/// Points awarded for an ordinary food
pub const FOOD_POINTS: u32 = 10;

/// Every fifth food caught pays a random bonus instead of the flat score
pub const SPECIAL_FOOD_EVERY: u32 = 5;

/// The snake starts as a single cell
pub const INITIAL_SNAKE_LENGTH: usize = 1;

/// Configuration for the game.
///
/// The grid dimension and timing are fixed for a normal run; the struct
/// exists so tests can shrink the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Fixed simulation step interval
    pub tick_interval_ms: u64,
    /// Cell the snake's head occupies after a reset
    pub snake_start: (i32, i32),
    /// Cell the food occupies after a reset
    pub food_start: (i32, i32),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 30,
            tick_interval_ms: 100,
            snake_start: (10, 10),
            food_start: (15, 15),
        }
    }
}

impl GameConfig {
    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            grid_size: 10,
            snake_start: (3, 3),
            food_start: (7, 7),
            ..Default::default()
        }
    }
}
