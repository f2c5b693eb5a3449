use rand::rngs::ThreadRng;
use rand::Rng;

use super::config::{GameConfig, FOOD_POINTS, INITIAL_SNAKE_LENGTH, SPECIAL_FOOD_EVERY};
use super::direction::Direction;
use super::state::{GameState, Position, Snake};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake ate the food this tick
    pub ate_food: bool,
    /// Points added to the score this tick
    pub points_awarded: u32,
    /// Whether the game is over after this tick
    pub game_over: bool,
}

/// The game engine that handles all game logic.
///
/// Generic over the random source so food placement and bonus scores can be
/// driven from a seed; a normal run uses the thread-local generator.
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a new game engine with a caller-supplied random source
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game: a single-cell snake at the start position, food
    /// at its fixed cell, moving right, score and counters cleared
    pub fn reset(&self) -> GameState {
        let (sx, sy) = self.config.snake_start;
        let (fx, fy) = self.config.food_start;

        let snake = Snake::new(Position::new(sx, sy), Direction::Right, INITIAL_SNAKE_LENGTH);
        let food = Position::new(fx, fy);
        debug_assert!(!snake.occupies(food));

        GameState::new(snake, food, Direction::Right, self.config.grid_size)
    }

    /// Buffer a direction change for the next tick.
    ///
    /// Rejected while the game is over, and when the requested direction is
    /// the exact reverse of the committed one (which would fold the snake
    /// onto itself in a single step). Input events may arrive at any rate;
    /// only the latest accepted one is applied, at the next tick boundary.
    pub fn set_direction(&self, state: &mut GameState, direction: Direction) {
        if state.game_over || direction.is_opposite(state.direction) {
            return;
        }

        state.pending_direction = direction;
    }

    /// Advance the simulation by one fixed step
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if state.game_over {
            return TickOutcome {
                ate_food: false,
                points_awarded: 0,
                game_over: true,
            };
        }

        state.direction = state.pending_direction;

        let new_head = state
            .snake
            .head()
            .step_wrapped(state.direction, state.grid_size);
        let ate_food = new_head == state.food;

        // The tail cell is vacated this tick unless the snake grows, so it
        // does not block the new head.
        let blocking = if ate_food {
            &state.snake.body[..]
        } else {
            &state.snake.body[..state.snake.len() - 1]
        };

        if blocking.contains(&new_head) {
            state.game_over = true;
            return TickOutcome {
                ate_food: false,
                points_awarded: 0,
                game_over: true,
            };
        }

        state.snake.advance(new_head, ate_food);

        let mut points_awarded = 0;
        if ate_food {
            state.foods_eaten += 1;
            points_awarded = if state.foods_eaten % SPECIAL_FOOD_EVERY == 0 {
                // Every fifth catch pays 20, 30, 40 or 50
                self.rng.gen_range(2u32..=5) * FOOD_POINTS
            } else {
                FOOD_POINTS
            };
            state.score += points_awarded;
            state.food = self.spawn_food(&state.snake);
        }

        TickOutcome {
            ate_food,
            points_awarded,
            game_over: false,
        }
    }

    /// Spawn food at a random cell not occupied by the snake.
    ///
    /// Rejection sampling terminates because the grid always has more cells
    /// than the snake has segments.
    fn spawn_food(&mut self, snake: &Snake) -> Position {
        debug_assert!(snake.len() < self.config.grid_size * self.config.grid_size);

        loop {
            let pos = Position::new(
                self.rng.gen_range(0..self.config.grid_size) as i32,
                self.rng.gen_range(0..self.config.grid_size) as i32,
            );

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_engine(config: GameConfig) -> GameEngine<StdRng> {
        GameEngine::with_rng(config, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_reset() {
        let engine = GameEngine::new(GameConfig::default());
        let state = engine.reset();

        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.food, Position::new(15, 15));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.pending_direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.foods_eaten, 0);
        assert!(!state.game_over);
        assert_eq!(state.grid_size, 30);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();

        let outcome = engine.tick(&mut state);

        assert!(!outcome.ate_food);
        assert!(!outcome.game_over);
        assert_eq!(outcome.points_awarded, 0);
        assert_eq!(state.snake.body, vec![Position::new(11, 10)]);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_eats_food_and_grows() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();
        state.food = Position::new(11, 10);

        let outcome = engine.tick(&mut state);

        assert!(outcome.ate_food);
        assert_eq!(outcome.points_awarded, 10);
        assert_eq!(state.snake.head(), Position::new(11, 10));
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 10);
        assert_eq!(state.foods_eaten, 1);
        assert!(!state.game_over);
        // Respawned food never lands on the snake
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_wrap_around_edge() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();
        state.snake = Snake::new(Position::new(29, 10), Direction::Right, 1);

        let outcome = engine.tick(&mut state);

        assert!(!outcome.game_over);
        assert_eq!(state.snake.head(), Position::new(0, 10));
    }

    #[test]
    fn test_direction_applies_at_next_tick() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();

        engine.set_direction(&mut state, Direction::Down);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.pending_direction, Direction::Down);

        engine.tick(&mut state);
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.snake.head(), Position::new(10, 11));
    }

    #[test]
    fn test_reversal_rejected() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();

        engine.set_direction(&mut state, Direction::Left);
        assert_eq!(state.pending_direction, Direction::Right);

        engine.tick(&mut state);
        assert_eq!(state.snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_latest_valid_input_wins() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();

        // Two key events between ticks; only the last accepted one counts
        engine.set_direction(&mut state, Direction::Down);
        engine.set_direction(&mut state, Direction::Up);
        assert_eq!(state.pending_direction, Direction::Up);

        engine.tick(&mut state);
        assert_eq!(state.snake.head(), Position::new(10, 9));
    }

    #[test]
    fn test_self_collision_preserves_state() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();
        state.snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        state.food = Position::new(20, 20);

        // Loop back into the body: right, down, left, then up into (5, 5)
        engine.tick(&mut state);
        engine.set_direction(&mut state, Direction::Down);
        engine.tick(&mut state);
        engine.set_direction(&mut state, Direction::Left);
        engine.tick(&mut state);
        engine.set_direction(&mut state, Direction::Up);

        let before = state.clone();
        let outcome = engine.tick(&mut state);

        assert!(outcome.game_over);
        assert!(state.game_over);
        assert_eq!(state.snake, before.snake);
        assert_eq!(state.food, before.food);
        assert_eq!(state.score, before.score);
        assert_eq!(state.foods_eaten, before.foods_eaten);
    }

    #[test]
    fn test_moving_into_vacated_tail_is_legal() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();
        state.snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        state.food = Position::new(20, 20);

        // A length-4 snake turning in a tight box chases its own tail: the
        // tail cell is vacated on the same tick the head enters it.
        engine.tick(&mut state);
        engine.set_direction(&mut state, Direction::Down);
        engine.tick(&mut state);
        engine.set_direction(&mut state, Direction::Left);
        engine.tick(&mut state);
        engine.set_direction(&mut state, Direction::Up);
        let outcome = engine.tick(&mut state);

        assert!(!outcome.game_over);
        assert_eq!(state.snake.head(), Position::new(5, 5));
    }

    #[test]
    fn test_special_food_cadence() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();
        let mut expected_score = 0;

        for catch in 1..=10u32 {
            // Put the food directly in the snake's path
            state.food = state
                .snake
                .head()
                .step_wrapped(state.direction, state.grid_size);
            let outcome = engine.tick(&mut state);

            assert!(outcome.ate_food);
            expected_score += outcome.points_awarded;
            assert_eq!(state.score, expected_score);
            if catch % 5 == 0 {
                assert!(
                    (20..=50).contains(&outcome.points_awarded)
                        && outcome.points_awarded % 10 == 0,
                    "catch {} awarded {}",
                    catch,
                    outcome.points_awarded
                );
            } else {
                assert_eq!(outcome.points_awarded, 10, "catch {}", catch);
            }
            assert_eq!(state.foods_eaten, catch);
        }

        assert_eq!(state.snake.len(), 11);
    }

    #[test]
    fn test_food_respawn_avoids_snake() {
        let mut engine = seeded_engine(GameConfig::small());
        let mut state = engine.reset();

        for _ in 0..8 {
            state.food = state
                .snake
                .head()
                .step_wrapped(state.direction, state.grid_size);
            let outcome = engine.tick(&mut state);

            assert!(outcome.ate_food);
            assert!(!state.snake.occupies(state.food));
        }
    }

    #[test]
    fn test_tick_noop_when_game_over() {
        let mut engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();
        state.game_over = true;

        let before = state.clone();
        let outcome = engine.tick(&mut state);

        assert!(outcome.game_over);
        assert_eq!(outcome.points_awarded, 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_set_direction_rejected_when_game_over() {
        let engine = seeded_engine(GameConfig::default());
        let mut state = engine.reset();
        state.game_over = true;

        engine.set_direction(&mut state, Direction::Down);
        assert_eq!(state.pending_direction, Direction::Right);
    }
}
