use log::{debug, info};
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;

use super::{
    config::{GameConfig, POWER_UP_PROBABILITY, POWER_UP_TICKS},
    direction::Direction,
    events::GameEvent,
    fruit,
    state::{CollisionType, Food, GameState, Phase, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the session has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
    /// UI events produced by this step, in order
    pub events: Vec<GameEvent>,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            terminated,
            info: StepInfo {
                ate_food: false,
                collision_type: None,
            },
            events: Vec::new(),
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = ThreadRng> {
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
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build an idle session with food and stones already placed
    pub fn new_session(&mut self, high_score: u32) -> GameState {
        let mut state = GameState::new(&self.config, high_score);
        self.place_food(&mut state);
        self.resize_obstacles(&mut state);
        state
    }

    /// Build a fresh session and start it right away
    pub fn restart(&mut self, high_score: u32) -> (GameState, Vec<GameEvent>) {
        let mut state = self.new_session(high_score);
        let events = self.start(&mut state);
        (state, events)
    }

    /// Move an idle session into the running phase
    pub fn start(&mut self, state: &mut GameState) -> Vec<GameEvent> {
        if state.phase != Phase::Idle {
            return Vec::new();
        }

        state.heading = Some(Direction::Right);
        state.pending_direction = None;
        self.resize_obstacles(state);
        state.phase = Phase::Running;

        info!(
            "session started: {:?} on {}x{} grid",
            state.difficulty, state.grid_width, state.grid_height
        );

        vec![GameEvent::Started, tick_summary(state)]
    }

    /// Toggle between running and paused; ignored in any other phase
    pub fn toggle_pause(&self, state: &mut GameState) -> Option<GameEvent> {
        match state.phase {
            Phase::Running => {
                state.phase = Phase::Paused;
                Some(GameEvent::PauseChanged(true))
            }
            Phase::Paused => {
                state.phase = Phase::Running;
                Some(GameEvent::PauseChanged(false))
            }
            Phase::Idle | Phase::Ended => None,
        }
    }

    /// Queue a direction change for the next tick
    ///
    /// Rejected unless the session is running, and rejected when it would
    /// reverse the heading the snake last moved in.
    pub fn steer(&self, state: &mut GameState, direction: Direction) -> bool {
        if state.phase != Phase::Running {
            return false;
        }
        if let Some(heading) = state.heading
            && heading.is_opposite(direction)
        {
            return false;
        }
        state.pending_direction = Some(direction);
        true
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        match state.phase {
            Phase::Running => {}
            Phase::Ended => return StepResult::idle(true),
            Phase::Idle | Phase::Paused => return StepResult::idle(false),
        }

        if let Some(direction) = state.pending_direction.take() {
            state.heading = Some(direction);
        }
        let Some(heading) = state.heading else {
            return StepResult::idle(false);
        };

        let new_head = state.snake.head().moved_in_direction(heading);
        let mut events = Vec::new();
        state.steps += 1;

        if let Some(collision_type) = self.check_collision(state, new_head) {
            debug!("collision {:?} at ({}, {})", collision_type, new_head.x, new_head.y);
            self.lose_life(state, &mut events);
            if !state.is_over() {
                events.push(tick_summary(state));
            }
            return StepResult {
                terminated: state.is_over(),
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
                events,
            };
        }

        state.snake.push_head(new_head);

        let eaten = state.food.filter(|food| food.position == new_head);
        if let Some(food) = eaten {
            self.consume(state, food, &mut events);
        } else {
            state.snake.pop_tail();
        }

        if state.power_up_active() {
            state.power_up_ticks -= 1;
            if !state.power_up_active() {
                events.push(GameEvent::PowerUpChanged(false));
            }
        }

        if state.score > state.high_score {
            state.high_score = state.score;
            events.push(GameEvent::HighScoreBeaten(state.high_score));
        }

        events.push(tick_summary(state));

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food: eaten.is_some(),
                collision_type: None,
            },
            events,
        }
    }

    fn consume(&mut self, state: &mut GameState, food: Food, events: &mut Vec<GameEvent>) {
        let previous_level = state.level();
        let previous_theme = state.theme();

        state.score += food.fruit.points;
        events.push(GameEvent::ScoreChanged {
            score: state.score,
            level: state.level(),
        });
        if state.level() != previous_level {
            info!("level {} reached with score {}", state.level(), state.score);
        }

        if self.rng.gen_bool(POWER_UP_PROBABILITY) {
            if !state.power_up_active() {
                events.push(GameEvent::PowerUpChanged(true));
            }
            state.power_up_ticks = POWER_UP_TICKS;
        }

        self.place_food(state);

        if state.theme() != previous_theme {
            events.push(GameEvent::ThemeChanged(state.theme()));
        }

        self.resize_obstacles(state);
    }

    fn lose_life(&mut self, state: &mut GameState, events: &mut Vec<GameEvent>) {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost { lives: state.lives });

        if state.lives == 0 {
            state.phase = Phase::Ended;
            info!(
                "game over: score {} at level {}",
                state.score,
                state.level()
            );
            events.push(GameEvent::GameEnded {
                score: state.score,
                level: state.level(),
            });
            return;
        }

        info!("life lost, {} remaining", state.lives);
        state.snake = Snake::new(state.center());
        state.heading = Some(Direction::Right);
        state.pending_direction = None;
        if state.power_up_active() {
            state.power_up_ticks = 0;
            events.push(GameEvent::PowerUpChanged(false));
        }
        self.place_food(state);
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.contains(pos) {
            return Some(CollisionType::SelfCollision);
        }

        if state.is_obstacle(pos) {
            return Some(CollisionType::Obstacle);
        }

        None
    }

    /// Put a new random fruit on a free cell, or clear it if the board is full
    pub fn place_food(&mut self, state: &mut GameState) {
        let fruit = fruit::random_fruit(&mut self.rng);
        let cell = self.random_free_cell(state, |s, pos| {
            s.snake.contains(pos) || s.is_obstacle(pos)
        });
        state.food = cell.map(|position| Food { position, fruit });
        if state.food.is_none() {
            debug!("no free cell left for food");
        }
    }

    /// Grow or truncate the stone set to the target for the current level
    pub fn resize_obstacles(&mut self, state: &mut GameState) {
        let target = state.difficulty.obstacle_target(state.level());
        let spawn = state.center();
        let first_step = spawn.moved_in_direction(Direction::Right);

        while state.obstacles.len() < target {
            let cell = self.random_free_cell(state, |s, pos| {
                pos == spawn
                    || pos == first_step
                    || s.snake.contains(pos)
                    || s.is_food(pos)
                    || s.is_obstacle(pos)
            });
            match cell {
                Some(pos) => state.obstacles.push(pos),
                None => {
                    debug!(
                        "board full, stopping at {} of {} stones",
                        state.obstacles.len(),
                        target
                    );
                    break;
                }
            }
        }

        state.obstacles.truncate(target);
    }

    /// Rejection-sample a cell that `blocked` accepts, falling back to a full scan
    fn random_free_cell<F>(&mut self, state: &GameState, blocked: F) -> Option<Position>
    where
        F: Fn(&GameState, Position) -> bool,
    {
        let attempts = state.grid_width * state.grid_height * 4;
        for _ in 0..attempts {
            let x = self.rng.gen_range(0..state.grid_width) as i32;
            let y = self.rng.gen_range(0..state.grid_height) as i32;
            let pos = Position::new(x, y);
            if !blocked(state, pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..state.grid_height as i32)
            .flat_map(|y| (0..state.grid_width as i32).map(move |x| Position::new(x, y)))
            .filter(|&pos| !blocked(state, pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

fn tick_summary(state: &GameState) -> GameEvent {
    GameEvent::Tick {
        score: state.score,
        level: state.level(),
        lives: state.lives,
        speed_label: state.speed_label(),
    }
}
