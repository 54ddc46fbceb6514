use std::time::Duration;

use super::config::{
    Difficulty, GameConfig, LEVEL_SPEED_STEP_MS, POINTS_PER_LEVEL, POWER_UP_BOOST_MS,
    POWER_UP_FLOOR_MS, SPEED_FLOOR_MS, STARTING_LIVES,
};
use super::direction::Direction;
use super::fruit::FruitType;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// A one-cell snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty body or one with repeated cells.
    pub fn from_segments(body: Vec<Position>) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        for (i, pos) in body.iter().enumerate() {
            if body[i + 1..].contains(pos) {
                return None;
            }
        }
        Some(Self { body })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.insert(0, pos);
    }

    pub(crate) fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }

    /// Direction from the second segment to the head, if the snake has one
    pub fn neck_direction(&self) -> Option<Direction> {
        let neck = self.body.get(1)?;
        let head = self.head();
        Direction::from_delta(head.x - neck.x, head.y - neck.y)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// The fruit currently on the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub position: Position,
    pub fruit: &'static FruitType,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake hit a stone
    Obstacle,
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, waiting for start
    Idle,
    Running,
    Paused,
    /// Out of lives; only a restart leaves this phase
    Ended,
}

/// Board palette, a pure function of level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Classic,
    Desert,
    Ice,
}

impl Theme {
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=2 => Theme::Classic,
            3..=5 => Theme::Desert,
            _ => Theme::Ice,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Desert => "Desert",
            Theme::Ice => "Ice",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid_width: usize,
    pub grid_height: usize,
    pub difficulty: Difficulty,
    pub snake: Snake,
    /// Direction travelled on the last tick; `None` before the first start
    pub heading: Option<Direction>,
    /// Accepted direction change waiting for the next tick
    pub pending_direction: Option<Direction>,
    pub food: Option<Food>,
    /// Stones, oldest first
    pub obstacles: Vec<Position>,
    pub score: u32,
    pub lives: u32,
    pub high_score: u32,
    pub power_up_ticks: u32,
    pub phase: Phase,
    pub steps: u32,
}

impl GameState {
    /// Create a new idle game state with an empty board
    pub fn new(config: &GameConfig, high_score: u32) -> Self {
        let mut state = Self {
            grid_width: config.grid_width,
            grid_height: config.grid_height,
            difficulty: config.difficulty,
            snake: Snake::new(Position::new(0, 0)),
            heading: None,
            pending_direction: None,
            food: None,
            obstacles: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            high_score,
            power_up_ticks: 0,
            phase: Phase::Idle,
            steps: 0,
        };
        state.snake = Snake::new(state.center());
        state
    }

    pub fn center(&self) -> Position {
        Position::new(
            (self.grid_width / 2) as i32,
            (self.grid_height / 2) as i32,
        )
    }

    pub fn level(&self) -> u32 {
        1 + self.score / POINTS_PER_LEVEL
    }

    pub fn theme(&self) -> Theme {
        Theme::for_level(self.level())
    }

    pub fn power_up_active(&self) -> bool {
        self.power_up_ticks > 0
    }

    /// Tick interval from level and difficulty alone
    pub fn level_speed_ms(&self) -> u64 {
        let reduction = (self.level() as u64 - 1) * LEVEL_SPEED_STEP_MS
            + self.difficulty.speed_bonus_ms();
        self.difficulty
            .base_speed_ms()
            .saturating_sub(reduction)
            .max(SPEED_FLOOR_MS)
    }

    /// Current tick interval, including any active power-up
    pub fn speed_ms(&self) -> u64 {
        let level_speed = self.level_speed_ms();
        if self.power_up_active() {
            level_speed
                .saturating_sub(POWER_UP_BOOST_MS)
                .max(POWER_UP_FLOOR_MS)
        } else {
            level_speed
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms())
    }

    pub fn speed_label(&self) -> &'static str {
        if self.power_up_active() {
            return "Boosted";
        }
        match self.level() {
            0..=1 => "Normal",
            2..=3 => "Medium",
            4..=5 => "Fast",
            _ => "Very Fast",
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    pub fn is_food(&self, pos: Position) -> bool {
        self.food.is_some_and(|food| food.position == pos)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Heading the head should face when drawn
    pub fn facing(&self) -> Direction {
        self.heading
            .or_else(|| self.snake.neck_direction())
            .unwrap_or(Direction::Right)
    }
}
