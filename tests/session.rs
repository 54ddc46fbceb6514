use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snake_arcade::game::{
    CollisionType, Difficulty, Direction, GameConfig, GameEngine, GameEvent, GameState, Phase,
    Position,
};

fn engine(config: GameConfig, seed: u64) -> GameEngine<StdRng> {
    GameEngine::with_rng(config, StdRng::seed_from_u64(seed))
}

fn assert_invariants(state: &GameState) {
    let cells: HashSet<Position> = state.snake.segments().iter().copied().collect();
    assert_eq!(cells.len(), state.snake.len(), "snake has duplicate cells");
    assert!(state.snake.len() >= 1);

    if let Some(food) = state.food {
        assert!(!cells.contains(&food.position), "food under the snake");
        assert!(!state.is_obstacle(food.position), "food under a stone");
    }
    for stone in &state.obstacles {
        assert!(!cells.contains(stone), "stone under the snake");
    }

    assert_eq!(state.level(), 1 + state.score / 100);
    assert_eq!(
        state.obstacles.len(),
        state.difficulty.obstacle_target(state.level())
    );
}

#[test]
fn wall_crossing_costs_a_life_and_recenters() {
    let mut engine = engine(GameConfig::new(10, 10), 1);
    let (mut state, _) = engine.restart(0);
    state.obstacles.clear();
    state.food = None;
    assert_eq!(state.snake.head(), Position::new(5, 5));

    for _ in 0..4 {
        let result = engine.step(&mut state);
        assert!(result.info.collision_type.is_none());
    }
    assert_eq!(state.snake.head(), Position::new(9, 5));

    let result = engine.step(&mut state);
    assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
    assert_eq!(state.lives, 2);
    assert_eq!(state.phase, Phase::Running);
    assert_eq!(state.snake.segments(), &[Position::new(5, 5)]);
    assert_eq!(state.heading, Some(Direction::Right));
}

#[test]
fn losing_every_life_freezes_the_session() {
    let mut engine = engine(GameConfig::new(10, 10), 2);
    let (mut state, _) = engine.restart(0);
    state.obstacles.clear();

    let mut ended = Vec::new();
    for _ in 0..100 {
        let result = engine.step(&mut state);
        ended.extend(
            result
                .events
                .into_iter()
                .filter(|e| matches!(e, GameEvent::GameEnded { .. })),
        );
        if result.terminated {
            break;
        }
    }

    assert_eq!(state.phase, Phase::Ended);
    assert_eq!(state.lives, 0);
    assert_eq!(ended.len(), 1);

    let frozen = state.clone();
    for _ in 0..10 {
        engine.step(&mut state);
    }
    assert_eq!(state, frozen);
}

#[test]
fn random_play_keeps_board_consistent() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let mut engine = engine(GameConfig::new(16, 12).with_difficulty(difficulty), 9);
        let mut player = StdRng::seed_from_u64(99);
        let (mut state, _) = engine.restart(0);
        assert_invariants(&state);

        for _ in 0..3000 {
            if state.is_over() {
                state = engine.restart(state.high_score).0;
            }

            let direction = Direction::ALL[player.gen_range(0..4)];
            if let Some(heading) = state.heading {
                let accepted = engine.steer(&mut state, direction);
                assert_eq!(accepted, !heading.is_opposite(direction));
            }

            let length = state.snake.len();
            let result = engine.step(&mut state);

            if result.info.ate_food {
                assert_eq!(state.snake.len(), length + 1);
            } else if result.info.collision_type.is_none() {
                assert_eq!(state.snake.len(), length);
            }
            assert!(state.high_score >= state.score);
            assert_invariants(&state);
        }
    }
}

#[test]
fn eating_steadily_raises_level_and_speed() {
    let mut engine = engine(GameConfig::new(30, 20), 5);
    let (mut state, _) = engine.restart(0);
    let base = state.level_speed_ms();

    let mut eaten = 0;
    for _ in 0..40 {
        state.snake = snake_arcade::game::Snake::new(Position::new(1, 1));
        state.heading = Some(Direction::Right);
        state
            .obstacles
            .retain(|p| p.y != 1 || p.x > 2);
        let fruit = state.food.expect("food on a sparse board").fruit;
        state.food = Some(snake_arcade::game::Food {
            position: Position::new(2, 1),
            fruit,
        });

        let result = engine.step(&mut state);
        assert!(result.info.ate_food);
        eaten += 1;
        assert_invariants(&state);
    }

    assert_eq!(eaten, 40);
    assert!(state.level() > 1);
    assert!(state.level_speed_ms() < base);
}
