use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::layout::{ScreenLayout, centered};
use crate::game::{Direction, GameState, Phase, Position, Theme};
use crate::hud::Hud;

/// Colors for one board theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub grid: Color,
    pub stone: Color,
    pub border: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Classic => Self {
                background: Color::Black,
                grid: Color::Rgb(0x1a, 0x1a, 0x1a),
                stone: Color::Rgb(0x88, 0x88, 0x88),
                border: Color::White,
            },
            Theme::Desert => Self {
                background: Color::Rgb(0x1a, 0x12, 0x08),
                grid: Color::Rgb(0x3a, 0x2a, 0x18),
                stone: Color::Rgb(0x9a, 0x80, 0x66),
                border: Color::Rgb(0xe0, 0xb0, 0x70),
            },
            Theme::Ice => Self {
                background: Color::Rgb(0x02, 0x15, 0x23),
                grid: Color::Rgb(0x0c, 0x3a, 0x66),
                stone: Color::Rgb(0x7a, 0xa2, 0xc9),
                border: Color::Rgb(0xa0, 0xd8, 0xff),
            },
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

/// Body segments fade the further they are from the head
fn body_color(index: usize) -> Color {
    let green = 220usize.saturating_sub(index * 10).max(60) as u8;
    Color::Rgb(76, green, 80)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, hud: &Hud) {
        let layout = ScreenLayout::new(frame.area(), state.grid_width, state.grid_height);

        frame.render_widget(self.render_stats(state, hud), layout.header);
        frame.render_widget(self.render_grid(state), layout.board);

        match state.phase {
            Phase::Idle => self.render_popup(frame, layout.board, self.start_screen(state)),
            Phase::Paused => self.render_popup(frame, layout.board, self.pause_screen()),
            Phase::Ended => self.render_popup(frame, layout.board, self.game_over(state, hud)),
            Phase::Running => {}
        }

        for (direction, rect) in layout.buttons {
            frame.render_widget(self.render_button(direction), rect);
        }
        frame.render_widget(self.render_controls(), layout.help);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let palette = Palette::for_theme(state.theme());
        let segments: HashMap<Position, usize> = state
            .snake
            .segments()
            .iter()
            .enumerate()
            .map(|(i, pos)| (*pos, i))
            .collect();
        let tail_index = state.snake.len() - 1;

        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = match segments.get(&pos).copied() {
                    Some(0) => Span::styled(
                        head_glyph(state.facing()),
                        Style::default()
                            .fg(Color::Rgb(0x9d, 0xf2, 0x8f))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(i) if i == tail_index => {
                        Span::styled("• ", Style::default().fg(Color::Rgb(76, 120, 80)))
                    }
                    Some(i) => Span::styled("■ ", Style::default().fg(body_color(i))),
                    None if state.is_obstacle(pos) => {
                        Span::styled("▓▓", Style::default().fg(palette.stone))
                    }
                    None => match state.food {
                        Some(food) if food.position == pos => {
                            let (r, g, b) = food.fruit.color;
                            Span::styled(
                                "● ",
                                Style::default()
                                    .fg(Color::Rgb(r, g, b))
                                    .add_modifier(Modifier::BOLD),
                            )
                        }
                        _ => Span::styled("· ", Style::default().fg(palette.grid)),
                    },
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .style(Style::default().bg(palette.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(palette.border))
                    .title(format!(" Snake · {} ", state.theme().name())),
            )
    }

    fn render_stats(&self, state: &GameState, hud: &Hud) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let hearts: String = (0..3)
            .map(|i| if i < hud.lives { '♥' } else { '♡' })
            .collect();

        let mut stats = vec![
            Span::styled("Score: ", label),
            Span::styled(hud.score.to_string(), value),
            Span::raw("   "),
            Span::styled("Level: ", label),
            Span::styled(hud.level.to_string(), value),
            Span::raw("   "),
            Span::styled("Best: ", label),
            Span::styled(hud.high_score.to_string(), value),
            Span::raw("   "),
            Span::styled(hearts, Style::default().fg(Color::Red)),
            Span::raw("   "),
            Span::styled(format!("Speed: {}", hud.speed_label), label),
        ];
        if hud.power_up_visible {
            stats.push(Span::raw("   "));
            stats.push(Span::styled(
                "⚡ POWER-UP",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let mut details = vec![
            Span::styled(state.difficulty.label(), Style::default().fg(Color::Cyan)),
            Span::raw("   "),
            Span::styled("Time: ", label),
            Span::styled(hud.format_time(), Style::default().fg(Color::White)),
        ];
        if let Some(banner) = &hud.banner {
            details.push(Span::raw("   "));
            details.push(Span::styled(
                banner.clone(),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(vec![Line::from(stats), Line::from(details)]).alignment(Alignment::Center)
    }

    fn render_popup(&self, frame: &mut Frame, board: Rect, popup: Paragraph<'static>) {
        let area = centered(board, 36, 9);
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }

    fn start_screen(&self, state: &GameState) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Difficulty: {}", state.difficulty.label())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        popup(text, Color::Green)
    }

    fn pause_screen(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Space to resume",
                Style::default().fg(Color::Gray),
            )),
        ];

        popup(text, Color::Yellow)
    }

    fn game_over(&self, state: &GameState, hud: &Hud) -> Paragraph<'static> {
        let (score, level) = hud
            .summary
            .map(|summary| (summary.score, summary.level))
            .unwrap_or((state.score, state.level()));

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(format!("Final Score: {score}   Level: {level}")),
            Line::from(format!("Best: {}", state.high_score)),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        popup(text, Color::Red)
    }

    fn render_button(&self, direction: Direction) -> Paragraph<'static> {
        let label = match direction {
            Direction::Up => "▲",
            Direction::Down => "▼",
            Direction::Left => "◀",
            Direction::Right => "▶",
        };

        Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / drag to move | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

fn popup(text: Vec<Line<'static>>, border: Color) -> Paragraph<'static> {
    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    )
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{FRUITS, Food, GameConfig, GameEngine, Snake};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &GameState, hud: &Hud) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 36)).unwrap();
        let renderer = Renderer::new();
        terminal
            .draw(|frame| renderer.render(frame, state, hud))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn running_state() -> GameState {
        let mut engine = GameEngine::with_rng(GameConfig::default(), StdRng::seed_from_u64(1));
        let (state, _) = engine.restart(0);
        state
    }

    #[test]
    fn test_render_does_not_mutate_state() {
        let mut state = running_state();
        state.snake = Snake::from_segments(vec![
            Position::new(4, 4),
            Position::new(3, 4),
            Position::new(2, 4),
        ])
        .unwrap();
        let hud = Hud::new(&state);
        let before = state.clone();

        draw(&state, &hud);

        assert_eq!(state, before);
    }

    #[test]
    fn test_draws_distinct_pieces() {
        let mut state = running_state();
        state.obstacles = vec![Position::new(0, 0)];
        state.snake = Snake::from_segments(vec![
            Position::new(6, 6),
            Position::new(5, 6),
            Position::new(4, 6),
        ])
        .unwrap();
        state.food = Some(Food {
            position: Position::new(10, 10),
            fruit: &FRUITS[0],
        });

        let screen = draw(&state, &Hud::new(&state));

        assert!(screen.contains('▶'));
        assert!(screen.contains('■'));
        assert!(screen.contains('•'));
        assert!(screen.contains('●'));
        assert!(screen.contains('▓'));
        assert!(screen.contains("Score"));
    }

    #[test]
    fn test_overlays_follow_phase() {
        let mut state = running_state();
        let hud = Hud::new(&state);
        assert!(!draw(&state, &hud).contains("PAUSED"));

        state.phase = Phase::Paused;
        assert!(draw(&state, &hud).contains("PAUSED"));

        state.phase = Phase::Ended;
        assert!(draw(&state, &hud).contains("GAME OVER"));

        state.phase = Phase::Idle;
        assert!(draw(&state, &hud).contains("Enter"));
    }

    #[test]
    fn test_theme_palettes_differ() {
        let classic = Palette::for_theme(Theme::Classic);
        let desert = Palette::for_theme(Theme::Desert);
        let ice = Palette::for_theme(Theme::Ice);
        assert_ne!(classic, desert);
        assert_ne!(desert, ice);
    }

    #[test]
    fn test_body_fades() {
        assert_eq!(body_color(1), Color::Rgb(76, 210, 80));
        assert_eq!(body_color(50), Color::Rgb(76, 60, 80));
    }
}
