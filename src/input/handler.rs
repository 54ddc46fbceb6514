use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::game::Direction;
use crate::render::ScreenLayout;

/// Minimum drag distance, in terminal cells, for a swipe
pub const SWIPE_THRESHOLD: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Steer(Direction),
    TogglePause,
    /// Start from the title screen, or restart after game over
    Confirm,
    Restart,
    Quit,
    None,
}

/// Classify a drag by its dominant axis
///
/// Returns `None` when the displacement along that axis does not exceed
/// `threshold`, which filters out taps.
pub fn classify_swipe(dx: i32, dy: i32, threshold: i32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx > threshold {
            Some(Direction::Right)
        } else if dx < -threshold {
            Some(Direction::Left)
        } else {
            None
        }
    } else if dy > threshold {
        Some(Direction::Down)
    } else if dy < -threshold {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Translates terminal key and mouse events into game intents
pub struct InputHandler {
    drag_start: Option<(u16, u16)>,
    swipe_threshold: i32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            drag_start: None,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => InputAction::Steer(Direction::Up),
            KeyCode::Down => InputAction::Steer(Direction::Down),
            KeyCode::Left => InputAction::Steer(Direction::Left),
            KeyCode::Right => InputAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => InputAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => InputAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => InputAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => InputAction::Steer(Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                InputAction::TogglePause
            }
            KeyCode::Enter => InputAction::Confirm,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Restart,

            _ => InputAction::None,
        }
    }

    /// Mouse drags become swipes; short clicks press on-screen buttons
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent, layout: &ScreenLayout) -> InputAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_start = Some((mouse.column, mouse.row));
                InputAction::None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some((start_col, start_row)) = self.drag_start.take() else {
                    return InputAction::None;
                };
                let dx = mouse.column as i32 - start_col as i32;
                let dy = mouse.row as i32 - start_row as i32;

                if let Some(direction) = classify_swipe(dx, dy, self.swipe_threshold) {
                    return InputAction::Steer(direction);
                }
                layout
                    .button_at(mouse.column, mouse.row)
                    .map(InputAction::Steer)
                    .unwrap_or(InputAction::None)
            }
            _ => InputAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn layout() -> ScreenLayout {
        ScreenLayout::new(Rect::new(0, 0, 100, 40), 30, 20)
    }

    fn drag(handler: &mut InputHandler, from: (u16, u16), to: (u16, u16)) -> InputAction {
        let layout = layout();
        let down = mouse(MouseEventKind::Down(MouseButton::Left), from.0, from.1);
        assert_eq!(handler.handle_mouse_event(down, &layout), InputAction::None);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), to.0, to.1);
        handler.handle_mouse_event(up, &layout)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ];
        for (code, direction) in cases {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(handler.handle_key_event(key), InputAction::Steer(direction));
        }
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        let w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(w), InputAction::Steer(Direction::Up));

        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(a), InputAction::Steer(Direction::Left));

        let s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(s), InputAction::Steer(Direction::Down));

        let d = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(d), InputAction::Steer(Direction::Right));
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(space), InputAction::TogglePause);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(enter), InputAction::Confirm);

        let r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(r), InputAction::Restart);

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(esc), InputAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), InputAction::Quit);

        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(x), InputAction::None);
    }

    #[test]
    fn test_classify_swipe() {
        assert_eq!(classify_swipe(30, 5, 20), Some(Direction::Right));
        assert_eq!(classify_swipe(-30, 5, 20), Some(Direction::Left));
        assert_eq!(classify_swipe(5, 30, 20), Some(Direction::Down));
        assert_eq!(classify_swipe(5, -30, 20), Some(Direction::Up));
        // below threshold is a tap
        assert_eq!(classify_swipe(10, 2, 20), None);
        // dominant axis decides, even if the other axis passes the threshold
        assert_eq!(classify_swipe(40, 25, 20), Some(Direction::Right));
        // ties go to the vertical axis
        assert_eq!(classify_swipe(25, -25, 20), Some(Direction::Up));
    }

    #[test]
    fn test_mouse_drag_steers() {
        let mut handler = InputHandler::new();
        assert_eq!(
            drag(&mut handler, (40, 10), (50, 11)),
            InputAction::Steer(Direction::Right)
        );
        assert_eq!(
            drag(&mut handler, (40, 10), (41, 4)),
            InputAction::Steer(Direction::Up)
        );
    }

    #[test]
    fn test_click_presses_button() {
        let mut handler = InputHandler::new();
        let layout = layout();
        let (direction, rect) = layout.buttons[0];
        let at = (rect.x + 2, rect.y + 1);

        assert_eq!(drag(&mut handler, at, at), InputAction::Steer(direction));
        // a tap away from any button does nothing
        assert_eq!(drag(&mut handler, (1, 1), (1, 1)), InputAction::None);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut handler = InputHandler::new();
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 10, 10);
        assert_eq!(handler.handle_mouse_event(up, &layout()), InputAction::None);
    }
}
