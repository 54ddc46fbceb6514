use ratatui::layout::{Constraint, Direction as Axis, Layout, Position as ScreenPosition, Rect};

use crate::game::Direction;

/// Terminal columns used to draw one grid cell
pub const CELL_WIDTH: u16 = 2;

/// Screen regions shared by the renderer and mouse hit-testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    /// Board including its border
    pub board: Rect,
    pub buttons: [(Direction, Rect); 4],
    pub help: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, grid_width: usize, grid_height: usize) -> Self {
        let rows = Layout::default()
            .direction(Axis::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Buttons
                Constraint::Length(1), // Help
            ])
            .split(area);

        let board_width = (grid_width as u16).saturating_mul(CELL_WIDTH).saturating_add(2);
        let board_height = (grid_height as u16).saturating_add(2);

        let button_row = centered(rows[2], 4 * 9, rows[2].height);
        let button_cells = Layout::default()
            .direction(Axis::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(button_row);

        Self {
            header: rows[0],
            board: centered(rows[1], board_width, board_height),
            buttons: [
                (Direction::Left, button_cells[0]),
                (Direction::Up, button_cells[1]),
                (Direction::Down, button_cells[2]),
                (Direction::Right, button_cells[3]),
            ],
            help: rows[3],
        }
    }

    /// Direction button under a terminal cell, if any
    pub fn button_at(&self, column: u16, row: u16) -> Option<Direction> {
        let point = ScreenPosition::new(column, row);
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(direction, _)| *direction)
    }
}

/// A rect of at most `width` x `height` centered inside `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_fits_grid() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 100, 40), 30, 20);
        assert_eq!(layout.board.width, 62);
        assert_eq!(layout.board.height, 22);
        assert_eq!(layout.header.height, 3);
    }

    #[test]
    fn test_board_clamped_to_small_terminal() {
        let area = Rect::new(0, 0, 20, 10);
        let layout = ScreenLayout::new(area, 30, 20);
        assert!(layout.board.width <= area.width);
        assert!(layout.board.height <= area.height);
    }

    #[test]
    fn test_button_hit_testing() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 100, 40), 30, 20);
        for (direction, rect) in layout.buttons {
            assert_eq!(layout.button_at(rect.x + 1, rect.y + 1), Some(direction));
        }
        assert_eq!(layout.button_at(0, 0), None);
    }

    #[test]
    fn test_centered() {
        let rect = centered(Rect::new(10, 10, 20, 10), 10, 4);
        assert_eq!(rect, Rect::new(15, 13, 10, 4));
    }
}
