use ratatui::layout::{Constraint, Direction, Layout, Position as CellPos, Rect};

use crate::session::{PlayArea, Session, Target};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const BUTTON_WIDTH: u16 = 10;

/// Screen regions, derived purely from the frame area so mouse handling
/// can recompute exactly what was drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub status: Rect,
    pub input: Rect,
    pub time: Rect,
    pub play_button: Rect,
    /// Outer play area including its border
    pub board: Rect,
    /// Cells targets may occupy
    pub board_inner: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // status
                Constraint::Length(3), // point input
                Constraint::Length(1), // time
                Constraint::Length(3), // play button
                Constraint::Min(3),    // board
            ])
            .split(area);

        let button_row = chunks[3];
        let play_button = Rect {
            width: BUTTON_WIDTH.min(button_row.width),
            ..button_row
        };

        let board = chunks[4];
        let board_inner = Rect {
            x: board.x.saturating_add(1),
            y: board.y.saturating_add(1),
            width: board.width.saturating_sub(2),
            height: board.height.saturating_sub(2),
        };

        Self {
            status: chunks[0],
            input: chunks[1],
            time: chunks[2],
            play_button,
            board,
            board_inner,
        }
    }

    pub fn play_area(&self) -> PlayArea {
        PlayArea::new(self.board_inner.width, self.board_inner.height)
    }

    pub fn on_play_button(&self, column: u16, row: u16) -> bool {
        self.play_button.contains(CellPos::new(column, row))
    }

    /// Where a target lands on screen, clipped to the board
    pub fn target_rect(&self, session: &Session, target: &Target) -> Rect {
        let (w, h) = session.target_size();
        Rect {
            x: self.board_inner.x.saturating_add(target.position.x),
            y: self.board_inner.y.saturating_add(target.position.y),
            width: w,
            height: h,
        }
        .intersection(self.board_inner)
    }

    /// Topmost unclicked target under the pointer
    pub fn target_at(&self, session: &Session, column: u16, row: u16) -> Option<u32> {
        let cell = CellPos::new(column, row);
        session
            .visible_targets()
            .filter(|t| self.target_rect(session, t).contains(cell))
            .max_by_key(|t| t.z_index)
            .map(|t| t.id)
    }
}
