//! Draws snapshots onto the terminal grid.
//!
//! A frame is composed as a plain character grid first and written row by row
//! afterwards, so drawing can be checked without a terminal.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use game_core::driver::Renderer;
use game_core::{MatchState, Rect, Side, Snapshot};
use glam::Vec2;

pub const PADDLE: char = '█';
pub const BALL: char = '●';
pub const NET: char = '┊';

/// Smallest terminal the field is drawn in
pub const MIN_COLS: u16 = 30;
pub const MIN_ROWS: u16 = 10;

const HINT: &str = "W/S or ↑/↓ move   R restart   Q quit";

/// Character grid for one frame. Row 0 holds the score, the last row the
/// controls hint, and everything in between is the field.
#[derive(Debug, Clone)]
pub struct Frame {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl Frame {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    pub fn row(&self, row: usize) -> String {
        if row >= self.rows {
            return String::new();
        }
        self.cells[row * self.cols..(row + 1) * self.cols].iter().collect()
    }

    fn put(&mut self, col: usize, row: usize, ch: char) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = ch;
        }
    }

    fn text(&mut self, col: usize, row: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i, row, ch);
        }
    }

    fn text_centered(&mut self, row: usize, text: &str) {
        let width = text.chars().count();
        let col = self.cols.saturating_sub(width) / 2;
        self.text(col, row, text);
    }

    fn field_rows(&self) -> usize {
        self.rows.saturating_sub(2)
    }

    /// Fill the cells covered by `rect`, given in field units
    fn fill(&mut self, rect: &Rect, field: Vec2, ch: char) {
        let field_rows = self.field_rows();
        if field_rows == 0 || self.cols == 0 {
            return;
        }
        let sx = self.cols as f32 / field.x;
        let sy = field_rows as f32 / field.y;

        let (c0, c1) = cell_span(rect.left() * sx, rect.right() * sx, self.cols);
        let (r0, r1) = cell_span(rect.top() * sy, rect.bottom() * sy, field_rows);
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.put(col, row + 1, ch);
            }
        }
    }
}

/// Inclusive cell range covered by `[start, end)`, at least one cell wide
fn cell_span(start: f32, end: f32, cells: usize) -> (usize, usize) {
    let last = cells.saturating_sub(1) as f32;
    let first = start.floor().clamp(0.0, last);
    let final_cell = (end.ceil() - 1.0).clamp(first, last);
    (first as usize, final_cell as usize)
}

/// Lay out one snapshot on a `cols` x `rows` grid
pub fn compose(snapshot: &Snapshot, field: Vec2, cols: u16, rows: u16) -> Frame {
    let mut frame = Frame::new(cols as usize, rows as usize);
    if cols < MIN_COLS || rows < MIN_ROWS {
        frame.text(0, 0, "Terminal too small");
        return frame;
    }

    let field_rows = frame.field_rows();
    let center_col = frame.cols / 2;
    for row in (1..=field_rows).step_by(2) {
        frame.put(center_col, row, NET);
    }

    frame.text_centered(
        0,
        &format!(
            "YOU {:>2}   {:<2} CPU",
            snapshot.score.left, snapshot.score.right
        ),
    );

    frame.fill(&snapshot.left_paddle, field, PADDLE);
    frame.fill(&snapshot.right_paddle, field, PADDLE);
    frame.fill(&snapshot.ball, field, BALL);

    let middle = 1 + field_rows / 2;
    match snapshot.state {
        MatchState::Won(winner) => {
            let banner = match winner {
                Side::Left => " YOU WIN!  Press R to play again ",
                Side::Right => " CPU WINS.  Press R to play again ",
            };
            frame.text_centered(middle, banner);
        }
        MatchState::Playing if snapshot.serving => {
            frame.text_centered(1 + field_rows / 4, " GET READY ");
        }
        MatchState::Playing => {}
    }

    frame.text_centered(frame.rows - 1, HINT);
    frame
}

/// Writes composed frames to a crossterm backend
pub struct TerminalRenderer<W: Write> {
    out: W,
    field: Vec2,
    last_size: Option<(u16, u16)>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, field: Vec2) -> Self {
        Self {
            out,
            field,
            last_size: None,
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let size = terminal::size()?;
        if self.last_size != Some(size) {
            queue!(self.out, Clear(ClearType::All))?;
            self.last_size = Some(size);
        }

        // One column short so writing the last cell never scrolls the screen
        let (cols, rows) = size;
        let frame = compose(snapshot, self.field, cols.saturating_sub(1), rows);
        for row in 0..frame.rows() {
            queue!(self.out, MoveTo(0, row as u16), Print(frame.row(row)))?;
        }
        self.out.flush()
    }
}
