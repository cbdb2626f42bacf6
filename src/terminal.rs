//! Presents the canvas in a terminal using half-block cells.
//!
//! Each cell shows two stacked pixels: the foreground paints the upper half
//! (`▀`) and the background the lower half. Text labels are printed as plain
//! characters on top.

use crate::color::Color;
use crate::graphics::{Canvas, TextAnchor, TextLabel};
use crate::sketch::BACKGROUND;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, IsTerminal, Stdout, Write};
use tracing::{debug, info};

/// Rows kept free under the diagram for the host's status text
pub const STATUS_ROWS: u16 = 6;

const UPPER_HALF_BLOCK: char = '▀';

/// Cell area the canvas is scaled into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Largest area with the canvas's aspect ratio that fits the terminal
    pub fn fit(
        canvas_width: usize,
        canvas_height: usize,
        term_cols: u16,
        term_rows: u16,
    ) -> Option<Viewport> {
        let avail_rows = term_rows.saturating_sub(STATUS_ROWS) as usize;
        if term_cols == 0 || avail_rows == 0 || canvas_width == 0 || canvas_height == 0 {
            return None;
        }

        let max_w = term_cols as usize;
        let max_h = avail_rows * 2;
        let w = max_w.min(max_h * canvas_width / canvas_height);
        let h = w * canvas_height / canvas_width;
        let rows = h.div_ceil(2);
        if w == 0 || rows == 0 {
            return None;
        }
        Some(Viewport {
            cols: w as u16,
            rows: rows as u16,
        })
    }

    /// Number of pixel rows, two per cell
    pub fn sub_rows(&self) -> usize {
        self.rows as usize * 2
    }
}

/// Shrinks the canvas to `cols × sub_rows` samples, keeping the brightest
/// pixel of each block so thin lines survive
pub fn downsample(canvas: &Canvas, cols: usize, sub_rows: usize) -> Vec<Color> {
    let (cw, ch) = (canvas.width(), canvas.height());
    let mut samples = Vec::with_capacity(cols * sub_rows);
    for sy in 0..sub_rows {
        let y0 = sy * ch / sub_rows;
        let y1 = ((sy + 1) * ch / sub_rows).max(y0 + 1).min(ch);
        for sx in 0..cols {
            let x0 = sx * cw / cols;
            let x1 = ((sx + 1) * cw / cols).max(x0 + 1).min(cw);

            let mut best = BACKGROUND;
            let mut best_luma = None;
            for y in y0..y1 {
                for x in x0..x1 {
                    if let Some(color) = canvas.pixel(x, y) {
                        let luma = color.luminance();
                        if best_luma.map_or(true, |b| luma > b) {
                            best = color;
                            best_luma = Some(luma);
                        }
                    }
                }
            }
            samples.push(best);
        }
    }
    samples
}

/// Cell position and visible text for a label, or `None` if it falls outside
pub fn place_label(
    label: &TextLabel,
    canvas: &Canvas,
    viewport: Viewport,
) -> Option<(u16, u16, String)> {
    let cols = viewport.cols as f64;
    let col = label.x * cols / canvas.width() as f64;
    let row = (label.y * viewport.sub_rows() as f64 / (2.0 * canvas.height() as f64)).floor();

    let len = label.text.chars().count() as f64;
    let start = match label.anchor {
        TextAnchor::Center => (col - len / 2.0).round(),
        TextAnchor::TopLeft => col.round(),
    };
    if row < 0.0 || row >= viewport.rows as f64 || start >= cols {
        return None;
    }

    let skip = if start < 0.0 { (-start) as usize } else { 0 };
    let start = start.max(0.0) as usize;
    let room = viewport.cols as usize - start;
    let text: String = label.text.chars().skip(skip).take(room).collect();
    if text.is_empty() {
        return None;
    }
    Some((start as u16, row as u16, text))
}

/// The terminal acting as the drawing surface's root container
pub struct TerminalView {
    stdout: Stdout,
    term_cols: u16,
    term_rows: u16,
    needs_clear: bool,
}

impl TerminalView {
    /// Takes over the terminal, or returns `Ok(None)` when there is none to draw on
    pub fn attach() -> io::Result<Option<Self>> {
        let stdout = io::stdout();
        if !stdout.is_terminal() {
            return Ok(None);
        }
        let Some(size) = termsize::get() else {
            return Ok(None);
        };

        enable_raw_mode()?;
        let mut view = TerminalView {
            stdout,
            term_cols: size.cols,
            term_rows: size.rows,
            needs_clear: true,
        };
        execute!(view.stdout, EnterAlternateScreen, Hide)?;
        info!(cols = size.cols, rows = size.rows, "Attached to terminal");
        Ok(Some(view))
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        debug!(cols, rows, "Terminal resized");
        self.term_cols = cols;
        self.term_rows = rows;
        self.needs_clear = true;
    }

    /// Writes one frame plus the status lines underneath it
    pub fn present(&mut self, canvas: &Canvas, status: &[String]) -> io::Result<()> {
        if self.needs_clear {
            queue!(self.stdout, ResetColor, Clear(ClearType::All))?;
            self.needs_clear = false;
        }
        let fitted = Viewport::fit(canvas.width(), canvas.height(), self.term_cols, self.term_rows);
        let Some(viewport) = fitted else {
            return self.stdout.flush();
        };

        let cols = viewport.cols as usize;
        let samples = downsample(canvas, cols, viewport.sub_rows());
        let mut current: Option<(Color, Color)> = None;
        for row in 0..viewport.rows as usize {
            queue!(self.stdout, MoveTo(0, row as u16))?;
            for col in 0..cols {
                let top = samples[(2 * row) * cols + col];
                let bottom = samples[(2 * row + 1) * cols + col];
                if current != Some((top, bottom)) {
                    queue!(
                        self.stdout,
                        SetForegroundColor(top.into()),
                        SetBackgroundColor(bottom.into())
                    )?;
                    current = Some((top, bottom));
                }
                queue!(self.stdout, Print(UPPER_HALF_BLOCK))?;
            }
        }

        queue!(self.stdout, SetBackgroundColor(BACKGROUND.into()))?;
        for label in canvas.labels() {
            if let Some((col, row, text)) = place_label(label, canvas, viewport) {
                queue!(
                    self.stdout,
                    MoveTo(col, row),
                    SetForegroundColor(label.color.into()),
                    Print(text)
                )?;
            }
        }

        queue!(self.stdout, ResetColor)?;
        let width = self.term_cols as usize;
        for (i, line) in status.iter().take(STATUS_ROWS as usize).enumerate() {
            let line: String = line.chars().take(width).collect();
            queue!(
                self.stdout,
                MoveTo(0, viewport.rows + i as u16),
                Clear(ClearType::UntilNewLine),
                Print(line)
            )?;
        }
        self.stdout.flush()
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{Stroke, CANVAS_HEIGHT, CANVAS_WIDTH};

    #[test]
    fn test_viewport_keeps_aspect_ratio() {
        let vp = Viewport::fit(CANVAS_WIDTH, CANVAS_HEIGHT, 80, 40).unwrap();
        assert_eq!(vp.cols, 80);
        assert_eq!(vp.rows, 15);

        // short terminal: height limits the width
        let vp = Viewport::fit(CANVAS_WIDTH, CANVAS_HEIGHT, 200, 21).unwrap();
        assert_eq!(vp.rows, 15);
        assert_eq!(vp.cols, 80);
    }

    #[test]
    fn test_viewport_too_small() {
        assert_eq!(Viewport::fit(CANVAS_WIDTH, CANVAS_HEIGHT, 80, STATUS_ROWS), None);
        assert_eq!(Viewport::fit(CANVAS_WIDTH, CANVAS_HEIGHT, 0, 40), None);
    }

    #[test]
    fn test_downsample_keeps_thin_lines() {
        let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        canvas.background(BACKGROUND);
        canvas.draw_line(0.0, 151.0, 799.0, 151.0, &Stroke::new(Color::WHITE, 1.0));

        let samples = downsample(&canvas, 80, 30);
        assert_eq!(samples.len(), 80 * 30);
        // pixel row 151 lands in sample row 15
        assert!((0..80).all(|x| samples[15 * 80 + x] == Color::WHITE));
        assert!((0..80).all(|x| samples[14 * 80 + x] == BACKGROUND));
    }

    #[test]
    fn test_label_placement() {
        let canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        let vp = Viewport { cols: 80, rows: 15 };
        let label = TextLabel {
            x: 400.0,
            y: 100.0,
            text: "π/2".into(),
            color: Color::WHITE,
            size: 12.0,
            anchor: TextAnchor::Center,
        };
        assert_eq!(place_label(&label, &canvas, vp), Some((39, 5, "π/2".to_string())));

        let clipped = TextLabel {
            x: 790.0,
            anchor: TextAnchor::TopLeft,
            text: "long text".into(),
            ..label.clone()
        };
        assert_eq!(place_label(&clipped, &canvas, vp), Some((79, 5, "l".to_string())));

        let below = TextLabel { y: 300.0, ..label };
        assert_eq!(place_label(&below, &canvas, vp), None);
    }
}
