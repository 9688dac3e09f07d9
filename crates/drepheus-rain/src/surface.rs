//! Fading cell grid the rain draws into.

use drepheus_core::ColorTheme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use thiserror::Error;

use crate::color::{mix, shade};

/// Intensity below which a faded cell is treated as empty.
const VISIBLE_THRESHOLD: f32 = 0.04;

/// Intensity above which a rain glyph is drawn as the bright head.
const HEAD_THRESHOLD: f32 = 0.95;

/// Blur radius at which the glow halo is at full strength.
const FULL_BLUR: f32 = 50.0;

const WHITE: (u8, u8, u8) = (0xff, 0xff, 0xff);

/// Failure to acquire a drawing surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("viewport {width}x{height} is too small for cell size {cell_size}")]
    Degenerate {
        width: u32,
        height: u32,
        cell_size: u32,
    },
}

/// Viewport dimensions in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Side of one glyph cell, in the same units as `width` and `height`.
    pub cell_size: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// A terminal viewport, where every glyph occupies exactly one cell.
    pub fn cells(width: u16, height: u16) -> Self {
        Self::new(u32::from(width), u32::from(height), 1)
    }

    /// Number of rain columns: `floor(width / cell_size)`.
    pub fn columns(&self) -> usize {
        if self.cell_size == 0 {
            return 0;
        }
        (self.width / self.cell_size) as usize
    }

    /// Number of rows the surface can show: `ceil(height / cell_size)`.
    pub fn rows(&self) -> usize {
        if self.cell_size == 0 {
            return 0;
        }
        self.height.div_ceil(self.cell_size) as usize
    }
}

/// One cell of the trail surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailCell {
    pub glyph: char,
    /// Brightness left after fading, `0.0..=1.0`.
    pub intensity: f32,
    /// Glow blur radius; zero for ordinary rain glyphs.
    pub blur: f32,
    /// Drawn white-hot this update.
    pub hot: bool,
}

impl TrailCell {
    const EMPTY: TrailCell = TrailCell {
        glyph: ' ',
        intensity: 0.0,
        blur: 0.0,
        hot: false,
    };

    pub fn is_empty(&self) -> bool {
        self.intensity <= 0.0
    }
}

/// Cell grid that keeps a fading trail of everything drawn into it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailSurface {
    columns: usize,
    rows: usize,
    cells: Vec<TrailCell>,
}

impl TrailSurface {
    /// Acquire a blank surface covering the viewport.
    pub fn acquire(viewport: Viewport) -> Result<Self, SurfaceError> {
        if viewport.cell_size == 0 {
            return Err(SurfaceError::ZeroCellSize);
        }
        let columns = viewport.columns();
        let rows = viewport.rows();
        if columns == 0 || rows == 0 {
            return Err(SurfaceError::Degenerate {
                width: viewport.width,
                height: viewport.height,
                cell_size: viewport.cell_size,
            });
        }
        Ok(Self {
            columns,
            rows,
            cells: vec![TrailCell::EMPTY; columns * rows],
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell at `(column, row)`, if on the surface.
    pub fn cell(&self, column: usize, row: i64) -> Option<&TrailCell> {
        self.offset(column, row).map(|i| &self.cells[i])
    }

    /// Paint a translucent black overlay: every cell keeps `1 - alpha` of its
    /// brightness and loses its white-hot state.
    pub fn fade(&mut self, alpha: f32) {
        let keep = 1.0 - alpha.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            if cell.is_empty() {
                continue;
            }
            cell.intensity *= keep;
            cell.blur *= keep;
            cell.hot = false;
            if cell.intensity < VISIBLE_THRESHOLD {
                *cell = TrailCell::EMPTY;
            }
        }
    }

    /// Draw a rain glyph at full brightness. Off-surface positions are ignored.
    pub fn draw_glyph(&mut self, column: usize, row: i64, glyph: char) {
        if let Some(i) = self.offset(column, row) {
            self.cells[i] = TrailCell {
                glyph,
                intensity: 1.0,
                blur: 0.0,
                hot: false,
            };
        }
    }

    /// Draw a locked word character with the given blur radius.
    pub fn draw_locked(&mut self, column: usize, row: i64, glyph: char, blur: f32, hot: bool) {
        if let Some(i) = self.offset(column, row) {
            self.cells[i] = TrailCell {
                glyph,
                intensity: 1.0,
                blur: blur.max(0.0),
                hot,
            };
        }
    }

    fn offset(&self, column: usize, row: i64) -> Option<usize> {
        if column >= self.columns || row < 0 || row as usize >= self.rows {
            return None;
        }
        Some(row as usize * self.columns + column)
    }
}

/// Themed view of a [`TrailSurface`] that renders into a ratatui buffer.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceView<'a> {
    surface: &'a TrailSurface,
    theme: ColorTheme,
}

impl<'a> SurfaceView<'a> {
    pub fn new(surface: &'a TrailSurface, theme: ColorTheme) -> Self {
        Self { surface, theme }
    }

    fn style_for(&self, cell: &TrailCell) -> Style {
        let primary = self.theme.primary_rgb();
        if cell.hot {
            // Halo strength follows the blur radius.
            let halo = (cell.blur / FULL_BLUR).clamp(0.0, 1.0);
            Style::new()
                .fg(Color::Rgb(WHITE.0, WHITE.1, WHITE.2))
                .bg(shade(primary, 0.15 + 0.35 * halo))
                .add_modifier(Modifier::BOLD)
        } else if cell.blur > 0.0 {
            Style::new()
                .fg(mix((0, 0, 0), primary, cell.intensity))
                .add_modifier(Modifier::BOLD)
        } else if cell.intensity > HEAD_THRESHOLD {
            Style::new().fg(self.theme.bright())
        } else {
            Style::new().fg(shade(primary, cell.intensity))
        }
    }
}

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.surface.columns).min(area.width as usize);
        let height = (self.surface.rows).min(area.height as usize);
        for row in 0..height {
            for column in 0..width {
                let cell = &self.surface.cells[row * self.surface.columns + column];
                if cell.is_empty() {
                    continue;
                }
                let position = (area.x + column as u16, area.y + row as u16);
                if let Some(target) = buf.cell_mut(position) {
                    target.set_char(cell.glyph);
                    target.set_style(self.style_for(cell));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_grid() {
        let viewport = Viewport::new(800, 600, 16);
        assert_eq!(viewport.columns(), 50);
        assert_eq!(viewport.rows(), 38);

        let terminal = Viewport::cells(80, 24);
        assert_eq!(terminal.columns(), 80);
        assert_eq!(terminal.rows(), 24);
    }

    #[test]
    fn test_acquire_rejects_degenerate_viewports() {
        assert_eq!(
            TrailSurface::acquire(Viewport::new(800, 600, 0)),
            Err(SurfaceError::ZeroCellSize)
        );
        assert!(matches!(
            TrailSurface::acquire(Viewport::new(10, 600, 16)),
            Err(SurfaceError::Degenerate { width: 10, .. })
        ));
        assert!(TrailSurface::acquire(Viewport::cells(0, 24)).is_err());
        assert!(TrailSurface::acquire(Viewport::cells(80, 0)).is_err());
    }

    #[test]
    fn test_fade_dims_then_clears() {
        let mut surface = TrailSurface::acquire(Viewport::cells(4, 4)).unwrap();
        surface.draw_glyph(1, 2, 'X');
        surface.fade(0.05);
        let cell = surface.cell(1, 2).unwrap();
        assert_eq!(cell.glyph, 'X');
        assert!((cell.intensity - 0.95).abs() < 1e-6);

        for _ in 0..100 {
            surface.fade(0.05);
        }
        assert!(surface.cell(1, 2).unwrap().is_empty());
    }

    #[test]
    fn test_fade_cools_hot_cells() {
        let mut surface = TrailSurface::acquire(Viewport::cells(4, 4)).unwrap();
        surface.draw_locked(0, 0, 'D', 50.0, true);
        surface.fade(0.05);
        let cell = surface.cell(0, 0).unwrap();
        assert!(!cell.hot);
        assert!(cell.blur < 50.0);
    }

    #[test]
    fn test_off_surface_draws_are_ignored() {
        let mut surface = TrailSurface::acquire(Viewport::cells(4, 4)).unwrap();
        let before = surface.clone();
        surface.draw_glyph(0, -3, 'A');
        surface.draw_glyph(9, 0, 'A');
        surface.draw_glyph(0, 4, 'A');
        assert_eq!(surface, before);
        assert!(surface.cell(0, -1).is_none());
    }

    #[test]
    fn test_render_into_buffer() {
        let mut surface = TrailSurface::acquire(Viewport::cells(4, 2)).unwrap();
        surface.draw_glyph(1, 0, 'A');
        surface.draw_locked(2, 1, 'D', 10.0, false);
        surface.draw_locked(3, 1, 'r', 40.0, true);

        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 2));
        SurfaceView::new(&surface, ColorTheme::Neon).render(buf.area, &mut buf);

        assert_eq!(buf[(1, 0)].symbol(), "A");
        assert_eq!(buf[(1, 0)].fg, ColorTheme::Neon.bright());
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(2, 1)].symbol(), "D");
        assert_eq!(buf[(2, 1)].fg, ColorTheme::Neon.primary());
        assert_eq!(buf[(3, 1)].fg, Color::Rgb(0xff, 0xff, 0xff));
        assert!(buf[(3, 1)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_render_clips_to_area() {
        let mut surface = TrailSurface::acquire(Viewport::cells(6, 6)).unwrap();
        surface.draw_glyph(5, 5, 'Z');
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 3));
        SurfaceView::new(&surface, ColorTheme::Green).render(buf.area, &mut buf);
        assert!(buf.content().iter().all(|cell| cell.symbol() == " "));
    }
}
