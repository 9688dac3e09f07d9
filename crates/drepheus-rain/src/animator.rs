//! The rain animator: surface lifecycle, frame throttling and the enter
//! callback.

use std::fmt;

use drepheus_core::{ColorTheme, RainSpeed};
use ratatui::{Frame, buffer::Buffer, layout::Rect, widgets::Widget};

use crate::{
    chars::glyphs,
    entropy::Entropy,
    field::{RainField, RainSettings, TickReport},
    surface::{SurfaceView, TrailSurface, Viewport},
};

/// Surface and field live and die together.
#[derive(Debug, Clone)]
struct Scene {
    surface: TrailSurface,
    field: RainField,
}

/// Owns the rain for one landing screen.
///
/// The host calls [`RainAnimator::frame`] once per displayed frame; the field
/// only steps every `speed.frames_per_update()` frames.
pub struct RainAnimator<E> {
    settings: RainSettings,
    theme: ColorTheme,
    entropy: E,
    frames: u64,
    viewport: Viewport,
    /// `None` while the viewport cannot hold a surface.
    scene: Option<Scene>,
    on_enter: Option<Box<dyn FnOnce()>>,
}

impl<E: Entropy> RainAnimator<E> {
    /// Create an animator for the viewport.
    pub fn new(viewport: Viewport, settings: RainSettings, theme: ColorTheme, entropy: E) -> Self {
        let scene = Self::mount(viewport, &settings);
        Self {
            settings,
            theme,
            entropy,
            frames: 0,
            viewport,
            scene,
            on_enter: None,
        }
    }

    fn mount(viewport: Viewport, settings: &RainSettings) -> Option<Scene> {
        match TrailSurface::acquire(viewport) {
            Ok(surface) => {
                let field = RainField::new(viewport, &settings.word);
                tracing::debug!(
                    columns = field.column_count(),
                    word_row = field.word().row(),
                    word_column = field.word().first_column(),
                    "rain mounted"
                );
                Some(Scene { surface, field })
            }
            Err(err) => {
                tracing::debug!(%err, "no drawing surface, rain disabled");
                None
            }
        }
    }

    /// One display-refresh callback. Returns the update report when the
    /// field stepped on this frame.
    pub fn frame(&mut self) -> Option<TickReport> {
        self.frames = self.frames.wrapping_add(1);
        if self.frames % self.settings.speed.frames_per_update() != 0 {
            return None;
        }

        let scene = self.scene.as_mut()?;
        let report = scene.field.tick(
            &mut scene.surface,
            &self.settings,
            glyphs(self.settings.glyphs),
            &mut self.entropy,
        );
        if report.reset {
            tracing::debug!(resets = scene.field.resets(), "rain field reset");
        }
        Some(report)
    }

    /// Rebuild for a new viewport. Prior column, lock and trail state is
    /// discarded.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "rain resized"
        );
        self.viewport = viewport;
        self.scene = Self::mount(viewport, &self.settings);
    }

    /// Resize only if `area` differs from the current viewport.
    pub fn fit(&mut self, area: Rect) {
        let viewport = Viewport::cells(area.width, area.height);
        if viewport != self.viewport {
            self.resize(viewport);
        }
    }

    /// Render into the frame, covering its whole area.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.fit(area);
        frame.render_widget(&*self, area);
    }
}

impl<E> RainAnimator<E> {
    /// Register the callback fired when the user asks to enter.
    pub fn on_enter(&mut self, callback: impl FnOnce() + 'static) {
        self.on_enter = Some(Box::new(callback));
    }

    /// Fire the enter callback. Later calls do nothing.
    pub fn enter(&mut self) -> bool {
        match self.on_enter.take() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn theme(&self) -> ColorTheme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ColorTheme) {
        self.theme = theme;
    }

    pub fn speed(&self) -> RainSpeed {
        self.settings.speed
    }

    pub fn set_speed(&mut self, speed: RainSpeed) {
        self.settings.speed = speed;
    }

    pub fn settings(&self) -> &RainSettings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frame callbacks received so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> Option<&RainField> {
        self.scene.as_ref().map(|scene| &scene.field)
    }

    pub fn surface(&self) -> Option<&TrailSurface> {
        self.scene.as_ref().map(|scene| &scene.surface)
    }
}

impl<E> fmt::Debug for RainAnimator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RainAnimator")
            .field("settings", &self.settings)
            .field("theme", &self.theme)
            .field("frames", &self.frames)
            .field("viewport", &self.viewport)
            .field("mounted", &self.scene.is_some())
            .field("armed", &self.on_enter.is_some())
            .finish_non_exhaustive()
    }
}

impl<E> Widget for &RainAnimator<E> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(scene) = &self.scene {
            SurfaceView::new(&scene.surface, self.theme).render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn animator(viewport: Viewport) -> RainAnimator<StdRng> {
        RainAnimator::new(
            viewport,
            RainSettings::default(),
            ColorTheme::Neon,
            StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn test_only_every_fourth_frame_updates() {
        let mut rain = animator(Viewport::new(800, 600, 16));
        let field = rain.field().cloned();
        let surface = rain.surface().cloned();

        for _ in 0..3 {
            assert!(rain.frame().is_none());
            assert_eq!(rain.field().cloned(), field);
            assert_eq!(rain.surface().cloned(), surface);
        }
        assert!(rain.frame().is_some());
        assert_ne!(rain.field().cloned(), field);
        assert_eq!(rain.frames(), 4);

        for frame in 5..=40u64 {
            let before = rain.field().cloned();
            let stepped = rain.frame().is_some();
            assert_eq!(stepped, frame % 4 == 0);
            if !stepped {
                assert_eq!(rain.field().cloned(), before);
            }
        }
    }

    #[test]
    fn test_speed_changes_throttle() {
        let mut rain = animator(Viewport::cells(80, 24));
        rain.set_speed(RainSpeed::Fast);
        assert!(rain.frame().is_none());
        assert!(rain.frame().is_some());
    }

    #[test]
    fn test_resize_recomputes_layout() {
        let mut rain = animator(Viewport::new(800, 600, 16));
        for _ in 0..200 {
            rain.frame();
        }
        rain.resize(Viewport::new(400, 300, 16));

        let field = rain.field().unwrap();
        assert_eq!(field.column_count(), 25);
        assert_eq!(field.word().first_column(), 8);
        assert_eq!(field.word().row(), 9);
        assert_eq!(field.filled(), 0);
        assert_eq!(field.word().locked_count(), 0);
        assert!((0..25).all(|c| field.head(c) == Some(1)));
        assert!(
            rain.surface()
                .unwrap()
                .cell(0, 0)
                .is_some_and(|cell| cell.is_empty())
        );
    }

    #[test]
    fn test_degenerate_viewport_renders_nothing() {
        let mut rain = animator(Viewport::cells(0, 0));
        assert!(rain.field().is_none());
        for _ in 0..8 {
            assert!(rain.frame().is_none());
        }

        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));
        Widget::render(&rain, buf.area, &mut buf);
        assert!(buf.content().iter().all(|cell| cell.symbol() == " "));

        rain.resize(Viewport::cells(80, 24));
        assert!(rain.field().is_some());
    }

    #[test]
    fn test_fit_ignores_unchanged_area() {
        let mut rain = animator(Viewport::cells(80, 24));
        for _ in 0..4 {
            rain.frame();
        }
        let stepped = rain.field().cloned();
        rain.fit(Rect::new(0, 0, 80, 24));
        assert_eq!(rain.field().cloned(), stepped);
        rain.fit(Rect::new(0, 0, 40, 12));
        assert_eq!(rain.field().unwrap().column_count(), 40);
    }

    #[test]
    fn test_enter_fires_once() {
        let mut rain = animator(Viewport::cells(80, 24));
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        rain.on_enter(move || seen.set(seen.get() + 1));

        assert!(rain.enter());
        assert!(!rain.enter());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_enter_without_callback() {
        let mut rain = animator(Viewport::cells(80, 24));
        assert!(!rain.enter());
    }
}
