//! Rain field state and the per-update step.

use drepheus_core::{GlyphSet, RainSpeed};

use crate::{
    entropy::Entropy,
    surface::{TrailSurface, Viewport},
    word::TargetWord,
};

/// Head row every column starts from, at mount and after a reset.
const START_ROW: i64 = 1;

/// Tunables for the rain.
#[derive(Debug, Clone, PartialEq)]
pub struct RainSettings {
    /// Word the rain locks in.
    pub word: String,
    pub speed: RainSpeed,
    pub glyphs: GlyphSet,
    /// Opacity of the black overlay painted each update.
    pub fade_alpha: f32,
    /// Probability that a column crossing its word cell locks it.
    pub lock_chance: f32,
    /// Per-update probability that a locked character starts glowing.
    pub glow_chance: f32,
    /// Glow lost per update.
    pub glow_decay: f32,
    /// Blur radius of a locked character at rest.
    pub glow_base: f32,
    /// Extra blur radius at full glow.
    pub glow_span: f32,
    /// Upper bound (exclusive) of the gap, in rows, before a column restarts.
    pub max_restart_gap: u32,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            word: "Drepheus".to_string(),
            speed: RainSpeed::Normal,
            glyphs: GlyphSet::Classic,
            fade_alpha: 0.05,
            lock_chance: 0.5,
            glow_chance: 0.02,
            glow_decay: 0.03,
            glow_base: 10.0,
            glow_span: 40.0,
            max_restart_gap: 30,
        }
    }
}

/// What one update did, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The field was reset before stepping.
    pub reset: bool,
    /// Word characters locked this update.
    pub locked: usize,
    /// Columns retired after the word was complete.
    pub retired: usize,
    /// Glow pulses started this update.
    pub pulses: usize,
}

/// Per-column head rows plus the target word.
#[derive(Debug, Clone, PartialEq)]
pub struct RainField {
    viewport: Viewport,
    /// Head row per column; `None` once the column has locked or retired.
    columns: Vec<Option<i64>>,
    word: TargetWord,
    /// Locks plus retirements this round.
    filled: usize,
    resets: u64,
}

impl RainField {
    /// Fresh field for the viewport, every column armed at the top.
    pub fn new(viewport: Viewport, word: &str) -> Self {
        Self {
            columns: vec![Some(START_ROW); viewport.columns()],
            word: TargetWord::place(word, viewport),
            viewport,
            filled: 0,
            resets: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Head row of `column`, `None` if inactive or out of range.
    pub fn head(&self, column: usize) -> Option<i64> {
        self.columns.get(column).copied().flatten()
    }

    pub fn active_columns(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }

    pub fn word(&self) -> &TargetWord {
        &self.word
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Number of full-field resets so far.
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Every column inactive; the next update resets the field.
    pub fn is_complete(&self) -> bool {
        self.filled == self.columns.len()
    }

    /// Rearm every column and clear every lock and glow.
    pub fn reset(&mut self) {
        self.columns.fill(Some(START_ROW));
        self.word.clear();
        self.filled = 0;
        self.resets += 1;
    }

    /// Advance the field by one update, drawing into `surface`.
    pub fn tick<E: Entropy + ?Sized>(
        &mut self,
        surface: &mut TrailSurface,
        settings: &RainSettings,
        glyphs: &[char],
        entropy: &mut E,
    ) -> TickReport {
        let mut report = TickReport::default();

        if self.is_complete() {
            self.reset();
            report.reset = true;
        }

        surface.fade(settings.fade_alpha);

        let cell = i64::from(self.viewport.cell_size);
        let height = i64::from(self.viewport.height);
        let word_row = self.word.row();
        let target = self.word.visible_len();

        for column in 0..self.columns.len() {
            let Some(row) = self.columns[column] else {
                continue;
            };

            if row == word_row
                && let Some(i) = self.word.char_at_column(column)
                && entropy.chance(settings.lock_chance)
            {
                self.columns[column] = None;
                if self.word.lock(i) {
                    report.locked += 1;
                }
                self.filled += 1;
                continue;
            }

            if !glyphs.is_empty() {
                surface.draw_glyph(column, row, glyphs[entropy.index(glyphs.len())]);
            }

            let next = if (row + 1) * cell < height {
                Some(row + 1)
            } else if self.filled >= target {
                // Word is done; let the column run out.
                self.filled += 1;
                report.retired += 1;
                None
            } else {
                Some(-i64::from(entropy.restart_gap(settings.max_restart_gap)))
            };
            self.columns[column] = next;
        }

        for i in 0..self.word.len() {
            if !self.word.is_locked(i) {
                continue;
            }
            if entropy.chance(settings.glow_chance) {
                self.word.pulse(i);
                report.pulses += 1;
            }
            self.word.decay(i, settings.glow_decay);

            let glow = self.word.glow(i);
            let blur = settings.glow_base + glow * settings.glow_span;
            if let (Some(column), Some(ch)) = (self.word.column_of(i), self.word.char(i)) {
                surface.draw_locked(column, word_row, ch, blur, glow > 0.0);
            }
        }

        report
    }
}
