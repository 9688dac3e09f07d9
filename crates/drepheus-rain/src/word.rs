//! The target word that the rain gradually locks in.

use crate::surface::Viewport;

/// Word centred on the viewport, with per-character lock and glow state.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetWord {
    chars: Vec<char>,
    /// Column of the first character. Negative when the word is wider than
    /// the viewport.
    x0: i64,
    /// Row the word sits on.
    row: i64,
    /// Number of characters that fall inside the column range.
    visible: usize,
    locked: Vec<bool>,
    glow: Vec<f32>,
}

impl TargetWord {
    /// Place `text` horizontally and vertically centred in the viewport.
    pub fn place(text: &str, viewport: Viewport) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len() as i64;
        let cell = i64::from(viewport.cell_size.max(1));
        let width = i64::from(viewport.width);
        let height = i64::from(viewport.height);

        let x0 = (width - len * cell).div_euclid(2 * cell);
        let row = height.div_euclid(2 * cell);
        let columns = viewport.columns() as i64;
        let visible = (0..len).filter(|i| (0..columns).contains(&(x0 + i))).count();

        Self {
            locked: vec![false; chars.len()],
            glow: vec![0.0; chars.len()],
            chars,
            x0,
            row,
            visible,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn row(&self) -> i64 {
        self.row
    }

    /// Column of the first character.
    pub fn first_column(&self) -> i64 {
        self.x0
    }

    /// Characters that land on a real column.
    pub fn visible_len(&self) -> usize {
        self.visible
    }

    /// Index of the word character sitting in `column`, if any.
    pub fn char_at_column(&self, column: usize) -> Option<usize> {
        let i = column as i64 - self.x0;
        (0..self.chars.len() as i64)
            .contains(&i)
            .then_some(i as usize)
    }

    /// Column holding character `i`, if it lands on the surface.
    pub fn column_of(&self, i: usize) -> Option<usize> {
        let column = self.x0 + i as i64;
        (column >= 0 && i < self.chars.len()).then_some(column as usize)
    }

    pub fn char(&self, i: usize) -> Option<char> {
        self.chars.get(i).copied()
    }

    pub fn is_locked(&self, i: usize) -> bool {
        self.locked.get(i).copied().unwrap_or(false)
    }

    pub fn locked_count(&self) -> usize {
        self.locked.iter().filter(|&&l| l).count()
    }

    /// Glow intensity of character `i`, `0.0..=1.0`.
    pub fn glow(&self, i: usize) -> f32 {
        self.glow.get(i).copied().unwrap_or(0.0)
    }

    /// Lock character `i`. Returns `false` if it was already locked.
    pub(crate) fn lock(&mut self, i: usize) -> bool {
        match self.locked.get_mut(i) {
            Some(locked) if !*locked => {
                *locked = true;
                true
            }
            _ => false,
        }
    }

    /// Start a glow pulse on character `i`.
    pub(crate) fn pulse(&mut self, i: usize) {
        if let Some(glow) = self.glow.get_mut(i) {
            *glow = 1.0;
        }
    }

    /// Decay the glow of character `i` by `step`, stopping at zero.
    pub(crate) fn decay(&mut self, i: usize, step: f32) {
        if let Some(glow) = self.glow.get_mut(i)
            && *glow > 0.0
        {
            *glow = (*glow - step).clamp(0.0, 1.0);
        }
    }

    /// Clear every lock and glow.
    pub(crate) fn clear(&mut self) {
        self.locked.fill(false);
        self.glow.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_centres_word() {
        let word = TargetWord::place("Drepheus", Viewport::new(800, 600, 16));
        assert_eq!(word.len(), 8);
        assert_eq!(word.first_column(), 21);
        assert_eq!(word.row(), 18);
        assert_eq!(word.visible_len(), 8);
        assert_eq!(word.char_at_column(21), Some(0));
        assert_eq!(word.char_at_column(28), Some(7));
        assert_eq!(word.char_at_column(20), None);
        assert_eq!(word.char_at_column(29), None);
    }

    #[test]
    fn test_place_in_terminal_cells() {
        let word = TargetWord::place("Drepheus", Viewport::cells(80, 24));
        assert_eq!(word.first_column(), 36);
        assert_eq!(word.row(), 12);
    }

    #[test]
    fn test_word_wider_than_viewport() {
        let word = TargetWord::place("Drepheus", Viewport::cells(5, 3));
        // (5 - 8) / 2 rounds down to -2
        assert_eq!(word.first_column(), -2);
        assert_eq!(word.visible_len(), 5);
        assert_eq!(word.char_at_column(0), Some(2));
        assert_eq!(word.column_of(0), None);
        assert_eq!(word.column_of(2), Some(0));
    }

    #[test]
    fn test_lock_is_idempotent() {
        let mut word = TargetWord::place("abc", Viewport::cells(10, 10));
        assert!(word.lock(1));
        assert!(!word.lock(1));
        assert!(!word.lock(9));
        assert_eq!(word.locked_count(), 1);
        word.clear();
        assert_eq!(word.locked_count(), 0);
    }

    #[test]
    fn test_glow_pulse_and_decay() {
        let mut word = TargetWord::place("abc", Viewport::cells(10, 10));
        word.pulse(0);
        assert_eq!(word.glow(0), 1.0);
        word.decay(0, 0.3);
        assert!((word.glow(0) - 0.7).abs() < 1e-6);
        for _ in 0..10 {
            word.decay(0, 0.3);
        }
        assert_eq!(word.glow(0), 0.0);
        word.decay(1, 0.3);
        assert_eq!(word.glow(1), 0.0);
    }
}
