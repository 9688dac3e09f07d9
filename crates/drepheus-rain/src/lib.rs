//! Matrix rain for the drepheus portal.
//!
//! A [`RainAnimator`] owns a fading [`TrailSurface`] and a [`RainField`] of
//! falling columns. Columns that cross the centred target word may lock in
//! one of its letters; locked letters glow now and then. Once every column
//! has locked or retired, the field resets and the rain starts over.

mod animator;
mod chars;
mod color;
mod entropy;
mod field;
mod surface;
mod word;

pub use animator::RainAnimator;
pub use chars::glyphs;
pub use entropy::Entropy;
pub use field::{RainField, RainSettings, TickReport};
pub use surface::{SurfaceError, SurfaceView, TrailCell, TrailSurface, Viewport};
pub use word::TargetWord;
