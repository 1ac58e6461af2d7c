//! Pure descriptors for sub-elements created at mount time.
//!
//! Splitting a heading into letters and scattering background particles
//! both produce plain data; the renderer turns each descriptor into a node
//! and registers it on the stage afterwards.

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    /// Whitespace keeps its slot in the line but is never animated.
    pub animated: bool,
}

pub fn split_letters(text: &str) -> Vec<Glyph> {
    text.chars()
        .map(|ch| Glyph {
            ch,
            animated: !ch.is_whitespace(),
        })
        .collect()
}

/// How a decorative field is scattered and how its pieces drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scatter {
    /// Chance that a piece is drawn large.
    pub large_share: f64,
    pub drift_y: f64,
    /// Sideways drift is drawn from `-drift_x..=drift_x`.
    pub drift_x: f64,
    pub period: (f64, f64),
    pub delay_step: f64,
    pub shapes: &'static [char],
}

impl Scatter {
    /// Background dots: one in five is large, each rises with a little
    /// sideways wander and starts a fifth of a second after the previous.
    pub const DOTS: Self = Self {
        large_share: 0.2,
        drift_y: -100.0,
        drift_x: 50.0,
        period: (15.0, 25.0),
        delay_step: 0.2,
        shapes: &[],
    };

    /// Slow glyphs layered over the dots.
    pub const SHAPES: Self = Self {
        large_share: 0.0,
        drift_y: -80.0,
        drift_x: 30.0,
        period: (20.0, 35.0),
        delay_step: 0.8,
        shapes: &['●', '◆'],
    };

    /// The few specks floating behind the hero heading.
    pub const HERO: Self = Self {
        large_share: 0.0,
        drift_y: -50.0,
        drift_x: 50.0,
        period: (12.0, 20.0),
        delay_step: 1.0,
        shapes: &[],
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Horizontal position, percent of the container width.
    pub left: f64,
    /// Vertical position, percent of the container height.
    pub top: f64,
    pub large: bool,
    pub drift_x: f64,
    pub drift_y: f64,
    pub period: f64,
    pub delay: f64,
    pub shape: Option<char>,
}

pub fn scatter(count: usize, field: Scatter, rng: &mut impl Rng) -> Vec<Particle> {
    let (shortest, longest) = field.period;
    (0..count)
        .map(|index| Particle {
            left: rng.gen_range(0.0..100.0),
            top: rng.gen_range(0.0..100.0),
            large: field.large_share > 0.0 && rng.gen_bool(field.large_share.min(1.0)),
            drift_x: rng.gen_range(-field.drift_x..=field.drift_x),
            drift_y: field.drift_y,
            period: rng.gen_range(shortest..=longest),
            delay: index as f64 * field.delay_step,
            shape: if field.shapes.is_empty() {
                None
            } else {
                Some(field.shapes[rng.gen_range(0..field.shapes.len())])
            },
        })
        .collect()
}
