use crate::{
    delay::CascadeDirection,
    error::{Error, Result},
    helpers::css_color,
    timing::TimingFunction,
};

/// How glyph colors are animated.
///
/// A zero duration or an empty color list renders the text statically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationConfig {
    /// Color cycle in keyframe order.
    pub colors: Vec<String>,
    pub timing: TimingFunction,
    /// Length of one cycle in seconds.
    pub duration: f64,
    pub direction: CascadeDirection,
}

impl AnimationConfig {
    /// Creates an animation with the default timing of one step per color.
    /// Colors with nothing drawable left after sanitizing are dropped.
    /// Fails on a negative or non-finite duration.
    pub fn new(colors: Vec<String>, duration: f64, direction: CascadeDirection) -> Result<Self> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(Error::InvalidDuration(duration));
        }
        let colors = drawable(colors);
        Ok(Self {
            timing: TimingFunction::for_colors(colors.len()),
            colors,
            duration,
            direction,
        })
    }

    /// A non-animated configuration: flat fill for zero or one color,
    /// per-line gradient for more.
    pub fn still(colors: Vec<String>) -> Self {
        let colors = drawable(colors);
        Self {
            timing: TimingFunction::for_colors(colors.len()),
            colors,
            ..Self::default()
        }
    }

    /// Replaces the default one-step-per-color timing.
    pub fn with_timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Splits a comma separated color list, dropping entries with nothing drawable.
    /// Commas inside parentheses belong to the color (`rgb(1, 2, 3)`).
    pub fn parse_colors(list: &str) -> Vec<String> {
        let mut colors = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;
        for (i, ch) in list.char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    colors.push(&list[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
        colors.push(&list[start..]);
        colors
            .into_iter()
            .map(str::trim)
            .filter(|c| !css_color(c).is_empty())
            .map(String::from)
            .collect()
    }

    /// Whether this configuration can only be drawn statically.
    pub fn is_static(&self) -> bool {
        self.duration <= 0.0 || self.colors.is_empty()
    }
}

fn drawable(colors: Vec<String>) -> Vec<String> {
    colors
        .into_iter()
        .filter(|c| !css_color(c).is_empty())
        .collect()
}
