use core::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use ordermap::OrderSet;

use crate::error::{Error, Result};

fn keywords() -> &'static OrderSet<&'static str> {
    static KEYWORDS: OnceLock<OrderSet<&'static str>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        [
            "linear",
            "ease",
            "ease-in",
            "ease-out",
            "ease-in-out",
            "step-start",
            "step-end",
        ]
        .into_iter()
        .collect()
    })
}

fn step_positions() -> &'static OrderSet<&'static str> {
    static POSITIONS: OnceLock<OrderSet<&'static str>> = OnceLock::new();
    POSITIONS.get_or_init(|| {
        ["jump-start", "jump-end", "jump-none", "jump-both", "start", "end"]
            .into_iter()
            .collect()
    })
}

/// A CSS `animation-timing-function` value from a fixed safe subset.
///
/// Only keywords and `steps(N, position)` are accepted, so the value can be
/// written into a stylesheet verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimingFunction {
    value: String,
}

impl TimingFunction {
    /// `steps(n, end)`; `n` of zero is raised to one.
    pub fn steps(n: usize) -> Self {
        Self {
            value: format!("steps({}, end)", n.max(1)),
        }
    }

    /// The timing used when none is given: one step per color.
    pub fn for_colors(colors: usize) -> Self {
        Self::steps(colors)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Accepted keywords, in the order they are documented.
    pub fn keywords() -> impl Iterator<Item = &'static str> {
        keywords().iter().copied()
    }

    /// Accepted `steps()` positions, in the order they are documented.
    pub fn step_positions() -> impl Iterator<Item = &'static str> {
        step_positions().iter().copied()
    }
}

impl Default for TimingFunction {
    fn default() -> Self {
        Self::steps(1)
    }
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for TimingFunction {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        if let Some(kw) = keywords().get(input) {
            return Ok(Self {
                value: (*kw).into(),
            });
        }

        let Some(args) = input
            .strip_prefix("steps(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            tracing::warn!(input = s, "unsupported or potentially unsafe timing function");
            return Err(Error::UnsupportedTimingFunction(s.into()));
        };

        let (count, position) = match args.split_once(',') {
            Some((count, position)) => (count.trim(), Some(position.trim())),
            None => (args.trim(), None),
        };
        let n = match count.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                tracing::warn!(steps = count, input = s, "invalid number of steps in timing function");
                return Err(Error::InvalidStepCount(count.into()));
            }
        };
        let Some(position) = position else {
            tracing::warn!(input = s, "steps() timing function has no step position");
            return Err(Error::MissingStepPosition(s.into()));
        };
        if !step_positions().contains(position) {
            tracing::warn!(position, input = s, "invalid step position in timing function");
            return Err(Error::InvalidStepPosition(position.into()));
        }

        Ok(Self {
            value: format!("steps({}, {})", n, position),
        })
    }
}

impl TryFrom<&str> for TimingFunction {
    type Error = Error;
    fn try_from(value: &str) -> Result<Self> {
        Self::from_str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_accepted_and_trimmed() {
        for kw in TimingFunction::keywords() {
            let t: TimingFunction = format!("  {} ", kw).parse().unwrap();
            assert_eq!(t.as_str(), kw);
        }
    }

    #[test]
    fn keyword_order_is_stable() {
        let kws: Vec<_> = TimingFunction::keywords().collect();
        assert_eq!(kws.first(), Some(&"linear"));
        assert_eq!(kws.last(), Some(&"step-end"));
        assert_eq!(kws.len(), 7);
    }

    #[test]
    fn steps_are_canonicalized() {
        let t: TimingFunction = "steps( 4 ,jump-both )".parse().unwrap();
        assert_eq!(t.to_string(), "steps(4, jump-both)");
        for pos in TimingFunction::step_positions() {
            let t: TimingFunction = format!("steps(2, {})", pos).parse().unwrap();
            assert_eq!(t.as_str(), format!("steps(2, {})", pos));
        }
    }

    #[test]
    fn bad_step_count_rejected() {
        for input in ["steps(0, end)", "steps(-3, end)", "steps(x, end)", "steps(, end)"] {
            assert!(
                matches!(input.parse::<TimingFunction>(), Err(Error::InvalidStepCount(_))),
                "{}",
                input
            );
        }
    }

    #[test]
    fn bad_step_position_rejected() {
        let err = "steps(3, middle)".parse::<TimingFunction>().unwrap_err();
        assert!(matches!(err, Error::InvalidStepPosition(ref p) if p == "middle"));
    }

    #[test]
    fn steps_without_position_rejected() {
        assert!(matches!(
            "steps(3)".parse::<TimingFunction>(),
            Err(Error::MissingStepPosition(_))
        ));
    }

    #[test]
    fn anything_else_rejected() {
        for input in [
            "cubic-bezier(0.1, 0.7, 1.0, 0.1)",
            "linear; } svg { display: none",
            "",
            "steps(3, end",
        ] {
            assert!(
                matches!(
                    input.parse::<TimingFunction>(),
                    Err(Error::UnsupportedTimingFunction(_))
                ),
                "{}",
                input
            );
        }
    }

    #[test]
    fn default_steps_follow_color_count() {
        assert_eq!(TimingFunction::for_colors(3).as_str(), "steps(3, end)");
        assert_eq!(TimingFunction::for_colors(0).as_str(), "steps(1, end)");
        assert_eq!(TimingFunction::default(), TimingFunction::steps(1));
    }
}
