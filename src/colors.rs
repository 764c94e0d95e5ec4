use std::fmt::Write;

use crate::helpers::{css_color, in_range};

/// Fill used for every glyph when no colors are given.
pub const DEFAULT_FILL: &str = "black";

/// Keyframe offsets (in percent) for a cycle through `count` colors.
///
/// Offsets are spread evenly over `0..=100` and the last one is pinned to
/// exactly 100. A single color gets the two stops `0` and `100`.
pub fn keyframe_offsets(count: usize) -> Vec<usize> {
    match count {
        0 => vec![],
        1 => vec![0, 100],
        _ => {
            let step = 100.0 / (count - 1) as f64;
            let mut offsets: Vec<usize> = (0..count)
                .map(|i| (i as f64 * step).round() as usize)
                .collect();
            offsets[count - 1] = 100;
            offsets
        }
    }
}

/// Builds the body of a `@keyframes` rule cycling the fill through `colors`.
///
/// Returns an empty string for an empty list; the caller has to drop the
/// whole animation block in that case.
pub fn keyframe_rules<S: AsRef<str>>(colors: &[S]) -> String {
    let offsets = keyframe_offsets(colors.len());
    let mut rules = String::new();
    for (n, offset) in offsets.iter().enumerate() {
        let color = &colors[n.min(colors.len() - 1)];
        if n > 0 {
            rules.push('\n');
        }
        // Writing into a String can not fail.
        let _ = write!(rules, "{}% {{ fill: {}; }}", offset, css_color(color.as_ref()));
    }
    rules
}

/// Picks the static gradient color for glyph `column` of a line with `line_len` glyphs.
///
/// The line is stretched over the whole color list on its own, so short and
/// long lines both start at the first color and end at the last one.
pub fn gradient_index(column: usize, line_len: usize, colors: usize) -> usize {
    if colors == 0 {
        return 0;
    }
    let index = if line_len > 1 {
        (column as f64 * (colors - 1) as f64 / (line_len - 1) as f64).round() as usize
    } else {
        0
    };
    in_range(index, 0, colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_colors_no_rules() {
        assert_eq!(keyframe_rules::<&str>(&[]), "");
        assert!(keyframe_offsets(0).is_empty());
    }

    #[test]
    fn single_color_has_two_stops() {
        assert_eq!(
            keyframe_rules(&["red"]),
            "0% { fill: red; }\n100% { fill: red; }"
        );
    }

    #[test]
    fn three_colors_evenly_spaced() {
        assert_eq!(
            keyframe_rules(&["red", "#00ff00", "blue"]),
            "0% { fill: red; }\n50% { fill: #00ff00; }\n100% { fill: blue; }"
        );
    }

    #[test]
    fn offsets_round_and_end_at_100() {
        assert_eq!(keyframe_offsets(4), vec![0, 33, 67, 100]);
        assert_eq!(keyframe_offsets(7), vec![0, 17, 33, 50, 67, 83, 100]);
        for n in 2..64 {
            let offsets = keyframe_offsets(n);
            assert_eq!(offsets.len(), n);
            assert_eq!(offsets[0], 0);
            assert_eq!(offsets[n - 1], 100);
            assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn percent_in_color_appears_once() {
        assert_eq!(
            keyframe_rules(&["rgb(100%, 0%, 0%)"]),
            "0% { fill: rgb(100%, 0%, 0%); }\n100% { fill: rgb(100%, 0%, 0%); }"
        );
    }

    #[test]
    fn gradient_spans_each_line() {
        // 5 glyphs over 3 colors: 0, 0.5, 1, 1.5, 2
        let picks: Vec<usize> = (0..5).map(|c| gradient_index(c, 5, 3)).collect();
        assert_eq!(picks, vec![0, 1, 1, 2, 2]);
        // a two-glyph line still reaches the last color
        assert_eq!(gradient_index(1, 2, 3), 2);
    }

    #[test]
    fn single_glyph_takes_first_color() {
        assert_eq!(gradient_index(0, 1, 2), 0);
    }

    #[test]
    fn gradient_index_is_clamped() {
        assert_eq!(gradient_index(9, 3, 2), 1);
        assert_eq!(gradient_index(0, 3, 0), 0);
    }
}
