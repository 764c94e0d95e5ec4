pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            c => out.push(c),
        }
    }
    out
}

/// Keeps only characters that can appear in a CSS color value
/// (`#rrggbb`, names, `rgb(10%, 20%, 30%)`, `hsl(120 50% 50% / .5)`).
/// Anything else could close the attribute or the style rule it lands in.
pub(crate) fn css_color(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, '#' | '-' | '_' | '(' | ')' | ',' | '.' | '%' | ' ' | '/')
        })
        .collect()
}

/// Clamps `v` into `start..end`; an empty range yields `start`.
pub(crate) fn in_range(v: usize, start: usize, end: usize) -> usize {
    if v < start || end <= start {
        start
    } else if v >= end {
        end - 1
    } else {
        v
    }
}

/// Formats a delay in seconds with millisecond precision.
/// Negative zero and values that round to zero print as `0.000`.
pub(crate) fn fmt_seconds(s: f64) -> String {
    let out = format!("{:.3}", s);
    if out == "-0.000" {
        "0.000".into()
    } else {
        out
    }
}
