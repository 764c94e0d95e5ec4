use core::fmt;
use std::str::FromStr;

/// Weight of the main cascade axis.
const SPREAD: f64 = 0.5;
/// Weight of the horizontal stagger added inside each line by `ttb`/`btt`.
const WITHIN_LINE: f64 = 0.1;
/// Weight of `center-out` and `edges-in`.
const CENTER_EDGE: f64 = 0.3;

/// How glyph start times are staggered across the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CascadeDirection {
    /// Left to right.
    Ltr,
    /// Right to left.
    #[default]
    Rtl,
    /// Top to bottom, with a small left-to-right stagger inside each line.
    Ttb,
    /// Bottom to top, with a small left-to-right stagger inside each line.
    Btt,
    /// Diagonal from the top-left corner.
    DiagTlbr,
    /// Diagonal from the top-right corner.
    DiagTrbl,
    /// Diagonal from the bottom-left corner.
    DiagBltr,
    /// Diagonal from the bottom-right corner.
    DiagBrtl,
    /// Columns further from the center start later.
    CenterOut,
    /// Columns closer to the center start later.
    EdgesIn,
    /// Top to bottom, whole lines at once.
    TtbLineSync,
    /// Bottom to top, whole lines at once.
    BttLineSync,
    /// Every glyph shares the same phase.
    FullSync,
    /// Fallback for unknown names: a backwards sweep over each line on its own.
    Reverse,
}

impl CascadeDirection {
    /// Every mode, the `Reverse` fallback last.
    pub const ALL: [CascadeDirection; 14] = [
        Self::Ltr,
        Self::Rtl,
        Self::Ttb,
        Self::Btt,
        Self::DiagTlbr,
        Self::DiagTrbl,
        Self::DiagBltr,
        Self::DiagBrtl,
        Self::CenterOut,
        Self::EdgesIn,
        Self::TtbLineSync,
        Self::BttLineSync,
        Self::FullSync,
        Self::Reverse,
    ];

    /// Kebab-case name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
            Self::Ttb => "ttb",
            Self::Btt => "btt",
            Self::DiagTlbr => "diag-tlbr",
            Self::DiagTrbl => "diag-trbl",
            Self::DiagBltr => "diag-bltr",
            Self::DiagBrtl => "diag-brtl",
            Self::CenterOut => "center-out",
            Self::EdgesIn => "edges-in",
            Self::TtbLineSync => "ttb-linesync",
            Self::BttLineSync => "btt-linesync",
            Self::FullSync => "full-sync",
            Self::Reverse => "reverse",
        }
    }

    /// Maps a mode name to its variant; anything unrecognized is `Reverse`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == name.trim())
            .unwrap_or(Self::Reverse)
    }
}

impl fmt::Display for CascadeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Never fails: unknown names select the `Reverse` fallback.
impl FromStr for CascadeDirection {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Position of one glyph in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlyphPosition {
    pub line: usize,
    /// Codepoint index inside the line.
    pub column: usize,
}

impl GlyphPosition {
    /// Position of glyph `column` on line `line`, both zero-based.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Shape of the block a glyph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockGeometry {
    pub lines: usize,
    /// Glyph count of the glyph's own line.
    pub line_len: usize,
    /// Glyph count of the longest line in the block.
    pub max_line_len: usize,
}

/// Animation delay in seconds for the glyph at `pos`.
///
/// Every named mode normalizes columns over the longest line of the block,
/// so columns line up across lines. `Reverse` alone normalizes over the
/// glyph's own line and yields negative delays. A non-positive duration
/// always gives 0.
pub fn animation_delay(
    direction: CascadeDirection,
    duration: f64,
    pos: GlyphPosition,
    geometry: BlockGeometry,
) -> f64 {
    if duration <= 0.0 || duration.is_nan() {
        return 0.0;
    }

    let line = pos.line as f64;
    let column = pos.column as f64;
    let last_line = geometry.lines.saturating_sub(1) as f64;
    let max_idx = geometry.max_line_len.saturating_sub(1) as f64;
    let rev_line = (geometry.lines as f64 - 1.0 - line).max(0.0);

    let norm_lines = if last_line <= 0.0 { 1.0 } else { last_line };
    let norm_idx = if max_idx <= 0.0 { 1.0 } else { max_idx };
    let norm_diag = if last_line + max_idx <= 0.0 {
        1.0
    } else {
        last_line + max_idx
    };
    let center = max_idx / 2.0;

    let spread = duration * SPREAD;
    let delay = match direction {
        CascadeDirection::Ltr => spread * (column / norm_idx),
        CascadeDirection::Rtl => spread * ((max_idx - column) / norm_idx),
        CascadeDirection::Ttb => {
            spread * (line / norm_lines) + duration * WITHIN_LINE * (column / norm_idx)
        }
        CascadeDirection::Btt => {
            spread * (rev_line / norm_lines) + duration * WITHIN_LINE * (column / norm_idx)
        }
        CascadeDirection::DiagTlbr => spread * ((line + column) / norm_diag),
        CascadeDirection::DiagTrbl => spread * ((line + (max_idx - column)) / norm_diag),
        CascadeDirection::DiagBltr => spread * ((rev_line + column) / norm_diag),
        CascadeDirection::DiagBrtl => spread * ((rev_line + (max_idx - column)) / norm_diag),
        CascadeDirection::CenterOut if max_idx > 0.0 => {
            duration * CENTER_EDGE * ((column - center).abs() / center)
        }
        CascadeDirection::EdgesIn if max_idx > 0.0 => {
            duration * CENTER_EDGE * ((center - (column - center).abs()) / center)
        }
        CascadeDirection::CenterOut | CascadeDirection::EdgesIn => 0.0,
        CascadeDirection::TtbLineSync => spread * (line / norm_lines),
        CascadeDirection::BttLineSync => spread * (rev_line / norm_lines),
        CascadeDirection::FullSync => 0.0,
        CascadeDirection::Reverse if geometry.line_len > 1 => {
            -0.5 * duration * (column / (geometry.line_len - 1) as f64)
        }
        CascadeDirection::Reverse => 0.0,
    };
    // -0.0 from the reverse sweep at column 0
    delay + 0.0
}
