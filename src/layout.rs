use crate::text::TextBlock;

/// Pixel metrics of the glyph grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutConfig {
    /// Horizontal advance of one glyph cell.
    pub glyph_width: usize,
    /// Vertical distance between baselines.
    pub line_height: usize,
    pub font_size: usize,
}

impl LayoutConfig {
    /// Builds metrics with the conventional font size of `round(line_height * 0.85)`.
    pub fn new(glyph_width: usize, line_height: usize) -> Self {
        Self {
            glyph_width,
            line_height,
            font_size: (line_height as f64 * 0.85).round() as usize,
        }
    }

    /// Blank space kept under the last baseline so descenders are not clipped.
    /// Never zero while the font has a size.
    pub fn padding_bottom(&self) -> usize {
        let padding = (self.font_size as f64 * 0.35).round() as usize;
        if padding == 0 && self.font_size > 0 {
            1
        } else {
            padding
        }
    }

    /// Canvas `(width, height)` for a text block; zero-sized for an empty block.
    /// Oversized metrics saturate at `usize::MAX`.
    pub fn canvas_size(&self, block: &TextBlock) -> (usize, usize) {
        if block.is_empty() {
            return (0, 0);
        }
        let width = block.width().saturating_mul(self.glyph_width);
        let height = block
            .height()
            .saturating_mul(self.line_height)
            .saturating_add(self.padding_bottom());
        (width, height)
    }

    /// Baseline position of the glyph at `(line, column)`.
    pub fn glyph_origin(&self, line: usize, column: usize) -> (usize, usize) {
        (
            column.saturating_mul(self.glyph_width),
            self.line_height.saturating_mul(line.saturating_add(1)),
        )
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(10, 20)
    }
}
