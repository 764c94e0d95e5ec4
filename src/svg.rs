use std::io::Write;

use crate::{
    anim::AnimationConfig,
    colors::{gradient_index, keyframe_rules, DEFAULT_FILL},
    delay::{animation_delay, BlockGeometry, GlyphPosition},
    error::Result,
    helpers::{css_color, escape_html, fmt_seconds},
    layout::LayoutConfig,
    text::TextBlock,
};

/// Name of the generated `@keyframes` rule.
pub const KEYFRAMES_NAME: &str = "custom_anim";
/// Class carried by every animated glyph.
pub const GLYPH_CLASS: &str = "anim-char";

/// Streams text blocks into SVG documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renderer {
    pub layout: LayoutConfig,
}

impl Renderer {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Renders `text` into `out`. `force_static` skips the animation even
    /// when `anim` describes one.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        text: &str,
        anim: &AnimationConfig,
        force_static: bool,
    ) -> Result<()> {
        self.render_block(out, &TextBlock::new(text), anim, force_static)
    }

    /// Renders an already split text block into `out` in a single pass.
    pub fn render_block<W: Write>(
        &self,
        out: &mut W,
        block: &TextBlock,
        anim: &AnimationConfig,
        force_static: bool,
    ) -> Result<()> {
        let _span = tracing::debug_span!(
            "render_svg",
            lines = block.height(),
            width = block.width(),
            direction = %anim.direction
        )
        .entered();

        // colors with nothing drawable left would leave glyphs invisible
        let colors: Vec<String> = anim
            .colors
            .iter()
            .map(|c| css_color(c))
            .filter(|c| !c.is_empty())
            .collect();

        let (width, height) = self.layout.canvas_size(block);
        self.start(out, width, height)?;
        if force_static || anim.duration <= 0.0 || colors.is_empty() {
            self.render_static(out, block, &colors)?;
        } else {
            self.render_animated(out, block, anim, &colors)?;
        }
        writeln!(out, "</svg>")?;
        Ok(())
    }

    /// Renders `text` into a `String`.
    pub fn to_svg(&self, text: &str, anim: &AnimationConfig, force_static: bool) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec only fails on allocation failure, which aborts anyway.
        let _ = self.render(&mut buf, text, anim, force_static);
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn start<W: Write>(&self, out: &mut W, width: usize, height: usize) -> Result<()> {
        writeln!(out, "<?xml version=\"1.0\" encoding=\"utf-8\"?>")?;
        writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" role=\"img\">",
            width, height, width, height
        )?;
        writeln!(
            out,
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"none\"/>",
            width, height
        )?;
        Ok(())
    }

    fn render_static<W: Write>(
        &self,
        out: &mut W,
        block: &TextBlock,
        colors: &[String],
    ) -> Result<()> {
        match colors.len() {
            0 => tracing::debug!(fill = DEFAULT_FILL, "static flat fill"),
            1 => tracing::debug!(fill = %colors[0], "static flat fill"),
            n => tracing::debug!(colors = n, "static per-line gradient"),
        }

        for (line, row) in block.lines().enumerate() {
            for (column, &ch) in row.iter().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let fill = match colors.len() {
                    0 => DEFAULT_FILL,
                    _ => colors[gradient_index(column, row.len(), colors.len())].as_str(),
                };
                let (x, y) = self.layout.glyph_origin(line, column);
                writeln!(
                    out,
                    "<text x=\"{}\" y=\"{}\" fill=\"{}\" font-family=\"monospace\" font-size=\"{}px\">{}</text>",
                    x,
                    y,
                    fill,
                    self.layout.font_size,
                    glyph(ch),
                )?;
            }
        }
        Ok(())
    }

    fn render_animated<W: Write>(
        &self,
        out: &mut W,
        block: &TextBlock,
        anim: &AnimationConfig,
        colors: &[String],
    ) -> Result<()> {
        tracing::debug!(
            colors = colors.len(),
            duration = anim.duration,
            timing = %anim.timing,
            "animated cascade"
        );

        let rules = keyframe_rules(colors);
        if !rules.is_empty() {
            writeln!(out, "<defs><style type=\"text/css\">")?;
            writeln!(out, "@keyframes {} {{\n{}\n}}", KEYFRAMES_NAME, rules)?;
            writeln!(
                out,
                ".{} {{ animation: {} {}s {} infinite; }}",
                GLYPH_CLASS, KEYFRAMES_NAME, anim.duration, anim.timing
            )?;
            writeln!(out, "</style></defs>")?;
        }

        let initial_fill = colors.first().map_or(DEFAULT_FILL, String::as_str);
        for (line, row) in block.lines().enumerate() {
            let geometry = BlockGeometry {
                lines: block.height(),
                line_len: row.len(),
                max_line_len: block.width(),
            };
            for (column, &ch) in row.iter().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let delay = animation_delay(
                    anim.direction,
                    anim.duration,
                    GlyphPosition::new(line, column),
                    geometry,
                );
                let (x, y) = self.layout.glyph_origin(line, column);
                writeln!(
                    out,
                    "<text x=\"{}\" y=\"{}\" class=\"{}\" fill=\"{}\" font-family=\"monospace\" font-size=\"{}px\" style=\"animation-delay:{}s\">{}</text>",
                    x,
                    y,
                    GLYPH_CLASS,
                    initial_fill,
                    self.layout.font_size,
                    fmt_seconds(delay),
                    glyph(ch),
                )?;
            }
        }
        Ok(())
    }
}

fn glyph(ch: char) -> String {
    let mut buf = [0u8; 4];
    escape_html(ch.encode_utf8(&mut buf))
}

// SVG
impl TextBlock {
    /// Generates a complete SVG document for this block.
    pub fn to_svg(&self, anim: &AnimationConfig, layout: LayoutConfig) -> String {
        let mut buf = Vec::new();
        let _ = Renderer::new(layout).render_block(&mut buf, self, anim, false);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
