use core::fmt;

/// A block of monospace text split into rows of glyphs.
///
/// Every row is right-trimmed and indexed by Unicode scalar value, so a
/// multi-byte character occupies exactly one grid cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TextBlock {
    pub(crate) rows: Vec<Vec<char>>,
    pub(crate) width: usize,
}

impl TextBlock {
    /// Splits `text` on `\n`, sanitizes every line and trims trailing whitespace.
    /// An empty string gives a block with zero lines.
    pub fn new(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let rows: Vec<Vec<char>> = text.split('\n').map(sanitize_line).collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Number of lines.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Glyph count of the longest line.
    pub fn width(&self) -> usize {
        self.width
    }

    /// True when the block has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Glyph count of one line; 0 for lines out of range.
    pub fn line_len(&self, line: usize) -> usize {
        self.rows.get(line).map_or(0, Vec::len)
    }

    /// Glyphs of one line, if it exists.
    pub fn line(&self, line: usize) -> Option<&[char]> {
        self.rows.get(line).map(Vec::as_slice)
    }

    /// Iterates over the lines from top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &[char]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl From<&str> for TextBlock {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Formats the block back as newline-separated text.
impl fmt::Display for TextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, row) in self.rows.iter().enumerate() {
            if n > 0 {
                writeln!(f)?;
            }
            for ch in row {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

fn sanitize_line(line: &str) -> Vec<char> {
    let mut row: Vec<char> = line.chars().filter_map(check_char).collect();
    while row.last().is_some_and(|c| c.is_whitespace()) {
        row.pop();
    }
    row
}

/// Checks whether a character can occupy a grid cell.
/// Returns `Some(ch)` if allowed (with whitespace separators normalized to space),
/// or `None` if the character has no cell of its own.
pub fn check_char(ch: char) -> Option<char> {
    let cp = ch as u32;

    if ch == ' ' || ch == '\t' {
        return Some(' ');
    }
    // Mongolian Vowel Separator U+180E (explicit)
    if cp == 0x180E {
        return Some(' ');
    }
    // Unicode "Space Separator" (Zs) set:
    // U+00A0, U+1680, U+2000..U+200A, U+202F, U+205F, U+3000
    if cp == 0x00A0
        || cp == 0x1680
        || (0x2000..=0x200A).contains(&cp)
        || cp == 0x202F
        || cp == 0x205F
        || cp == 0x3000
    {
        return Some(' ');
    }

    // C0 controls, DEL and C1 controls; none of them survive in XML text
    if cp <= 0x001F || (0x007F..=0x009F).contains(&cp) {
        return None;
    }
    // Zero-width / joiner: U+200B..U+200F, U+FEFF, U+FE00..U+FE0F
    if (0x200B..=0x200F).contains(&cp) || cp == 0xFEFF || (0xFE00..=0xFE0F).contains(&cp) {
        return None;
    }
    // Noncharacters U+FFFE and U+FFFF are not XML `Char`s
    if cp == 0xFFFE || cp == 0xFFFF {
        return None;
    }
    // Bidirectional control codes: U+202A..U+202E, U+2066..U+2069
    if (0x202A..=0x202E).contains(&cp) || (0x2066..=0x2069).contains(&cp) {
        return None;
    }

    Some(ch)
}
