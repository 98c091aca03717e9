//! Bitmap Font
//!
//! Fixed 3×5 pixel glyphs for the uppercase ASCII subset used by chart labels.
//! Lookups are case-insensitive; anything outside the table maps to [`BLANK`],
//! which still occupies a full cell so following characters stay aligned.

/// Glyph width in pixels
pub const GLYPH_WIDTH: u32 = 3;

/// Glyph height in pixels
pub const GLYPH_HEIGHT: u32 = 5;

/// Horizontal cursor advance per character (glyph width + 1px spacing)
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// A single 3×5 glyph
///
/// Each row is a 3-bit mask; bit 2 is the leftmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    rows: [u8; GLYPH_HEIGHT as usize],
}

impl Glyph {
    /// Build a glyph from row masks (top row first)
    pub const fn new(rows: [u8; GLYPH_HEIGHT as usize]) -> Self {
        Self { rows }
    }

    /// Whether the cell at (`col`, `row`) is lit
    pub fn is_lit(&self, col: u32, row: u32) -> bool {
        if col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
            return false;
        }
        self.rows[row as usize] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
    }

    /// Lit cells as (col, row) pairs, row-major
    pub fn lit_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..GLYPH_HEIGHT)
            .flat_map(|row| (0..GLYPH_WIDTH).map(move |col| (col, row)))
            .filter(|&(col, row)| self.is_lit(col, row))
    }
}

/// Glyph rendered for unsupported characters
pub const BLANK: Glyph = Glyph::new([0b000, 0b000, 0b000, 0b000, 0b000]);

const A: Glyph = Glyph::new([0b010, 0b101, 0b111, 0b101, 0b101]);
const B: Glyph = Glyph::new([0b110, 0b101, 0b110, 0b101, 0b110]);
const C: Glyph = Glyph::new([0b011, 0b100, 0b100, 0b100, 0b011]);
const D: Glyph = Glyph::new([0b110, 0b101, 0b101, 0b101, 0b110]);
const E: Glyph = Glyph::new([0b111, 0b100, 0b110, 0b100, 0b111]);
const F: Glyph = Glyph::new([0b111, 0b100, 0b110, 0b100, 0b100]);
const G: Glyph = Glyph::new([0b011, 0b100, 0b100, 0b101, 0b011]);
const H: Glyph = Glyph::new([0b101, 0b101, 0b111, 0b101, 0b101]);
const I: Glyph = Glyph::new([0b111, 0b010, 0b010, 0b010, 0b111]);
const K: Glyph = Glyph::new([0b101, 0b110, 0b100, 0b110, 0b101]);
const L: Glyph = Glyph::new([0b100, 0b100, 0b100, 0b100, 0b111]);
const M: Glyph = Glyph::new([0b101, 0b111, 0b111, 0b101, 0b101]);
const N: Glyph = Glyph::new([0b101, 0b111, 0b111, 0b111, 0b101]);
const O: Glyph = Glyph::new([0b111, 0b101, 0b101, 0b101, 0b111]);
const P: Glyph = Glyph::new([0b111, 0b101, 0b111, 0b100, 0b100]);
const R: Glyph = Glyph::new([0b111, 0b101, 0b111, 0b110, 0b101]);
const S: Glyph = Glyph::new([0b011, 0b100, 0b111, 0b001, 0b110]);
const T: Glyph = Glyph::new([0b111, 0b010, 0b010, 0b010, 0b010]);
const U: Glyph = Glyph::new([0b101, 0b101, 0b101, 0b101, 0b111]);
const V: Glyph = Glyph::new([0b101, 0b101, 0b101, 0b101, 0b010]);
const Z: Glyph = Glyph::new([0b111, 0b001, 0b010, 0b100, 0b111]);
const LPAREN: Glyph = Glyph::new([0b010, 0b100, 0b100, 0b100, 0b010]);
const RPAREN: Glyph = Glyph::new([0b100, 0b010, 0b010, 0b010, 0b100]);
const MINUS: Glyph = Glyph::new([0b000, 0b000, 0b111, 0b000, 0b000]);
const EQUALS: Glyph = Glyph::new([0b000, 0b111, 0b000, 0b111, 0b000]);
const COLON: Glyph = Glyph::new([0b000, 0b010, 0b000, 0b010, 0b000]);
const PERIOD: Glyph = Glyph::new([0b000, 0b000, 0b000, 0b000, 0b010]);
const COMMA: Glyph = Glyph::new([0b000, 0b000, 0b000, 0b010, 0b010]);
const DIGIT_0: Glyph = Glyph::new([0b111, 0b101, 0b101, 0b101, 0b111]);
const DIGIT_1: Glyph = Glyph::new([0b010, 0b110, 0b010, 0b010, 0b111]);
const DIGIT_2: Glyph = Glyph::new([0b111, 0b001, 0b111, 0b100, 0b111]);
const DIGIT_3: Glyph = Glyph::new([0b111, 0b001, 0b111, 0b001, 0b111]);
const DIGIT_4: Glyph = Glyph::new([0b101, 0b101, 0b111, 0b001, 0b001]);
const DIGIT_5: Glyph = Glyph::new([0b111, 0b100, 0b111, 0b001, 0b111]);
const DIGIT_6: Glyph = Glyph::new([0b111, 0b100, 0b111, 0b101, 0b111]);
const DIGIT_7: Glyph = Glyph::new([0b111, 0b001, 0b010, 0b010, 0b010]);
const DIGIT_8: Glyph = Glyph::new([0b111, 0b101, 0b111, 0b101, 0b111]);
const DIGIT_9: Glyph = Glyph::new([0b111, 0b101, 0b111, 0b001, 0b111]);

fn lookup(ch: char) -> Option<&'static Glyph> {
    let glyph = match ch {
        'A' => &A,
        'B' => &B,
        'C' => &C,
        'D' => &D,
        'E' => &E,
        'F' => &F,
        'G' => &G,
        'H' => &H,
        'I' => &I,
        'K' => &K,
        'L' => &L,
        'M' => &M,
        'N' => &N,
        'O' => &O,
        'P' => &P,
        'R' => &R,
        'S' => &S,
        'T' => &T,
        'U' => &U,
        'V' => &V,
        'Z' => &Z,
        ' ' => &BLANK,
        '(' => &LPAREN,
        ')' => &RPAREN,
        '-' => &MINUS,
        '=' => &EQUALS,
        ':' => &COLON,
        '.' => &PERIOD,
        ',' => &COMMA,
        '0' => &DIGIT_0,
        '1' => &DIGIT_1,
        '2' => &DIGIT_2,
        '3' => &DIGIT_3,
        '4' => &DIGIT_4,
        '5' => &DIGIT_5,
        '6' => &DIGIT_6,
        '7' => &DIGIT_7,
        '8' => &DIGIT_8,
        '9' => &DIGIT_9,
        _ => return None,
    };
    Some(glyph)
}

/// Glyph for an already upper-cased character, falling back to [`BLANK`]
pub fn glyph(ch: char) -> &'static Glyph {
    lookup(ch).unwrap_or(&BLANK)
}

/// Whether the font has an explicit glyph for `ch` (case-insensitive)
pub fn is_supported(ch: char) -> bool {
    ch.to_uppercase().all(|upper| lookup(upper).is_some())
}

/// Upper-case `text` the way the renderer does before glyph lookup
pub fn normalize(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_uppercase)
}

/// Rendered width of `text` in pixels, including trailing spacing
pub fn text_width(text: &str) -> u32 {
    normalize(text).count() as u32 * GLYPH_ADVANCE
}
