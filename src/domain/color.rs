// Display colors and fill derivation
use std::fmt;
use std::str::FromStr;

/// Alpha applied to a stroke color to get its translucent fill (~20%).
pub const FILL_ALPHA: u8 = 0x33;

/// How the color was written, so it can be rendered back the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Hex,
    Functional,
    Named,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    notation: Notation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised color '{}'", self.0)
    }
}

impl std::error::Error for ParseColorError {}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("silver", [0xc0, 0xc0, 0xc0]),
    ("gray", [0x80, 0x80, 0x80]),
    ("grey", [0x80, 0x80, 0x80]),
    ("white", [0xff, 0xff, 0xff]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("red", [0xff, 0x00, 0x00]),
    ("purple", [0x80, 0x00, 0x80]),
    ("fuchsia", [0xff, 0x00, 0xff]),
    ("magenta", [0xff, 0x00, 0xff]),
    ("green", [0x00, 0x80, 0x00]),
    ("lime", [0x00, 0xff, 0x00]),
    ("olive", [0x80, 0x80, 0x00]),
    ("yellow", [0xff, 0xff, 0x00]),
    ("navy", [0x00, 0x00, 0x80]),
    ("blue", [0x00, 0x00, 0xff]),
    ("teal", [0x00, 0x80, 0x80]),
    ("aqua", [0x00, 0xff, 0xff]),
    ("cyan", [0x00, 0xff, 0xff]),
    ("orange", [0xff, 0xa5, 0x00]),
    ("pink", [0xff, 0xc0, 0xcb]),
    ("brown", [0xa5, 0x2a, 0x2a]),
    ("gold", [0xff, 0xd7, 0x00]),
    ("indigo", [0x4b, 0x00, 0x82]),
    ("violet", [0xee, 0x82, 0xee]),
    ("crimson", [0xdc, 0x14, 0x3c]),
    ("coral", [0xff, 0x7f, 0x50]),
    ("tomato", [0xff, 0x63, 0x47]),
    ("turquoise", [0x40, 0xe0, 0xd0]),
];

impl Color {
    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// The translucent fill for this stroke color.
    pub fn fill(self) -> Self {
        self.with_alpha(FILL_ALPHA)
    }

    /// Render as a CSS color string in the notation it was parsed from.
    /// Named colors render as hex since CSS has no named form with alpha.
    pub fn to_css(&self) -> String {
        match self.notation {
            Notation::Hex | Notation::Named => {
                if self.a == 0xff {
                    format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
                } else {
                    format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
                }
            }
            Notation::Functional => {
                if self.a == 0xff {
                    format!("rgb({}, {}, {})", self.r, self.g, self.b)
                } else {
                    let alpha = (self.a as f64 / 255.0 * 100.0).round() / 100.0;
                    format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
                }
            }
        }
    }

    fn parse_hex(digits: &str) -> Option<Self> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

        let (r, g, b, a) = match digits.len() {
            3 => (nibble(0)?, nibble(1)?, nibble(2)?, 0xff),
            4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
            6 => (byte(0)?, byte(2)?, byte(4)?, 0xff),
            8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
            _ => return None,
        };
        Some(Self { r, g, b, a, notation: Notation::Hex })
    }

    fn parse_functional(lower: &str) -> Option<Self> {
        let inner = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))?
            .strip_suffix(')')?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let channel = |s: &str| s.parse::<u8>().ok();

        let (r, g, b) = match parts.as_slice() {
            [r, g, b] | [r, g, b, _] => (channel(*r)?, channel(*g)?, channel(*b)?),
            _ => return None,
        };
        let a = match parts.get(3) {
            Some(raw) => {
                let alpha = raw.parse::<f64>().ok()?;
                if !(0.0..=1.0).contains(&alpha) {
                    return None;
                }
                (alpha * 255.0).round() as u8
            }
            None => 0xff,
        };
        Some(Self { r, g, b, a, notation: Notation::Functional })
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        let parsed = if let Some(digits) = lower.strip_prefix('#') {
            Self::parse_hex(digits)
        } else if lower.starts_with("rgb") {
            Self::parse_functional(&lower)
        } else {
            NAMED_COLORS
                .iter()
                .find(|(name, _)| *name == lower)
                .map(|(_, [r, g, b])| Self {
                    r: *r,
                    g: *g,
                    b: *b,
                    a: 0xff,
                    notation: Notation::Named,
                })
        };

        parsed.ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
