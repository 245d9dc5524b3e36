//! Legacy marker-code table.
//!
//! A legacy string carries formatting as two-character sequences: a marker
//! character followed by one code character. The table is fixed:
//!
//! | Code | Meaning |
//! |------|---------|
//! | `0`-`9`, `a`-`f` | named color (also clears every decoration) |
//! | `k` | obfuscated |
//! | `l` | bold |
//! | `m` | strikethrough |
//! | `n` | underline |
//! | `o` | italic |
//! | `r` | reset color and decorations |
//!
//! Recognition is case-insensitive; emission is always lowercase.

use core::fmt;
use core::str::FromStr;

use crate::{Color, StyleError};

/// A boolean text decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Decoration {
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
}

impl Decoration {
    /// All decorations, in legacy code order (`k`..=`o`).
    pub const ALL: [Decoration; 5] = [
        Self::Obfuscated,
        Self::Bold,
        Self::Strikethrough,
        Self::Underline,
        Self::Italic,
    ];

    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Obfuscated => 'k',
            Self::Bold => 'l',
            Self::Strikethrough => 'm',
            Self::Underline => 'n',
            Self::Italic => 'o',
        }
    }

    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'k' => Some(Self::Obfuscated),
            'l' => Some(Self::Bold),
            'm' => Some(Self::Strikethrough),
            'n' => Some(Self::Underline),
            'o' => Some(Self::Italic),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Obfuscated => "obfuscated",
            Self::Bold => "bold",
            Self::Strikethrough => "strikethrough",
            Self::Underline => "underline",
            Self::Italic => "italic",
        }
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Decoration {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "obfuscated" => Ok(Self::Obfuscated),
            "bold" => Ok(Self::Bold),
            "strikethrough" => Ok(Self::Strikethrough),
            // JSON components spell it "underlined".
            "underline" | "underlined" => Ok(Self::Underline),
            "italic" => Ok(Self::Italic),
            _ => Err(StyleError::invalid("decoration", s)),
        }
    }
}

/// One entry of the marker-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCode {
    /// A named color. Never holds [`Color::Reset`]; that is [`FormatCode::Reset`].
    Color(Color),
    Decoration(Decoration),
    Reset,
}

impl FormatCode {
    /// Code for switching to `color`; `Color::Reset` maps to [`FormatCode::Reset`].
    #[must_use]
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::Reset => Self::Reset,
            other => Self::Color(other),
        }
    }

    /// Look up a code character. Returns `None` for characters outside the table.
    #[must_use]
    pub const fn from_char(code: char) -> Option<Self> {
        if let Some(color) = Color::from_code(code) {
            return Some(Self::Color(color));
        }
        if let Some(decoration) = Decoration::from_code(code) {
            return Some(Self::Decoration(decoration));
        }
        match code {
            'r' | 'R' => Some(Self::Reset),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_code(code: char) -> bool {
        Self::from_char(code).is_some()
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Color(color) => color.code(),
            Self::Decoration(decoration) => decoration.code(),
            Self::Reset => 'r',
        }
    }

    /// Whether applying this code discards active decorations.
    #[must_use]
    pub const fn clears_decorations(self) -> bool {
        matches!(self, Self::Color(_) | Self::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_table_round_trips() {
        for ch in "0123456789abcdefklmnor".chars() {
            let code = FormatCode::from_char(ch).expect("recognized code");
            assert_eq!(code.as_char(), ch);
        }
    }

    #[test]
    fn uppercase_recognized_lowercase_emitted() {
        assert_eq!(FormatCode::from_char('L'), Some(FormatCode::Decoration(Decoration::Bold)));
        assert_eq!(FormatCode::from_char('A'), Some(FormatCode::Color(Color::Green)));
        assert_eq!(FormatCode::from_char('R'), Some(FormatCode::Reset));
        assert_eq!(FormatCode::from_char('A').map(FormatCode::as_char), Some('a'));
    }

    #[test]
    fn unknown_codes() {
        for ch in ['g', 'z', 'p', ' ', '§', '&', 'x'] {
            assert!(!FormatCode::is_code(ch), "{ch:?} should not be a code");
        }
    }

    #[test]
    fn reset_color_maps_to_reset_code() {
        assert_eq!(FormatCode::for_color(Color::Reset), FormatCode::Reset);
        assert_eq!(FormatCode::for_color(Color::Gold), FormatCode::Color(Color::Gold));
    }

    #[test]
    fn clears_decorations() {
        assert!(FormatCode::Color(Color::Red).clears_decorations());
        assert!(FormatCode::Reset.clears_decorations());
        assert!(!FormatCode::Decoration(Decoration::Italic).clears_decorations());
    }

    #[test]
    fn decoration_names() {
        assert_eq!("underlined".parse::<Decoration>(), Ok(Decoration::Underline));
        assert_eq!("BOLD".parse::<Decoration>(), Ok(Decoration::Bold));
        assert!("blink".parse::<Decoration>().is_err());
        for decoration in Decoration::ALL {
            assert_eq!(decoration.name().parse::<Decoration>(), Ok(decoration));
        }
    }
}
