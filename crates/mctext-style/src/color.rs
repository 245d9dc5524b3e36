//! The fixed legacy color palette.

use core::fmt;
use core::str::FromStr;

use crate::StyleError;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn as_key(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    fn distance_sq(self, other: Rgb) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<u32> for Rgb {
    fn from(value: u32) -> Self {
        Self::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

/// One of the 16 named legacy colors, or an explicit reset to the default.
///
/// `Reset` is a color value in its own right: setting it on a node forces the
/// default color even when an ancestor sets one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    DarkBlue = 1,
    DarkGreen = 2,
    DarkAqua = 3,
    DarkRed = 4,
    DarkPurple = 5,
    Gold = 6,
    Gray = 7,
    DarkGray = 8,
    Blue = 9,
    Green = 10,
    Aqua = 11,
    Red = 12,
    LightPurple = 13,
    Yellow = 14,
    White = 15,
    Reset = 16,
}

impl Color {
    /// The 16 named colors in legacy code order (`0`..=`f`).
    pub const NAMED: [Color; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
    ];

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        if value < 16 {
            Some(Self::NAMED[value as usize])
        } else if value == 16 {
            Some(Self::Reset)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_reset(self) -> bool {
        matches!(self, Self::Reset)
    }

    /// Legacy code character: `0`-`9`, `a`-`f` for named colors, `r` for reset.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Reset => 'r',
            other => {
                let idx = other as u8;
                if idx < 10 {
                    (b'0' + idx) as char
                } else {
                    (b'a' + idx - 10) as char
                }
            }
        }
    }

    /// Inverse of [`Color::code`] for the 16 named colors. Case-insensitive.
    ///
    /// `r` is deliberately not mapped here: in a legacy string it resets
    /// decorations too, so it lives in [`crate::FormatCode`].
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            c @ '0'..='9' => Self::from_u8(c as u8 - b'0'),
            c @ 'a'..='f' => Self::from_u8(c as u8 - b'a' + 10),
            _ => None,
        }
    }

    /// Snake-case name, as used in JSON chat components.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "dark_blue",
            Self::DarkGreen => "dark_green",
            Self::DarkAqua => "dark_aqua",
            Self::DarkRed => "dark_red",
            Self::DarkPurple => "dark_purple",
            Self::Gold => "gold",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Aqua => "aqua",
            Self::Red => "red",
            Self::LightPurple => "light_purple",
            Self::Yellow => "yellow",
            Self::White => "white",
            Self::Reset => "reset",
        }
    }

    /// Display value. `Reset` renders as white, the client default.
    #[must_use]
    pub const fn to_rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::new(0, 0, 0),
            Self::DarkBlue => Rgb::new(0, 0, 170),
            Self::DarkGreen => Rgb::new(0, 170, 0),
            Self::DarkAqua => Rgb::new(0, 170, 170),
            Self::DarkRed => Rgb::new(170, 0, 0),
            Self::DarkPurple => Rgb::new(170, 0, 170),
            Self::Gold => Rgb::new(255, 170, 0),
            Self::Gray => Rgb::new(170, 170, 170),
            Self::DarkGray => Rgb::new(85, 85, 85),
            Self::Blue => Rgb::new(85, 85, 255),
            Self::Green => Rgb::new(85, 255, 85),
            Self::Aqua => Rgb::new(85, 255, 255),
            Self::Red => Rgb::new(255, 85, 85),
            Self::LightPurple => Rgb::new(255, 85, 255),
            Self::Yellow => Rgb::new(255, 255, 85),
            Self::White | Self::Reset => Rgb::new(255, 255, 255),
        }
    }

    /// Closest named color by squared euclidean distance.
    ///
    /// Ties resolve to the lower code.
    #[must_use]
    pub fn nearest(rgb: Rgb) -> Self {
        let mut best = Self::Black;
        let mut best_dist = u32::MAX;
        for color in Self::NAMED {
            let dist = color.to_rgb().distance_sq(rgb);
            if dist < best_dist {
                best = color;
                best_dist = dist;
            }
        }
        best
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::NAMED
            .into_iter()
            .chain(core::iter::once(Self::Reset))
            .find(|c| c.name() == lower)
            .ok_or_else(|| StyleError::invalid("color", s))
    }
}
