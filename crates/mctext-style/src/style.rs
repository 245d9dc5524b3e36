//! Style type with tri-state decorations and cascading semantics.

use smallvec::SmallVec;
use tracing::{instrument, trace};

use crate::{Color, Decoration, FormatCode, StyleError};

/// How a child style combines with its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cascade {
    /// Field-wise: child `Some` values win, `None` inherits.
    #[default]
    Inherit,
    /// Legacy client semantics: a child that sets a color starts from a clean
    /// slate and only keeps its own decorations.
    Legacy,
}

/// Codes emitted for one style transition. Worst case is a color plus all
/// five decorations.
pub type CodeSeq = SmallVec<[FormatCode; 6]>;

/// Text style with optional color and five tri-state decorations.
///
/// `None` inherits from the nearest styled ancestor; `Some(false)` forces a
/// decoration off regardless of what the ancestors set.
///
/// # Example
/// ```
/// use mctext_style::{Color, Style};
///
/// let parent = Style::new().color(Color::Red).bold();
/// let child = Style::new().not_bold().italic();
/// let merged = child.merge(&parent);
///
/// assert_eq!(merged.color, Some(Color::Red));
/// assert_eq!(merged.bold, Some(false));
/// assert_eq!(merged.italic, Some(true));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub color: Option<Color>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub bold: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub italic: Option<bool>,
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "underlined", skip_serializing_if = "Option::is_none")
    )]
    pub underline: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub strikethrough: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub obfuscated: Option<bool>,
}

impl Style {
    /// State after a legacy `r` code: default color, every decoration forced off.
    pub const RESET: Style = Style {
        color: Some(Color::Reset),
        bold: Some(false),
        italic: Some(false),
        underline: Some(false),
        strikethrough: Some(false),
        obfuscated: Some(false),
    };

    /// Create an empty style (all properties inherit).
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            color: None,
            bold: None,
            italic: None,
            underline: None,
            strikethrough: None,
            obfuscated: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[inline]
    #[must_use]
    pub fn bold(self) -> Self {
        self.decoration(Decoration::Bold, true)
    }

    #[inline]
    #[must_use]
    pub fn not_bold(self) -> Self {
        self.decoration(Decoration::Bold, false)
    }

    #[inline]
    #[must_use]
    pub fn italic(self) -> Self {
        self.decoration(Decoration::Italic, true)
    }

    #[inline]
    #[must_use]
    pub fn not_italic(self) -> Self {
        self.decoration(Decoration::Italic, false)
    }

    #[inline]
    #[must_use]
    pub fn underline(self) -> Self {
        self.decoration(Decoration::Underline, true)
    }

    #[inline]
    #[must_use]
    pub fn not_underline(self) -> Self {
        self.decoration(Decoration::Underline, false)
    }

    #[inline]
    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.decoration(Decoration::Strikethrough, true)
    }

    #[inline]
    #[must_use]
    pub fn not_strikethrough(self) -> Self {
        self.decoration(Decoration::Strikethrough, false)
    }

    #[inline]
    #[must_use]
    pub fn obfuscated(self) -> Self {
        self.decoration(Decoration::Obfuscated, true)
    }

    #[inline]
    #[must_use]
    pub fn not_obfuscated(self) -> Self {
        self.decoration(Decoration::Obfuscated, false)
    }

    /// Set a decoration explicitly on or off.
    #[inline]
    #[must_use]
    pub fn decoration(mut self, decoration: Decoration, on: bool) -> Self {
        *self.slot_mut(decoration) = Some(on);
        self
    }

    /// The tri-state value of a decoration.
    #[inline]
    #[must_use]
    pub const fn get(&self, decoration: Decoration) -> Option<bool> {
        match decoration {
            Decoration::Obfuscated => self.obfuscated,
            Decoration::Bold => self.bold,
            Decoration::Strikethrough => self.strikethrough,
            Decoration::Underline => self.underline,
            Decoration::Italic => self.italic,
        }
    }

    /// Whether a decoration renders; unset counts as off.
    #[inline]
    #[must_use]
    pub const fn is_active(&self, decoration: Decoration) -> bool {
        matches!(self.get(decoration), Some(true))
    }

    fn slot_mut(&mut self, decoration: Decoration) -> &mut Option<bool> {
        match decoration {
            Decoration::Obfuscated => &mut self.obfuscated,
            Decoration::Bold => &mut self.bold,
            Decoration::Strikethrough => &mut self.strikethrough,
            Decoration::Underline => &mut self.underline,
            Decoration::Italic => &mut self.italic,
        }
    }

    /// Set one field from its string form.
    ///
    /// `field` is `"color"` or a decoration name; decoration values are
    /// `"true"`/`"false"`. Anything else fails with
    /// [`StyleError::InvalidStyleValue`].
    pub fn try_with(self, field: &str, value: &str) -> Result<Self, StyleError> {
        if field.trim().eq_ignore_ascii_case("color") {
            return Ok(self.color(value.parse()?));
        }
        let decoration: Decoration = field.parse()?;
        let on = match value.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => return Err(StyleError::invalid(decoration.name(), value)),
        };
        Ok(self.decoration(decoration, on))
    }

    /// Cascade merge: fill in `None` fields from `parent`.
    ///
    /// `child.merge(&parent)` keeps every `Some` of the child, including
    /// explicit `false`, and takes the rest from the parent.
    #[instrument(skip(self, parent), level = "trace")]
    pub fn merge(&self, parent: &Style) -> Style {
        trace!("Merging child style into parent");
        Style {
            color: self.color.or(parent.color),
            bold: self.bold.or(parent.bold),
            italic: self.italic.or(parent.italic),
            underline: self.underline.or(parent.underline),
            strikethrough: self.strikethrough.or(parent.strikethrough),
            obfuscated: self.obfuscated.or(parent.obfuscated),
        }
    }

    /// Patch merge: `parent.patch(&child)` is `child.merge(&parent)`.
    #[inline]
    pub fn patch(&self, child: &Style) -> Style {
        child.merge(self)
    }

    /// Merge under the given cascade mode.
    pub fn cascade(&self, parent: &Style, mode: Cascade) -> Style {
        match mode {
            Cascade::Inherit => self.merge(parent),
            Cascade::Legacy if self.color.is_some() => *self,
            Cascade::Legacy => self.merge(parent),
        }
    }

    /// Check if this style has any properties set.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.strikethrough.is_none()
            && self.obfuscated.is_none()
    }

    /// Apply one legacy code to a running decoder state.
    pub fn apply_code(&mut self, code: FormatCode) {
        match code {
            FormatCode::Color(color) => *self = Style::new().color(color),
            FormatCode::Decoration(decoration) => *self.slot_mut(decoration) = Some(true),
            FormatCode::Reset => *self = Style::RESET,
        }
    }

    /// Minimal codes that move emitted state `current` to `target`.
    ///
    /// Legacy codes can only switch decorations on. Turning one off, or
    /// changing color, needs a color (or reset) code, which clears every
    /// decoration; the decorations `target` still wants are then re-emitted.
    /// Unset and `Reset` colors both mean "default".
    pub fn transition_codes(current: &Style, target: &Style) -> CodeSeq {
        let current_color = current.color.filter(|c| !c.is_reset());
        let target_color = target.color.filter(|c| !c.is_reset());
        let drops_decoration = Decoration::ALL
            .iter()
            .any(|&d| current.is_active(d) && !target.is_active(d));

        let mut codes = CodeSeq::new();
        if current_color != target_color || drops_decoration {
            codes.push(target_color.map_or(FormatCode::Reset, FormatCode::Color));
            codes.extend(
                Decoration::ALL
                    .into_iter()
                    .filter(|&d| target.is_active(d))
                    .map(FormatCode::Decoration),
            );
        } else {
            codes.extend(
                Decoration::ALL
                    .into_iter()
                    .filter(|&d| target.is_active(d) && !current.is_active(d))
                    .map(FormatCode::Decoration),
            );
        }
        codes
    }
}
