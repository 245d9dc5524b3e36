//! Legacy marker-code strings.
//!
//! The legacy format is flat text in which a marker character (`§` by
//! default) followed by a code character switches the running style: `0`-`9`
//! and `a`-`f` select a color and clear every decoration, `k`-`o` switch a
//! decoration on, and `r` resets everything. Codes are matched
//! case-insensitively.
//!
//! The format cannot express nesting, events, selectors, or scores, so
//! encoding is a lossy projection. Decoding never fails: a marker that is not
//! followed by a recognized code (including a trailing marker) is kept as
//! literal text.

use std::sync::OnceLock;

use mctext_style::{Cascade, FormatCode, Style};
use tracing::{debug, instrument, trace, warn};

use crate::config::{ENV_LEGACY_CHAR, parse_legacy_char};
use crate::error::{Error, Result};
use crate::message::{Content, Message, TextContent};

/// Marker used when nothing else is configured.
pub const DEFAULT_LEGACY_CHAR: char = '§';

static DEFAULT_MARKER: OnceLock<char> = OnceLock::new();

fn marker_from_env<F>(get_env: F) -> char
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = get_env(ENV_LEGACY_CHAR) else {
        return DEFAULT_LEGACY_CHAR;
    };
    match parse_legacy_char(&value) {
        Ok(marker) => marker,
        Err(err) => {
            warn!(%err, "ignoring legacy character from environment");
            DEFAULT_LEGACY_CHAR
        }
    }
}

/// Process-wide default marker.
///
/// Fixed on first use: either the value passed to
/// [`init_default_legacy_char`], `MCTEXT_LEGACY_CHAR`, or `§`.
pub fn default_legacy_char() -> char {
    *DEFAULT_MARKER.get_or_init(|| marker_from_env(|key| std::env::var(key).ok()))
}

/// Set the process-wide default marker. Call once at startup, before any
/// reader.
///
/// Setting the value it already has is accepted.
pub fn init_default_legacy_char(marker: char) -> Result<()> {
    let current = *DEFAULT_MARKER.get_or_init(|| marker);
    if current == marker {
        debug!(?marker, "default legacy character initialized");
        Ok(())
    } else {
        Err(Error::DefaultMarkerAlreadySet { current })
    }
}

/// One flat, styled span produced by decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRun {
    pub text: String,
    pub style: Style,
}

impl LegacyRun {
    #[must_use]
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// A childless Text node with this run's text and style.
    #[must_use]
    pub fn to_message(&self) -> Message {
        Message::from_parts(
            Content::Text(TextContent {
                content: self.text.clone(),
            }),
            self.style,
            Vec::new(),
            None,
            None,
            None,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    /// A recognized code and the character it was written with.
    Code(FormatCode, char),
}

/// Splits a legacy string into maximal text spans and codes.
struct Tokens<'a> {
    src: &'a str,
    pos: usize,
    marker: char,
}

impl<'a> Tokens<'a> {
    fn new(src: &'a str, marker: char) -> Self {
        Self { src, pos: 0, marker }
    }

    fn code_at(&self, rest: &str) -> Option<(FormatCode, char)> {
        let mut chars = rest.chars();
        if chars.next()? != self.marker {
            return None;
        }
        let c = chars.next()?;
        FormatCode::from_char(c).map(|code| (code, c))
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.src[self.pos..];
        if rest.is_empty() {
            return None;
        }
        if let Some((code, c)) = self.code_at(rest) {
            self.pos += self.marker.len_utf8() + c.len_utf8();
            return Some(Token::Code(code, c));
        }
        let end = rest
            .char_indices()
            .skip(1)
            .find(|&(i, ch)| ch == self.marker && self.code_at(&rest[i..]).is_some())
            .map_or(rest.len(), |(i, _)| i);
        self.pos += end;
        Some(Token::Text(&rest[..end]))
    }
}

/// Legacy string for `root`, using `marker`.
///
/// Walks the tree's runs with the legacy cascade and emits only the codes
/// needed to move from the previously emitted style to each run's style.
/// Events, hierarchy, and zero-length runs leave no trace.
///
/// The format has no escape. Text that already contains `marker` followed by
/// a code character is emitted as is, and [`decode`] reads it back as a
/// format code, so only marker-free text round-trips.
#[instrument(skip(root), level = "trace")]
pub fn encode(root: &Message, marker: char) -> String {
    let mut out = String::new();
    let mut current = Style::new();
    for run in root.flatten_with(Cascade::Legacy) {
        if run.text.is_empty() {
            continue;
        }
        for code in Style::transition_codes(&current, &run.style) {
            out.push(marker);
            out.push(code.as_char());
        }
        out.push_str(run.text);
        current = run.style;
    }
    trace!(len = out.len(), "encoded");
    out
}

/// Flat runs for a legacy string. Always returns at least one run.
///
/// Identical adjacent styles are not coalesced, and a code immediately
/// followed by another code produces no run of its own.
#[instrument(level = "trace")]
pub fn decode(input: &str, marker: char) -> Vec<LegacyRun> {
    let mut runs = Vec::new();
    let mut style = Style::new();
    let mut pending = String::new();
    for token in Tokens::new(input, marker) {
        match token {
            Token::Text(text) => pending.push_str(text),
            Token::Code(code, _) => {
                if !pending.is_empty() {
                    runs.push(LegacyRun::new(std::mem::take(&mut pending), style));
                }
                style.apply_code(code);
            }
        }
    }
    if !pending.is_empty() || runs.is_empty() {
        runs.push(LegacyRun::new(pending, style));
    }
    trace!(runs = runs.len(), "decoded");
    runs
}

/// `input` with every recognized code removed.
#[must_use]
pub fn strip_codes(input: &str, marker: char) -> String {
    Tokens::new(input, marker)
        .filter_map(|token| match token {
            Token::Text(text) => Some(text),
            Token::Code(..) => None,
        })
        .collect()
}

/// `input` with the marker of every recognized code rewritten from `from` to
/// `to`. Code characters and all other text are untouched.
#[must_use]
pub fn replace_codes(input: &str, from: char, to: char) -> String {
    let mut out = String::with_capacity(input.len());
    for token in Tokens::new(input, from) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Code(_, c) => {
                out.push(to);
                out.push(c);
            }
        }
    }
    out
}

/// Codec bound to one marker character.
///
/// # Example
/// ```
/// use mctext::{Color, LegacyCodec, Style};
///
/// let codec = LegacyCodec::new('&');
/// let runs = codec.decode("&cred &lbold");
/// assert_eq!(runs[0].style, Style::new().color(Color::Red));
/// assert_eq!(runs[1].style, Style::new().color(Color::Red).bold());
/// assert_eq!(codec.strip_codes("&cred &lbold"), "red bold");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyCodec {
    marker: char,
}

impl Default for LegacyCodec {
    /// Codec for the process-wide default marker.
    fn default() -> Self {
        Self::new(default_legacy_char())
    }
}

impl LegacyCodec {
    #[must_use]
    pub const fn new(marker: char) -> Self {
        Self { marker }
    }

    #[must_use]
    pub const fn marker(&self) -> char {
        self.marker
    }

    #[must_use]
    pub fn encode(&self, root: &Message) -> String {
        encode(root, self.marker)
    }

    #[must_use]
    pub fn decode(&self, input: &str) -> Vec<LegacyRun> {
        decode(input, self.marker)
    }

    /// Decoded runs as the children of an empty, unstyled Text root.
    #[must_use]
    pub fn from_legacy(&self, input: &str) -> Message {
        let children = self.decode(input).iter().map(LegacyRun::to_message).collect();
        Message::from_parts(
            Content::Text(TextContent {
                content: String::new(),
            }),
            Style::new(),
            children,
            None,
            None,
            None,
        )
    }

    #[must_use]
    pub fn strip_codes(&self, input: &str) -> String {
        strip_codes(input, self.marker)
    }

    /// Rewrite codes written with `from` to use this codec's marker.
    #[must_use]
    pub fn replace_codes(&self, input: &str, from: char) -> String {
        replace_codes(input, from, self.marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MessageBuilder;
    use crate::message::ClickAction;
    use mctext_style::{Color, Decoration};
    use pretty_assertions::assert_eq;

    const M: char = '§';

    fn styled(text: &str, style: Style) -> Message {
        MessageBuilder::text(text).style(style).unwrap().build().unwrap()
    }

    #[test]
    fn marker_inside_text_is_not_escaped() {
        let msg = Message::of("50§c off");
        let encoded = encode(&msg, M);
        assert_eq!(encoded, "50§c off");
        assert_eq!(strip_codes(&encoded, M), "50 off");
        let runs = decode(&encoded, M);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].style, Style::new().color(Color::Red));
        assert_eq!(runs[1].text, " off");
        // A different marker leaves the text alone.
        assert_eq!(strip_codes(&encode(&msg, '&'), '&'), "50§c off");
    }

    #[test]
    fn tokens_split_text_and_codes() {
        let tokens: Vec<_> = Tokens::new("a§cb§§lc§", M).collect();
        assert_eq!(
            tokens,
            [
                Token::Text("a"),
                Token::Code(FormatCode::Color(Color::Red), 'c'),
                Token::Text("b§"),
                Token::Code(FormatCode::Decoration(Decoration::Bold), 'l'),
                Token::Text("c§"),
            ]
        );
    }

    #[test]
    fn decode_plain_is_single_default_run() {
        assert_eq!(decode("hello world", M), [LegacyRun::new("hello world", Style::new())]);
        assert_eq!(decode("", M), [LegacyRun::new("", Style::new())]);
    }

    #[test]
    fn decode_color_then_decoration() {
        let runs = decode("§4Hi §lthere", M);
        assert_eq!(
            runs,
            [
                LegacyRun::new("Hi ", Style::new().color(Color::DarkRed)),
                LegacyRun::new("there", Style::new().color(Color::DarkRed).bold()),
            ]
        );
    }

    #[test]
    fn decode_color_clears_decorations() {
        let runs = decode("§l§obold§aplain", M);
        assert_eq!(runs[0].style, Style::new().bold().italic());
        assert_eq!(runs[1].style, Style::new().color(Color::Green));
    }

    #[test]
    fn decode_reset_and_uppercase() {
        let runs = decode("§Cred§Rback", M);
        assert_eq!(runs[0].style, Style::new().color(Color::Red));
        assert_eq!(runs[1].style, Style::RESET);
    }

    #[test]
    fn decode_unknown_and_trailing_marker_are_literal() {
        assert_eq!(decode("50§z off§", M), [LegacyRun::new("50§z off§", Style::new())]);
    }

    #[test]
    fn decode_does_not_coalesce_identical_styles() {
        let runs = decode("§ca§cb", M);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].style, runs[1].style);
    }

    #[test]
    fn decode_trailing_code_without_text() {
        assert_eq!(decode("§c", M), [LegacyRun::new("", Style::new().color(Color::Red))]);
        assert_eq!(decode("x§c", M), [LegacyRun::new("x", Style::new())]);
    }

    #[test]
    fn encode_minimal_codes() {
        let root = MessageBuilder::text("a")
            .style(Style::new().color(Color::Red))
            .unwrap()
            .append_all([
                styled("b", Style::new().bold()),
                styled("c", Style::new().color(Color::Red)),
            ])
            .unwrap()
            .build()
            .unwrap();
        // Dropping b's bold for c takes a color code.
        assert_eq!(encode(&root, M), "§ca§lb§cc");
    }

    #[test]
    fn encode_color_child_drops_parent_decorations() {
        let root = MessageBuilder::text("A")
            .style(Style::new().color(Color::Red).bold())
            .unwrap()
            .append(styled("B", Style::new().color(Color::Green)))
            .unwrap()
            .build()
            .unwrap();
        let encoded = encode(&root, M);
        assert_eq!(encoded, "§c§lA§aB");
        let runs = decode(&encoded, M);
        assert_eq!(runs[1].style.bold, None);
    }

    #[test]
    fn encode_forced_off_decoration_uses_color_code() {
        let root = MessageBuilder::text("x")
            .style(Style::new().bold())
            .unwrap()
            .append(styled("y", Style::new().not_bold()))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(encode(&root, M), "§lx§ry");
    }

    #[test]
    fn encode_skips_empty_runs_and_events() {
        let root = MessageBuilder::empty()
            .style(Style::new().color(Color::Gold))
            .unwrap()
            .append(Message::of("only"))
            .unwrap()
            .on_click(ClickAction::RunCommand("/spawn".into()))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(encode(&root, M), "§6only");
    }

    #[test]
    fn encode_selector_renders_pattern() {
        let root = MessageBuilder::selector("@p").build().unwrap();
        assert_eq!(encode(&root, M), "@p");
    }

    #[test]
    fn strip_codes_keeps_literals() {
        assert_eq!(strip_codes("§aGreen §lBold§r §zodd§", M), "Green Bold §zodd§");
    }

    #[test]
    fn replace_codes_rewrites_markers_only() {
        assert_eq!(replace_codes("&aHi &zthere & &L!", '&', M), "§aHi &zthere & §L!");
        assert_eq!(replace_codes("trailing&", '&', M), "trailing&");
        assert_eq!(replace_codes("§aok", M, M), "§aok");
    }

    #[test]
    fn multibyte_marker() {
        let codec = LegacyCodec::new('¶');
        let runs = codec.decode("¶eé¶ø");
        assert_eq!(runs, [LegacyRun::new("é¶ø", Style::new().color(Color::Yellow))]);
    }

    #[test]
    fn from_legacy_builds_flat_children() {
        let msg = LegacyCodec::new('&').from_legacy("&9blue&r plain");
        assert_eq!(msg.as_text(), Some(""));
        assert!(msg.style().is_empty());
        assert_eq!(msg.children().len(), 2);
        assert_eq!(*msg.children()[0].style(), Style::new().color(Color::Blue));
        assert_eq!(msg.to_plain(), "blue plain");
    }

    #[test]
    fn marker_from_env_falls_back() {
        assert_eq!(marker_from_env(|_| None), DEFAULT_LEGACY_CHAR);
        assert_eq!(marker_from_env(|_| Some("&".into())), '&');
        assert_eq!(marker_from_env(|_| Some(String::new())), DEFAULT_LEGACY_CHAR);
    }

    #[test]
    fn codec_replace_targets_own_marker() {
        let codec = LegacyCodec::new(M);
        assert_eq!(codec.replace_codes("&6gold", '&'), "§6gold");
        assert_eq!(codec.marker(), M);
    }
}
