//! Translation template placeholders.
//!
//! A template is literal text with positional placeholders:
//!
//! | Form | Meaning |
//! |------|---------|
//! | `{N}` | argument `N`, zero-based |
//! | `%s` | next sequential argument (only `%s` advances the counter) |
//! | `%N$s` | argument `N`, one-based |
//! | `%%` | a literal `%` |
//!
//! Anything else, including a `{` or `%` that does not start one of these
//! forms, is literal text. Parsing never fails.

/// One piece of a parsed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// A placeholder for argument `index`; `raw` is its source text, emitted
    /// verbatim when the argument is missing.
    Arg { index: usize, raw: &'a str },
}

/// A parsed template borrowing from its source string.
///
/// # Example
/// ```
/// use mctext_i18n::Template;
///
/// let t = Template::parse("Hello, {0}! You have %2$s new %%.");
/// assert_eq!(t.render(&["Steve", "3"]), "Hello, Steve! You have 3 new %.");
/// assert_eq!(t.arg_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    #[must_use]
    pub fn parse(src: &'a str) -> Self {
        let bytes = src.as_bytes();
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut next_seq = 0;
        let mut i = 0;

        while i < bytes.len() {
            let placeholder = match bytes[i] {
                b'{' => brace_placeholder(bytes, i),
                b'%' => percent_placeholder(bytes, i, &mut next_seq),
                _ => None,
            };
            let Some((index, end)) = placeholder else {
                i += 1;
                continue;
            };

            if literal_start < i {
                segments.push(Segment::Literal(&src[literal_start..i]));
            }
            segments.push(match index {
                Some(index) => Segment::Arg {
                    index,
                    raw: &src[i..end],
                },
                // `%%`
                None => Segment::Literal(&src[i..i + 1]),
            });
            literal_start = end;
            i = end;
        }

        if literal_start < bytes.len() {
            segments.push(Segment::Literal(&src[literal_start..]));
        }
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// One past the highest argument index referenced.
    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Arg { index, .. } => Some(index + 1),
                Segment::Literal(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Substitute plain string arguments. Missing arguments keep their
    /// placeholder text.
    #[must_use]
    pub fn render(&self, args: &[&str]) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match *segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Arg { index, raw } => out.push_str(args.get(index).copied().unwrap_or(raw)),
            }
        }
        out
    }
}

/// `{digits}` starting at `start`. Returns the index and the end offset.
fn brace_placeholder(bytes: &[u8], start: usize) -> Option<(Option<usize>, usize)> {
    let digits_end = scan_digits(bytes, start + 1);
    if digits_end == start + 1 || bytes.get(digits_end) != Some(&b'}') {
        return None;
    }
    let index = parse_index(&bytes[start + 1..digits_end])?;
    Some((Some(index), digits_end + 1))
}

/// `%s`, `%N$s` or `%%` starting at `start`. `%%` yields a `None` index.
fn percent_placeholder(
    bytes: &[u8],
    start: usize,
    next_seq: &mut usize,
) -> Option<(Option<usize>, usize)> {
    match *bytes.get(start + 1)? {
        b'%' => Some((None, start + 2)),
        b's' => {
            let index = *next_seq;
            *next_seq += 1;
            Some((Some(index), start + 2))
        }
        b'0'..=b'9' => {
            let digits_end = scan_digits(bytes, start + 1);
            if bytes.get(digits_end..digits_end + 2) != Some(b"$s".as_slice()) {
                return None;
            }
            let position = parse_index(&bytes[start + 1..digits_end])?;
            let index = position.checked_sub(1)?;
            Some((Some(index), digits_end + 2))
        }
        _ => None,
    }
}

fn scan_digits(bytes: &[u8], from: usize) -> usize {
    bytes[from.min(bytes.len())..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |p| from + p)
}

fn parse_index(digits: &[u8]) -> Option<usize> {
    core::str::from_utf8(digits).ok()?.parse().ok()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn text_without_placeholder_chars_is_one_literal(s in "[^{%]{1,40}") {
            let t = Template::parse(&s);
            prop_assert_eq!(t.segments(), &[Segment::Literal(s.as_str())][..]);
            prop_assert_eq!(t.render(&["unused"]), s);
        }

        #[test]
        fn render_without_args_is_source_minus_escapes(s in "[a-z{}%$0-9 ]{0,40}") {
            // Only `%%` changes when every argument is missing.
            let t = Template::parse(&s);
            let rendered = t.render(&[]);
            prop_assert_eq!(rendered.len() + s.matches("%%").count(), s.len());
        }

        #[test]
        fn positional_forms_agree(
            args in proptest::collection::vec("[a-z]{0,6}", 1..6),
            pick in 0usize..6,
        ) {
            let index = pick % args.len();
            let refs: Vec<&str> = args.iter().map(String::as_str).collect();
            let brace = Template::parse(&format!("<{{{index}}}>")).render(&refs);
            let percent = Template::parse(&format!("<%{}$s>", index + 1)).render(&refs);
            prop_assert_eq!(&brace, &percent);
            prop_assert_eq!(brace, format!("<{}>", args[index]));
        }
    }
}
