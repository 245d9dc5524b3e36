//! Translation resolution: replace Translatable nodes with concrete text.
//!
//! Each Translatable node's template is looked up, and its placeholders are
//! substituted with the node's argument messages. Arguments are resolved
//! first (one level deeper), only when a placeholder actually references
//! them, and each at most once. Plain-text arguments merge into the
//! surrounding literal text, so a template whose arguments are all bare text
//! resolves to a single Text node. Styled arguments stay separate nodes and
//! keep their style.
//!
//! The resolved node keeps the Translatable node's style, events, and
//! children; its content is the first plain piece of the expansion and the
//! remaining pieces become leading children.

use mctext_i18n::{Segment, Template, TranslationLookup};
use tracing::{debug, instrument, warn};

use crate::config::TextConfig;
use crate::error::{Error, Result};
use crate::message::{Content, HoverAction, Message, TextContent, TranslatableContent};

/// Nesting limit used unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// What to do when the lookup has no template for a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MissingKeyPolicy {
    /// Fail with [`Error::UnknownTranslationKey`].
    #[default]
    Error,
    /// Render the key itself as literal text and log a warning.
    RawKey,
}

/// Resolves Translatable nodes against a [`TranslationLookup`].
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use mctext::{Message, MessageBuilder, Resolver};
///
/// let lookup: HashMap<&str, &str> = [("greet", "Hello, {0}!")].into();
/// let msg = MessageBuilder::translatable("greet", [Message::of("World")]).build()?;
/// let resolved = Resolver::new().resolve(&msg, &lookup)?;
/// assert_eq!(resolved, Message::of("Hello, World!"));
/// # Ok::<(), mctext::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    max_depth: usize,
    missing_key: MissingKeyPolicy,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Default depth limit, unknown keys are errors.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            missing_key: MissingKeyPolicy::Error,
        }
    }

    /// Depth limit and missing-key policy taken from `config`.
    #[must_use]
    pub fn from_config(config: &TextConfig) -> Self {
        Self {
            max_depth: config.max_resolve_depth,
            missing_key: config.missing_key,
        }
    }

    /// Argument nesting limit. A Translatable reached through this many or
    /// more argument levels fails with
    /// [`Error::TranslationRecursionLimitExceeded`]; `0` rejects every
    /// Translatable node.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set what happens when a key has no template.
    #[must_use]
    pub const fn with_missing_key(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key = policy;
        self
    }

    /// Current argument nesting limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Current missing-key policy.
    #[must_use]
    pub const fn missing_key(&self) -> MissingKeyPolicy {
        self.missing_key
    }

    /// `msg` with every Translatable node in the tree resolved, including
    /// children and hover text. A tree without Translatable nodes is returned
    /// as a cheap clone.
    #[instrument(skip_all, level = "trace")]
    pub fn resolve<L>(&self, msg: &Message, lookup: &L) -> Result<Message>
    where
        L: TranslationLookup + ?Sized,
    {
        Ok(self.rewrite(msg, lookup, 0)?.unwrap_or_else(|| msg.clone()))
    }

    /// Resolve, then render to plain text.
    pub fn resolve_to_string<L>(&self, msg: &Message, lookup: &L) -> Result<String>
    where
        L: TranslationLookup + ?Sized,
    {
        Ok(self.resolve(msg, lookup)?.to_plain())
    }

    /// `None` when nothing under `msg` needed resolving.
    ///
    /// Children and hover text are walked with an explicit stack; only
    /// argument expansion nests, and that is bounded by `max_depth`.
    fn rewrite<L>(&self, msg: &Message, lookup: &L, depth: usize) -> Result<Option<Message>>
    where
        L: TranslationLookup + ?Sized,
    {
        let mut stack = vec![Pending::new(msg)];
        while let Some(pending) = stack.pop() {
            if let Some(next) = pending.next_sub() {
                stack.push(pending);
                stack.push(Pending::new(next));
                continue;
            }
            let rewritten = self.rebuild(pending, lookup, depth)?;
            match stack.last_mut() {
                Some(parent) => parent.subs.push(rewritten),
                None => return Ok(rewritten),
            }
        }
        Ok(None)
    }

    /// Reassemble one node once its children and hover text are rewritten.
    fn rebuild<L>(&self, pending: Pending<'_>, lookup: &L, depth: usize) -> Result<Option<Message>>
    where
        L: TranslationLookup + ?Sized,
    {
        let Pending { msg, subs } = pending;
        let changed = subs.iter().any(Option::is_some);

        let (content, leading) = match msg.content() {
            Content::Translatable(translatable) => self.expand(translatable, lookup, depth)?,
            _ if !changed => return Ok(None),
            other => (other.clone(), Vec::new()),
        };

        let mut subs = subs.into_iter();
        let children = msg
            .children()
            .iter()
            .zip(subs.by_ref())
            .map(|(child, rewritten)| rewritten.unwrap_or_else(|| child.clone()));
        let children: Vec<Message> = leading.into_iter().chain(children).collect();

        let hover = match (msg.hover_action(), subs.next().flatten()) {
            (Some(HoverAction::ShowText(_)), Some(text)) => Some(HoverAction::ShowText(text)),
            (Some(HoverAction::ShowEntity { id, kind, .. }), Some(name)) => {
                Some(HoverAction::ShowEntity {
                    id: id.clone(),
                    kind: kind.clone(),
                    name: Some(name),
                })
            }
            (other, _) => other.cloned(),
        };

        Ok(Some(Message::from_parts(
            content,
            *msg.style(),
            children,
            msg.click_action().cloned(),
            hover,
            msg.insertion().map(str::to_owned),
        )))
    }

    /// Content and leading children for one Translatable node.
    fn expand<L>(
        &self,
        translatable: &TranslatableContent,
        lookup: &L,
        depth: usize,
    ) -> Result<(Content, Vec<Message>)>
    where
        L: TranslationLookup + ?Sized,
    {
        let key = translatable.key();
        if depth >= self.max_depth {
            warn!(key, limit = self.max_depth, "translation recursion limit exceeded");
            return Err(Error::TranslationRecursionLimitExceeded {
                key: key.to_owned(),
                limit: self.max_depth,
            });
        }

        let Some(template) = lookup.template(key) else {
            return match self.missing_key {
                MissingKeyPolicy::Error => Err(Error::UnknownTranslationKey { key: key.to_owned() }),
                MissingKeyPolicy::RawKey => {
                    warn!(key, "unknown translation key, rendering raw key");
                    Ok((text_content(key.to_owned()), Vec::new()))
                }
            };
        };

        let args = translatable.args();
        let mut cache: Vec<Option<Message>> = vec![None; args.len()];
        let mut pieces = Vec::new();
        let mut literal = String::new();

        for segment in Template::parse(&template).segments() {
            match *segment {
                Segment::Literal(text) => literal.push_str(text),
                Segment::Arg { index, raw } => {
                    let Some(arg) = args.get(index) else {
                        literal.push_str(raw);
                        continue;
                    };
                    let resolved = match cache[index].clone() {
                        Some(resolved) => resolved,
                        None => {
                            let resolved = self
                                .rewrite(arg, lookup, depth + 1)?
                                .unwrap_or_else(|| arg.clone());
                            cache[index] = Some(resolved.clone());
                            resolved
                        }
                    };
                    match resolved.as_text() {
                        Some(text) if resolved.is_plain_text() => literal.push_str(text),
                        _ => {
                            if !literal.is_empty() {
                                pieces.push(Message::of(std::mem::take(&mut literal)));
                            }
                            pieces.push(resolved);
                        }
                    }
                }
            }
        }
        debug!(key, depth, pieces = pieces.len() + usize::from(!literal.is_empty()), "resolved translation");

        let head = if pieces.is_empty() {
            std::mem::take(&mut literal)
        } else {
            if !literal.is_empty() {
                pieces.push(Message::of(literal));
            }
            match pieces.first().and_then(|m| m.as_text().filter(|_| m.is_plain_text())) {
                Some(text) => {
                    let text = text.to_owned();
                    pieces.remove(0);
                    text
                }
                None => String::new(),
            }
        };
        Ok((text_content(head), pieces))
    }
}

/// A node whose children (then hover text) are being rewritten.
struct Pending<'m> {
    msg: &'m Message,
    /// One entry per finished child, then one for the hover message.
    subs: Vec<Option<Message>>,
}

impl<'m> Pending<'m> {
    fn new(msg: &'m Message) -> Self {
        Self {
            msg,
            subs: Vec::new(),
        }
    }

    fn next_sub(&self) -> Option<&'m Message> {
        let msg = self.msg;
        let children = msg.children();
        match self.subs.len() {
            done if done < children.len() => Some(&children[done]),
            done if done == children.len() => msg.hover_message(),
            _ => None,
        }
    }
}

fn text_content(content: String) -> Content {
    Content::Text(TextContent { content })
}
