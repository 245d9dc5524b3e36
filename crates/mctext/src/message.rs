//! Immutable rich-text message tree.
//!
//! A [`Message`] is one node: some content, a [`Style`], optional
//! click/hover/insertion metadata, and an ordered list of children rendered
//! after the node's own content. Nodes are reference counted and never
//! mutated after construction, so cloning is cheap and a tree can be shared
//! freely across threads.
//!
//! Nodes are created through [`crate::builder::MessageBuilder`] (or
//! [`Message::of`] for plain text).

use core::fmt;
use std::sync::Arc;

use mctext_style::Style;

/// Plain text content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextContent {
    pub(crate) content: String,
}

impl TextContent {
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A localization key plus positional argument messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableContent {
    pub(crate) key: String,
    pub(crate) args: Vec<Message>,
}

impl TranslatableContent {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn args(&self) -> &[Message] {
        &self.args
    }
}

/// An entity selector such as `@p` or `@a[r=10]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorContent {
    pub(crate) pattern: String,
}

impl SelectorContent {
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Which score to display: a holder's value in one objective.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreRef {
    pub name: String,
    pub objective: String,
}

impl ScoreRef {
    #[must_use]
    pub fn new(name: impl Into<String>, objective: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objective: objective.into(),
        }
    }
}

/// A scoreboard value, optionally overridden by fixed text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreContent {
    pub(crate) score: ScoreRef,
    pub(crate) override_text: Option<String>,
}

impl ScoreContent {
    #[must_use]
    pub fn score(&self) -> &ScoreRef {
        &self.score
    }

    #[must_use]
    pub fn override_text(&self) -> Option<&str> {
        self.override_text.as_deref()
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(TextContent),
    Translatable(TranslatableContent),
    Selector(SelectorContent),
    Score(ScoreContent),
}

impl Content {
    /// The text this node contributes when rendered without resolution.
    ///
    /// A selector renders its pattern, a score its override text (empty when
    /// absent), and an unresolved translatable its key.
    #[must_use]
    pub fn rendered_text(&self) -> &str {
        match self {
            Self::Text(text) => &text.content,
            Self::Translatable(translatable) => &translatable.key,
            Self::Selector(selector) => &selector.pattern,
            Self::Score(score) => score.override_text.as_deref().unwrap_or(""),
        }
    }
}

impl From<TextContent> for Content {
    fn from(value: TextContent) -> Self {
        Self::Text(value)
    }
}

impl From<TranslatableContent> for Content {
    fn from(value: TranslatableContent) -> Self {
        Self::Translatable(value)
    }
}

impl From<SelectorContent> for Content {
    fn from(value: SelectorContent) -> Self {
        Self::Selector(value)
    }
}

impl From<ScoreContent> for Content {
    fn from(value: ScoreContent) -> Self {
        Self::Score(value)
    }
}

/// Action to take when the text is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClickAction {
    OpenUrl(String),
    RunCommand(String),
    SuggestCommand(String),
    /// Book page, 1-based.
    ChangePage(u32),
    CopyToClipboard(String),
}

/// Tooltip shown while the text is hovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverAction {
    ShowText(Message),
    ShowItem { id: String, count: u8 },
    ShowEntity {
        id: String,
        kind: Option<String>,
        name: Option<Message>,
    },
}

#[derive(Debug, PartialEq, Eq)]
struct Node {
    content: Content,
    style: Style,
    children: Vec<Message>,
    click: Option<ClickAction>,
    hover: Option<HoverAction>,
    insertion: Option<String>,
}

impl Node {
    /// Moves out every message this node owns directly.
    fn release_into(&mut self, pending: &mut Vec<Message>) {
        pending.append(&mut self.children);
        if let Content::Translatable(translatable) = &mut self.content {
            pending.append(&mut translatable.args);
        }
        match self.hover.take() {
            Some(HoverAction::ShowText(text)) => pending.push(text),
            Some(HoverAction::ShowEntity { name: Some(name), .. }) => pending.push(name),
            _ => {}
        }
    }
}

// Unlinks descendants onto a work list so dropping a deep tree does not
// recurse once per level. Shared nodes stop the walk.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.release_into(&mut pending);
        while let Some(msg) = pending.pop() {
            if let Some(mut node) = Arc::into_inner(msg.0) {
                node.release_into(&mut pending);
            }
        }
    }
}

/// One immutable node of a message tree.
///
/// # Example
/// ```
/// use mctext::{Color, Message, MessageBuilder};
///
/// let msg = MessageBuilder::text("Hello, ")
///     .color(Color::Gold)?
///     .append(Message::of("world"))?
///     .build()?;
/// assert_eq!(msg.to_plain(), "Hello, world");
/// # Ok::<(), mctext::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Message(Arc<Node>);

impl Message {
    pub(crate) fn from_parts(
        content: Content,
        style: Style,
        children: Vec<Message>,
        click: Option<ClickAction>,
        hover: Option<HoverAction>,
        insertion: Option<String>,
    ) -> Self {
        Self(Arc::new(Node {
            content,
            style,
            children,
            click,
            hover,
            insertion,
        }))
    }

    /// An unstyled plain-text node without children or events.
    #[must_use]
    pub fn of(content: impl Into<String>) -> Self {
        Self::from_parts(
            Content::Text(TextContent {
                content: content.into(),
            }),
            Style::new(),
            Vec::new(),
            None,
            None,
            None,
        )
    }

    /// An empty plain-text node.
    #[must_use]
    pub fn empty() -> Self {
        Self::of(String::new())
    }

    /// What this node renders: text, a translation key, a selector, or a score.
    #[must_use]
    pub fn content(&self) -> &Content {
        &self.0.content
    }

    /// This node's own style, before inheritance.
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.0.style
    }

    /// Direct children, rendered after this node's own content.
    #[must_use]
    pub fn children(&self) -> &[Message] {
        &self.0.children
    }

    /// Click action set on this node, if any.
    #[must_use]
    pub fn click_action(&self) -> Option<&ClickAction> {
        self.0.click.as_ref()
    }

    /// Hover tooltip set on this node, if any.
    #[must_use]
    pub fn hover_action(&self) -> Option<&HoverAction> {
        self.0.hover.as_ref()
    }

    /// Text inserted into the chat input on shift-click.
    #[must_use]
    pub fn insertion(&self) -> Option<&str> {
        self.0.insertion.as_deref()
    }

    /// Text content if this is a Text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.0.content {
            Content::Text(text) => Some(&text.content),
            _ => None,
        }
    }

    /// Key and arguments if this is a Translatable node.
    #[must_use]
    pub fn as_translatable(&self) -> Option<&TranslatableContent> {
        match &self.0.content {
            Content::Translatable(translatable) => Some(translatable),
            _ => None,
        }
    }

    /// Whether this node is bare text: no style, children, or events.
    #[must_use]
    pub fn is_plain_text(&self) -> bool {
        matches!(self.0.content, Content::Text(_))
            && self.0.style.is_empty()
            && self.0.children.is_empty()
            && self.0.click.is_none()
            && self.0.hover.is_none()
            && self.0.insertion.is_none()
    }

    /// Whether two handles share the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Message) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Whether any node in the tree, including hover text, is translatable.
    #[must_use]
    pub fn contains_translatable(&self) -> bool {
        let mut stack = vec![self];
        while let Some(msg) = stack.pop() {
            if matches!(msg.0.content, Content::Translatable(_)) {
                return true;
            }
            stack.extend(msg.hover_message());
            stack.extend(msg.children().iter().rev());
        }
        false
    }

    /// The message carried by this node's hover action, if it has one.
    pub(crate) fn hover_message(&self) -> Option<&Message> {
        match &self.0.hover {
            Some(HoverAction::ShowText(text)) => Some(text),
            Some(HoverAction::ShowEntity { name: Some(name), .. }) => Some(name),
            _ => None,
        }
    }

    /// Concatenated rendered text of the whole tree, formatting removed.
    #[must_use]
    pub fn to_plain(&self) -> String {
        self.flatten().map(|run| run.text).collect()
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &*self.0;
        let mut s = f.debug_struct("Message");
        s.field("content", &node.content);
        if !node.style.is_empty() {
            s.field("style", &node.style);
        }
        if !node.children.is_empty() {
            s.field("children", &node.children);
        }
        if let Some(click) = &node.click {
            s.field("click", click);
        }
        if let Some(hover) = &node.hover {
            s.field("hover", hover);
        }
        if let Some(insertion) = &node.insertion {
            s.field("insertion", insertion);
        }
        s.finish()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in self.flatten() {
            f.write_str(run.text)?;
        }
        Ok(())
    }
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Self::of(value)
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Self::of(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MessageBuilder;
    use mctext_style::Color;

    #[test]
    fn of_is_plain() {
        let m = Message::of("hi");
        assert_eq!(m.as_text(), Some("hi"));
        assert!(m.is_plain_text());
        assert!(m.children().is_empty());
        assert_eq!(m.click_action(), None);
    }

    #[test]
    fn clone_shares_node() {
        let m = Message::of("shared");
        let c = m.clone();
        assert!(m.ptr_eq(&c));
        assert!(!m.ptr_eq(&Message::of("shared")));
        assert_eq!(m, Message::of("shared"));
    }

    #[test]
    fn rendered_text_per_variant() {
        let sel = MessageBuilder::selector("@p").build().unwrap();
        assert_eq!(sel.content().rendered_text(), "@p");

        let score = MessageBuilder::score(ScoreRef::new("Steve", "kills")).build().unwrap();
        assert_eq!(score.content().rendered_text(), "");

        let score = MessageBuilder::score(ScoreRef::new("Steve", "kills"))
            .override_text("12")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(score.content().rendered_text(), "12");

        let tr = MessageBuilder::translatable("chat.type.text", []).build().unwrap();
        assert_eq!(tr.content().rendered_text(), "chat.type.text");
    }

    #[test]
    fn to_plain_walks_children_in_order() {
        let m = MessageBuilder::text("a")
            .append(Message::of("b"))
            .unwrap()
            .append(
                MessageBuilder::text("c")
                    .append(Message::of("d"))
                    .unwrap()
                    .build()
                    .unwrap(),
            )
            .unwrap()
            .append(Message::of("e"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(m.to_plain(), "abcde");
        assert_eq!(m.to_string(), "abcde");
    }

    #[test]
    fn styled_is_not_plain() {
        let m = MessageBuilder::text("x").color(Color::Red).unwrap().build().unwrap();
        assert!(!m.is_plain_text());
    }

    #[test]
    fn contains_translatable_checks_hover_and_children() {
        let tr = MessageBuilder::translatable("k", []).build().unwrap();
        assert!(tr.contains_translatable());
        assert!(!Message::of("x").contains_translatable());

        let hovered = MessageBuilder::text("x")
            .on_hover(HoverAction::ShowText(tr.clone()))
            .unwrap()
            .build()
            .unwrap();
        assert!(hovered.contains_translatable());

        let parent = MessageBuilder::text("p").append(tr).unwrap().build().unwrap();
        assert!(parent.contains_translatable());
    }

    fn chain(depth: usize) -> Message {
        let mut msg = Message::of("leaf");
        for _ in 0..depth {
            msg = MessageBuilder::empty().append(msg).unwrap().build().unwrap();
        }
        msg
    }

    #[test]
    fn deep_chain_drops_without_overflow() {
        drop(chain(200_000));
    }

    #[test]
    fn deep_argument_and_hover_chains_drop() {
        let mut msg = Message::of("leaf");
        for i in 0..100_000 {
            msg = if i % 2 == 0 {
                MessageBuilder::translatable("wrap", [msg]).build().unwrap()
            } else {
                MessageBuilder::empty()
                    .on_hover(HoverAction::ShowText(msg))
                    .unwrap()
                    .build()
                    .unwrap()
            };
        }
        drop(msg);
    }

    #[test]
    fn shared_subtree_survives_parent_drop() {
        let shared = chain(1_000);
        let parent = MessageBuilder::text("p").append(shared.clone()).unwrap().build().unwrap();
        drop(parent);
        assert_eq!(shared.to_plain(), "leaf");
        assert_eq!(shared.flatten().count(), 1_001);
    }

    #[test]
    fn contains_translatable_on_deep_chain() {
        let deep = chain(200_000);
        assert!(!deep.contains_translatable());
        let tagged = MessageBuilder::text("x")
            .append(deep)
            .unwrap()
            .append(MessageBuilder::translatable("k", []).build().unwrap())
            .unwrap()
            .build()
            .unwrap();
        assert!(tagged.contains_translatable());
    }

    #[test]
    fn message_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Message>();
    }

    #[test]
    fn debug_omits_empty_fields() {
        let dbg = format!("{:?}", Message::of("x"));
        assert!(!dbg.contains("children"));
        assert!(!dbg.contains("style"));
    }
}
