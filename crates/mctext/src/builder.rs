//! Single-use builders that stage a node and freeze it into a [`Message`].
//!
//! There is one builder type per content kind, all sharing the common
//! setters on [`MessageBuilder`]. Every call returns `Result` so reuse after
//! [`MessageBuilder::build`] is reported as
//! [`Error::BuilderAlreadyFinalized`] instead of silently producing a second
//! message.

use mctext_i18n::Translatable;
use mctext_style::{Color, Decoration, Style};

use crate::error::{Error, Result};
use crate::message::{
    ClickAction, Content, HoverAction, Message, ScoreContent, ScoreRef, SelectorContent, TextContent,
    TranslatableContent,
};

/// Builder for plain-text nodes.
pub type TextBuilder = MessageBuilder<TextContent>;
/// Builder for translation-key nodes.
pub type TranslatableBuilder = MessageBuilder<TranslatableContent>;
pub type SelectorBuilder = MessageBuilder<SelectorContent>;
pub type ScoreBuilder = MessageBuilder<ScoreContent>;

#[derive(Debug, Clone)]
struct Draft<C> {
    content: C,
    style: Style,
    children: Vec<Message>,
    click: Option<ClickAction>,
    hover: Option<HoverAction>,
    insertion: Option<String>,
}

/// Mutable staging area for one message node of content kind `C`.
#[derive(Debug, Clone)]
pub struct MessageBuilder<C> {
    state: Option<Draft<C>>,
}

impl<C: Into<Content>> MessageBuilder<C> {
    fn with_content(content: C) -> Self {
        Self {
            state: Some(Draft {
                content,
                style: Style::new(),
                children: Vec::new(),
                click: None,
                hover: None,
                insertion: None,
            }),
        }
    }

    fn draft(&mut self) -> Result<&mut Draft<C>> {
        self.state.as_mut().ok_or(Error::BuilderAlreadyFinalized)
    }

    /// Replace the node's style.
    pub fn style(&mut self, style: Style) -> Result<&mut Self> {
        self.draft()?.style = style;
        Ok(self)
    }

    /// Set the node's color, keeping its decorations.
    pub fn color(&mut self, color: Color) -> Result<&mut Self> {
        let draft = self.draft()?;
        draft.style = draft.style.color(color);
        Ok(self)
    }

    /// Force a decoration on or off for this node and its descendants.
    pub fn decorate(&mut self, decoration: Decoration, on: bool) -> Result<&mut Self> {
        let draft = self.draft()?;
        draft.style = draft.style.decoration(decoration, on);
        Ok(self)
    }

    /// Set one style field by name, e.g. `("color", "dark_red")` or
    /// `("bold", "true")`.
    pub fn style_field(&mut self, field: &str, value: &str) -> Result<&mut Self> {
        let draft = self.draft()?;
        draft.style = draft.style.try_with(field, value)?;
        Ok(self)
    }

    /// Add one child after the existing ones.
    pub fn append(&mut self, child: Message) -> Result<&mut Self> {
        self.draft()?.children.push(child);
        Ok(self)
    }

    /// Add children in iteration order.
    pub fn append_all(&mut self, children: impl IntoIterator<Item = Message>) -> Result<&mut Self> {
        self.draft()?.children.extend(children);
        Ok(self)
    }

    /// Set the click action, replacing any previous one.
    pub fn on_click(&mut self, action: ClickAction) -> Result<&mut Self> {
        self.draft()?.click = Some(action);
        Ok(self)
    }

    /// Set the hover tooltip, replacing any previous one.
    pub fn on_hover(&mut self, action: HoverAction) -> Result<&mut Self> {
        self.draft()?.hover = Some(action);
        Ok(self)
    }

    /// Text inserted into the chat input on shift-click.
    pub fn insertion(&mut self, text: impl Into<String>) -> Result<&mut Self> {
        self.draft()?.insertion = Some(text.into());
        Ok(self)
    }

    /// Freeze the staged node. The builder cannot be used afterwards.
    pub fn build(&mut self) -> Result<Message> {
        let draft = self.state.take().ok_or(Error::BuilderAlreadyFinalized)?;
        Ok(Message::from_parts(
            draft.content.into(),
            draft.style,
            draft.children,
            draft.click,
            draft.hover,
            draft.insertion,
        ))
    }

    /// Whether [`Self::build`] has already been called.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.state.is_none()
    }
}

impl MessageBuilder<TextContent> {
    /// Start a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_content(TextContent {
            content: content.into(),
        })
    }

    /// A text builder with no content of its own, typically a styled
    /// container for children.
    pub fn empty() -> Self {
        Self::text(String::new())
    }

    /// Replace the staged text.
    pub fn content(&mut self, content: impl Into<String>) -> Result<&mut Self> {
        self.draft()?.content.content = content.into();
        Ok(self)
    }
}

impl MessageBuilder<TranslatableContent> {
    /// Start a translatable node for `key` with positional arguments.
    pub fn translatable(key: impl Into<String>, args: impl IntoIterator<Item = Message>) -> Self {
        Self::with_content(TranslatableContent {
            key: key.into(),
            args: args.into_iter().collect(),
        })
    }

    /// Same as [`Self::translatable`] with the key taken from `source`.
    pub fn translatable_from<T>(source: &T, args: impl IntoIterator<Item = Message>) -> Self
    where
        T: Translatable + ?Sized,
    {
        Self::translatable(source.translation_key(), args)
    }

    /// Append one positional argument.
    pub fn arg(&mut self, arg: Message) -> Result<&mut Self> {
        self.draft()?.content.args.push(arg);
        Ok(self)
    }
}

impl MessageBuilder<SelectorContent> {
    /// Start a selector node such as `@p`.
    pub fn selector(pattern: impl Into<String>) -> Self {
        Self::with_content(SelectorContent {
            pattern: pattern.into(),
        })
    }
}

impl MessageBuilder<ScoreContent> {
    /// Start a score node for `score`.
    pub fn score(score: ScoreRef) -> Self {
        Self::with_content(ScoreContent {
            score,
            override_text: None,
        })
    }

    /// Fixed text shown instead of the live score.
    pub fn override_text(&mut self, text: impl Into<String>) -> Result<&mut Self> {
        self.draft()?.content.override_text = Some(text.into());
        Ok(self)
    }
}
