//! Depth-first flattening of a message tree into styled runs.

use mctext_style::{Cascade, Style};
use tracing::trace;

use crate::message::{ClickAction, HoverAction, Message};

/// One piece of rendered text with its fully inherited style and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRun<'a> {
    pub text: &'a str,
    pub style: Style,
    pub click: Option<&'a ClickAction>,
    pub hover: Option<&'a HoverAction>,
    pub insertion: Option<&'a str>,
}

#[derive(Clone, Copy)]
struct Frame<'a> {
    node: &'a Message,
    inherited: Style,
    click: Option<&'a ClickAction>,
    hover: Option<&'a HoverAction>,
    insertion: Option<&'a str>,
}

/// Pre-order iterator over a tree's runs: a node's own text, then each child
/// in order.
///
/// Uses an explicit stack, so deep trees do not grow the call stack.
#[derive(Clone)]
pub struct Flatten<'a> {
    stack: Vec<Frame<'a>>,
    mode: Cascade,
}

impl<'a> Flatten<'a> {
    pub(crate) fn new(root: &'a Message, mode: Cascade) -> Self {
        Self {
            stack: vec![Frame {
                node: root,
                inherited: Style::new(),
                click: None,
                hover: None,
                insertion: None,
            }],
            mode,
        }
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = FlatRun<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.stack.pop()?;
        let node = frame.node;
        let style = node.style().cascade(&frame.inherited, self.mode);
        let click = node.click_action().or(frame.click);
        let hover = node.hover_action().or(frame.hover);
        let insertion = node.insertion().or(frame.insertion);

        self.stack.extend(node.children().iter().rev().map(|child| Frame {
            node: child,
            inherited: style,
            click,
            hover,
            insertion,
        }));

        let text = node.content().rendered_text();
        trace!(text, ?style, "flattened run");
        Some(FlatRun {
            text,
            style,
            click,
            hover,
            insertion,
        })
    }
}

impl Message {
    /// Runs with field-wise style inheritance.
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten::new(self, Cascade::Inherit)
    }

    /// Runs with the given cascade mode. [`Cascade::Legacy`] matches what a
    /// legacy client shows, where a color resets inherited decorations.
    pub fn flatten_with(&self, mode: Cascade) -> Flatten<'_> {
        Flatten::new(self, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MessageBuilder;
    use mctext_style::Color;

    fn tree() -> Message {
        // A(red, bold) -> [B(green), C(italic) -> [D]]
        let d = Message::of("D");
        let c = MessageBuilder::text("C")
            .style(Style::new().italic())
            .unwrap()
            .append(d)
            .unwrap()
            .build()
            .unwrap();
        let b = MessageBuilder::text("B").color(Color::Green).unwrap().build().unwrap();
        MessageBuilder::text("A")
            .style(Style::new().color(Color::Red).bold())
            .unwrap()
            .append_all([b, c])
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn pre_order_text() {
        let t = tree();
        let texts: Vec<_> = t.flatten().map(|r| r.text).collect();
        assert_eq!(texts, ["A", "B", "C", "D"]);
    }

    #[test]
    fn inherit_cascade_is_field_wise() {
        let t = tree();
        let runs: Vec<_> = t.flatten().collect();
        assert_eq!(runs[1].style, Style::new().color(Color::Green).bold());
        assert_eq!(runs[3].style, Style::new().color(Color::Red).bold().italic());
    }

    #[test]
    fn legacy_cascade_color_drops_decorations() {
        let t = tree();
        let runs: Vec<_> = t.flatten_with(Cascade::Legacy).collect();
        assert_eq!(runs[1].style, Style::new().color(Color::Green));
        assert_eq!(runs[2].style, Style::new().color(Color::Red).bold().italic());
    }

    #[test]
    fn events_inherit_until_overridden() {
        let open = ClickAction::OpenUrl("https://example.org".into());
        let run_cmd = ClickAction::RunCommand("/help".into());
        let inner = MessageBuilder::text("inner")
            .on_click(run_cmd.clone())
            .unwrap()
            .build()
            .unwrap();
        let root = MessageBuilder::text("outer")
            .on_click(open.clone())
            .unwrap()
            .insertion("ins")
            .unwrap()
            .append_all([Message::of("plain"), inner])
            .unwrap()
            .build()
            .unwrap();

        let runs: Vec<_> = root.flatten().collect();
        assert_eq!(runs[1].click, Some(&open));
        assert_eq!(runs[1].insertion, Some("ins"));
        assert_eq!(runs[2].click, Some(&run_cmd));
    }

    #[test]
    fn deep_tree_does_not_recurse() {
        let mut msg = Message::of("leaf");
        for _ in 0..10_000 {
            msg = MessageBuilder::empty().append(msg).unwrap().build().unwrap();
        }
        assert_eq!(msg.to_plain(), "leaf");
        assert_eq!(msg.flatten().count(), 10_001);
    }
}
