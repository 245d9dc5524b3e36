#![forbid(unsafe_code)]

//! Rich-text chat messages.
//!
//! This crate provides:
//! - [`Message`], an immutable tree of styled text, translatable, selector,
//!   and score nodes with click/hover metadata
//! - [`MessageBuilder`] for staging nodes
//! - [`LegacyCodec`] for the flat marker-code string format
//! - [`Resolver`] for substituting translatable nodes from a
//!   [`TranslationLookup`]
//! - [`MessageFactory`], one configured handle over all of the above
//!
//! # Example
//! ```
//! use std::collections::HashMap;
//! use mctext::{Color, Message, MessageBuilder, MessageFactory};
//!
//! let factory = MessageFactory::default();
//! let name = MessageBuilder::text("Steve").color(Color::Yellow)?.build()?;
//! let msg = MessageBuilder::translatable("multiplayer.player.joined", [name]).build()?;
//!
//! let lookup: HashMap<&str, &str> = [("multiplayer.player.joined", "%s joined the game")].into();
//! let resolved = factory.resolve(&msg, &lookup)?;
//! assert_eq!(resolved.to_plain(), "Steve joined the game");
//! # Ok::<(), mctext::Error>(())
//! ```

/// Single-use node builders.
pub mod builder;
/// Runtime configuration.
pub mod config;
/// Error taxonomy.
pub mod error;
/// Configured entry-point handle.
pub mod factory;
/// Tree flattening into styled runs.
pub mod flatten;
/// Legacy marker-code codec.
pub mod legacy;
#[cfg(feature = "tracing-json")]
pub mod logging;
/// Message tree types.
pub mod message;
/// Translation resolution.
pub mod resolve;

pub use builder::{MessageBuilder, ScoreBuilder, SelectorBuilder, TextBuilder, TranslatableBuilder};
pub use config::TextConfig;
pub use error::{Error, Result};
pub use factory::MessageFactory;
pub use flatten::{FlatRun, Flatten};
pub use legacy::{
    DEFAULT_LEGACY_CHAR, LegacyCodec, LegacyRun, default_legacy_char, init_default_legacy_char,
};
pub use message::{
    ClickAction, Content, HoverAction, Message, ScoreContent, ScoreRef, SelectorContent, TextContent,
    TranslatableContent,
};
pub use resolve::{DEFAULT_MAX_DEPTH, MissingKeyPolicy, Resolver};

pub use mctext_i18n::{StringCatalog, Translatable, TranslationLookup};
pub use mctext_style::{Cascade, Color, Decoration, FormatCode, Rgb, Style, StyleError};
