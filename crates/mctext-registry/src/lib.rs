#![forbid(unsafe_code)]

//! Keyed registry of block and item types.
//!
//! This is the lookup-table collaborator of the message core: block and item
//! types are registered once at startup and looked up by id afterwards. Both
//! types carry a translation key, so they can seed translatable messages
//! directly.
//!
//! Ids are namespaced (`namespace:path`); an id without a namespace is taken
//! to be in the `minecraft` namespace, so `"stone"` and `"minecraft:stone"`
//! name the same entry.

use std::borrow::Cow;
use std::collections::HashMap;

use mctext_i18n::Translatable;
use tracing::{debug, warn};

/// Namespace assumed for ids that do not name one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Errors from registry mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The id already maps to a different value.
    #[error("{kind} '{id}' is already registered with a different definition")]
    ConflictingRegistration { kind: &'static str, id: String },
    /// The id is empty or has an empty namespace or path.
    #[error("invalid {kind} id {id:?}")]
    InvalidId { kind: &'static str, id: String },
}

/// Expand a bare path to `minecraft:path`.
#[must_use]
pub fn normalize_id(id: &str) -> Cow<'_, str> {
    if id.contains(':') {
        Cow::Borrowed(id)
    } else {
        Cow::Owned(format!("{DEFAULT_NAMESPACE}:{id}"))
    }
}

fn validate_id(kind: &'static str, id: &str) -> Result<(), RegistryError> {
    match id.split_once(':') {
        Some((ns, path)) if !ns.is_empty() && !path.is_empty() => Ok(()),
        _ => Err(RegistryError::InvalidId {
            kind,
            id: id.to_owned(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockType {
    id: String,
    translation_key: String,
}

impl BlockType {
    #[must_use]
    pub fn new(id: &str, translation_key: impl Into<String>) -> Self {
        Self {
            id: normalize_id(id).into_owned(),
            translation_key: translation_key.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Translatable for BlockType {
    fn translation_key(&self) -> &str {
        &self.translation_key
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemType {
    id: String,
    translation_key: String,
    max_stack_size: u8,
}

impl ItemType {
    /// An item stacking to 64.
    #[must_use]
    pub fn new(id: &str, translation_key: impl Into<String>) -> Self {
        Self {
            id: normalize_id(id).into_owned(),
            translation_key: translation_key.into(),
            max_stack_size: 64,
        }
    }

    #[must_use]
    pub fn with_max_stack_size(mut self, max_stack_size: u8) -> Self {
        self.max_stack_size = max_stack_size;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn max_stack_size(&self) -> u8 {
        self.max_stack_size
    }
}

impl Translatable for ItemType {
    fn translation_key(&self) -> &str {
        &self.translation_key
    }
}

/// Any object the registry can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryRef<'a> {
    Block(&'a BlockType),
    Item(&'a ItemType),
}

impl<'a> From<&'a BlockType> for RegistryRef<'a> {
    fn from(block: &'a BlockType) -> Self {
        Self::Block(block)
    }
}

impl<'a> From<&'a ItemType> for RegistryRef<'a> {
    fn from(item: &'a ItemType) -> Self {
        Self::Item(item)
    }
}

/// Block and item lookup by id.
///
/// # Example
/// ```
/// use mctext_registry::{BlockType, GameRegistry, ItemType};
///
/// let mut registry = GameRegistry::new();
/// registry.register_block(BlockType::new("stone", "tile.stone.name")).unwrap();
/// registry.register_item(ItemType::new("minecraft:stick", "item.stick.name")).unwrap();
///
/// let stone = registry.get_block("minecraft:stone").unwrap();
/// assert_eq!(registry.get_id(stone), Some("minecraft:stone"));
/// assert!(registry.get_item("stick").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GameRegistry {
    blocks: HashMap<String, BlockType>,
    items: HashMap<String, ItemType>,
}

impl GameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get_block(&self, id: &str) -> Option<&BlockType> {
        self.blocks.get(normalize_id(id).as_ref())
    }

    #[must_use]
    pub fn get_item(&self, id: &str) -> Option<&ItemType> {
        self.items.get(normalize_id(id).as_ref())
    }

    /// Id under which `obj` is registered.
    ///
    /// Returns `None` for objects that were never registered, including ones
    /// that share an id with a registered but different definition.
    #[must_use]
    pub fn get_id<'a>(&self, obj: impl Into<RegistryRef<'a>>) -> Option<&str> {
        match obj.into() {
            RegistryRef::Block(block) => self
                .blocks
                .get(block.id())
                .filter(|registered| *registered == block)
                .map(BlockType::id),
            RegistryRef::Item(item) => self
                .items
                .get(item.id())
                .filter(|registered| *registered == item)
                .map(ItemType::id),
        }
    }

    /// Register a block type. Re-registering an equal definition is a no-op.
    pub fn register_block(&mut self, block: BlockType) -> Result<(), RegistryError> {
        register(&mut self.blocks, "block", block.id.clone(), block)
    }

    /// Register an item type. Re-registering an equal definition is a no-op.
    pub fn register_item(&mut self, item: ItemType) -> Result<(), RegistryError> {
        register(&mut self.items, "item", item.id.clone(), item)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &BlockType> {
        self.blocks.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemType> {
        self.items.values()
    }
}

fn register<T: PartialEq>(
    table: &mut HashMap<String, T>,
    kind: &'static str,
    id: String,
    value: T,
) -> Result<(), RegistryError> {
    validate_id(kind, &id)?;
    match table.get(&id) {
        Some(existing) if *existing == value => {
            debug!(kind, id = %id, "duplicate registration ignored");
            Ok(())
        }
        Some(_) => {
            warn!(kind, id = %id, "conflicting registration rejected");
            Err(RegistryError::ConflictingRegistration { kind, id })
        }
        None => {
            debug!(kind, id = %id, "registered");
            table.insert(id, value);
            Ok(())
        }
    }
}
