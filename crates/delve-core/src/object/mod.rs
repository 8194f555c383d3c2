//! Object system
//!
//! Contains the item catalog, item instances and the item factory.

mod item;

pub use item::{Item, ItemDef, ItemId, ItemKind, default_items, spawn_items};
