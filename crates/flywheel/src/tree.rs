//! The item tree: an arena of owned items with generation-stamped handles.
//!
//! # Overview
//!
//! [`ItemTree`] owns every item of one hierarchy generation in a flat arena
//! and addresses them through [`ItemId`] handles. A handle carries the
//! generation it was minted in; after a rebuild (which bumps the generation)
//! every handle from the previous generation resolves to `None` instead of
//! dangling. Within one generation slots are never freed (structural moves
//! reattach items, they do not destroy them), so handles stay stable across
//! edits.
//!
//! Every tree starts from the fixed skeleton the presentation layer relies
//! on:
//!
//! ```text
//! root                      (synthetic, never rendered)
//! └── machine root          (row 0)
//!     ├── states root       (row 0)
//!     └── transitions root  (row 1)
//! ```
//!
//! Rows are positions in the owner's child sequence, so they are contiguous
//! and 0-based by construction; detaching an item renumbers the remaining
//! siblings implicitly.

use crate::item::{DEFAULT_MACHINE_TITLE, ItemCategory, ItemData};

/// One hierarchy generation. Bumped on every rebuild.
pub type Generation = u32;

/// Stable handle to an item within one tree generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId {
    index: u32,
    generation: Generation,
}

impl ItemId {
    /// Returns the generation this handle was minted in.
    pub fn generation(self) -> Generation {
        self.generation
    }
}

/// An item slot: ownership links plus the category payload.
#[derive(Debug)]
pub struct Item {
    parent: Option<ItemId>,
    children: Vec<ItemId>,
    data: ItemData,
}

impl Item {
    /// Borrow the category payload.
    pub fn data(&self) -> &ItemData {
        &self.data
    }

    /// Mutably borrow the category payload.
    pub(crate) fn data_mut(&mut self) -> &mut ItemData {
        &mut self.data
    }

    /// Returns the category tag.
    pub fn category(&self) -> ItemCategory {
        self.data.category()
    }

    /// Returns the owner handle; `None` only for the synthetic root.
    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    /// Borrow the ordered child handles.
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }
}

/// The ownership tree of one hierarchy generation.
#[derive(Debug)]
pub struct ItemTree {
    items: Vec<Item>,
    generation: Generation,
    root: ItemId,
    machine_root: ItemId,
    states_root: ItemId,
    transitions_root: ItemId,
}

impl ItemTree {
    /// Builds the fixed skeleton for a fresh generation.
    pub fn new(generation: Generation) -> Self {
        let mut tree = Self {
            items: Vec::with_capacity(4),
            generation,
            root: ItemId { index: 0, generation },
            machine_root: ItemId { index: 0, generation },
            states_root: ItemId { index: 0, generation },
            transitions_root: ItemId { index: 0, generation },
        };
        tree.root = tree.push(None, ItemData::Root);
        tree.machine_root = tree.attach(
            tree.root,
            ItemData::MachineRoot {
                name: DEFAULT_MACHINE_TITLE.to_string(),
            },
        );
        tree.states_root = tree.attach(tree.machine_root, ItemData::StatesRoot);
        tree.transitions_root = tree.attach(tree.machine_root, ItemData::TransitionsRoot);
        tree
    }

    /// Returns this tree's generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns the synthetic root handle.
    pub fn root(&self) -> ItemId {
        self.root
    }

    /// Returns the machine-root handle.
    pub fn machine_root(&self) -> ItemId {
        self.machine_root
    }

    /// Returns the states-aggregation handle.
    pub fn states_root(&self) -> ItemId {
        self.states_root
    }

    /// Returns the transitions-aggregation handle.
    pub fn transitions_root(&self) -> ItemId {
        self.transitions_root
    }

    /// True if `id` is a live handle of this generation.
    pub fn contains(&self, id: ItemId) -> bool {
        id.generation == self.generation && (id.index as usize) < self.items.len()
    }

    /// Resolves a handle, rejecting stale generations.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        if !self.contains(id) {
            return None;
        }
        self.items.get(id.index as usize)
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        if !self.contains(id) {
            return None;
        }
        self.items.get_mut(id.index as usize)
    }

    /// Returns the number of children under `id` (0 for stale handles).
    pub fn child_count(&self, id: ItemId) -> usize {
        self.get(id).map_or(0, |item| item.children.len())
    }

    /// Returns the child of `id` at `row`.
    pub fn child_at(&self, id: ItemId, row: usize) -> Option<ItemId> {
        self.get(id)?.children.get(row).copied()
    }

    /// Returns the owner of `id`; `None` for the root and stale handles.
    pub fn parent_of(&self, id: ItemId) -> Option<ItemId> {
        self.get(id)?.parent
    }

    /// Returns the position of `id` among its siblings.
    ///
    /// The synthetic root reports row 0.
    pub fn row_of(&self, id: ItemId) -> Option<usize> {
        let item = self.get(id)?;
        let Some(parent) = item.parent else {
            return Some(0);
        };
        let siblings = &self.items[parent.index as usize].children;
        siblings.iter().position(|child| *child == id)
    }

    /// Creates a new item and appends it as the last child of `parent`.
    pub fn attach(&mut self, parent: ItemId, data: ItemData) -> ItemId {
        debug_assert!(self.contains(parent), "attach target must be live");
        let id = self.push(Some(parent), data);
        self.items[parent.index as usize].children.push(id);
        id
    }

    /// Removes `id` from its owner's child sequence, returning the vacated
    /// row. The item itself stays live with no owner until reattached.
    ///
    /// The synthetic root cannot be detached.
    pub(crate) fn detach(&mut self, id: ItemId) -> Option<usize> {
        let parent = self.parent_of(id)?;
        let siblings = &mut self.items[parent.index as usize].children;
        let row = siblings.iter().position(|child| *child == id)?;
        siblings.remove(row);
        self.items[id.index as usize].parent = None;
        Some(row)
    }

    /// Appends the already-detached item `id` as the last child of `parent`.
    pub(crate) fn append_existing(&mut self, parent: ItemId, id: ItemId) {
        debug_assert!(self.contains(parent) && self.contains(id));
        debug_assert!(
            self.items[id.index as usize].parent.is_none(),
            "item must be detached before reattaching"
        );
        self.items[parent.index as usize].children.push(id);
        self.items[id.index as usize].parent = Some(parent);
    }

    /// True if `ancestor` lies on the owner chain of `id` (or equals it).
    pub fn is_ancestor_or_self(&self, ancestor: ItemId, id: ItemId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent_of(current);
        }
        false
    }

    /// Total number of items in this generation, detached ones included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the tree holds no items. Never the case in practice, since
    /// the skeleton is built on construction; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over every live item with its handle, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().enumerate().map(|(index, item)| {
            (
                ItemId {
                    index: index as u32,
                    generation: self.generation,
                },
                item,
            )
        })
    }

    fn push(&mut self, parent: Option<ItemId>, data: ItemData) -> ItemId {
        let id = ItemId {
            index: self.items.len() as u32,
            generation: self.generation,
        };
        self.items.push(Item {
            parent,
            children: Vec::new(),
            data,
        });
        id
    }
}
