//! Item variants of the state-machine tree.
//!
//! Every node in the in-memory hierarchy is one of the [`ItemData`] variants,
//! tagged by [`ItemCategory`]. Presentation concerns that are pure functions
//! of the category or payload (display label, icon handle, capability flags)
//! live here as total matches over the tag.

use std::fmt;

use flywheel_core::geometry::{EdgeGeometry, NodeGeometry, Point};

use crate::tree::ItemId;

/// Display name a machine gets before a document supplies one.
pub const DEFAULT_MACHINE_TITLE: &str = "State Machine";

/// Placeholder title for states the source document left unnamed.
pub const UNTITLED_NODE_LABEL: &str = "(untitled)";

/// Fixed label of initial-state markers, which carry no title of their own.
pub const INITIAL_MARKER_LABEL: &str = "(initial)";

/// Fixed label of the states aggregation container.
pub const STATES_LABEL: &str = "States";

/// Fixed label of the transitions aggregation container.
pub const TRANSITIONS_LABEL: &str = "Transitions";

/// The category tag of a tree item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    /// Synthetic top-level container; never rendered.
    Root,
    /// The state-machine root holding the machine's display name.
    MachineRoot,
    /// Grouping container for states.
    StatesRoot,
    /// Grouping container for transitions.
    TransitionsRoot,
    State,
    Initial,
    Transition,
    Action,
    Comment,
}

/// Icon handle per category.
///
/// Icon resources are loaded by the presentation layer; the model only
/// selects which handle a category maps to. The mapping is total: every
/// category resolves to a handle, with [`Icon::None`] as the default for
/// the never-rendered synthetic root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    None,
    MachineRoot,
    StatesRoot,
    TransitionsRoot,
    State,
    Initial,
    Transition,
    Action,
    Comment,
}

/// Capability flags the presentation layer queries per item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub selectable: bool,
    pub editable: bool,
    pub draggable: bool,
    pub droppable: bool,
}

impl ItemCategory {
    /// Returns the icon handle for this category.
    pub fn icon(self) -> Icon {
        match self {
            Self::Root => Icon::None,
            Self::MachineRoot => Icon::MachineRoot,
            Self::StatesRoot => Icon::StatesRoot,
            Self::TransitionsRoot => Icon::TransitionsRoot,
            Self::State => Icon::State,
            Self::Initial => Icon::Initial,
            Self::Transition => Icon::Transition,
            Self::Action => Icon::Action,
            Self::Comment => Icon::Comment,
        }
    }

    /// Returns the capability flags for this category.
    ///
    /// States drag, drop, and edit; initial markers only drag; the states
    /// aggregation accepts drops; the machine root, actions, and comments
    /// edit; everything selects.
    pub fn capabilities(self) -> Capabilities {
        let selectable = Capabilities {
            selectable: true,
            ..Capabilities::default()
        };
        match self {
            Self::StatesRoot => Capabilities {
                droppable: true,
                ..selectable
            },
            Self::State => Capabilities {
                editable: true,
                draggable: true,
                droppable: true,
                ..selectable
            },
            Self::Initial => Capabilities {
                draggable: true,
                ..selectable
            },
            Self::MachineRoot | Self::Action | Self::Comment => Capabilities {
                editable: true,
                ..selectable
            },
            _ => selectable,
        }
    }

    /// True for the categories a structural move may relocate.
    pub fn is_movable(self) -> bool {
        matches!(self, Self::State | Self::Initial)
    }

    /// True for the categories that may own dropped items.
    pub fn is_drop_target(self) -> bool {
        matches!(self, Self::State | Self::StatesRoot)
    }

    /// True for the free-text categories whose text may be edited to empty.
    pub fn is_free_text(self) -> bool {
        matches!(self, Self::Action | Self::Comment)
    }
}

impl From<ItemCategory> for &'static str {
    fn from(val: ItemCategory) -> Self {
        match val {
            ItemCategory::Root => "root",
            ItemCategory::MachineRoot => "machine-root",
            ItemCategory::StatesRoot => "states-root",
            ItemCategory::TransitionsRoot => "transitions-root",
            ItemCategory::State => "state",
            ItemCategory::Initial => "initial",
            ItemCategory::Transition => "transition",
            ItemCategory::Action => "action",
            ItemCategory::Comment => "comment",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Payload of a tree item, one variant per category.
///
/// Transitions hold *non-owning* endpoint handles resolved through the
/// identifier index during conversion; ownership of every item belongs to
/// the tree alone.
#[derive(Debug, Clone)]
pub enum ItemData {
    Root,
    MachineRoot {
        name: String,
    },
    StatesRoot,
    TransitionsRoot,
    State {
        id: String,
        title: String,
        geometry: NodeGeometry,
    },
    Initial {
        id: String,
        position: Point,
    },
    Transition {
        id: String,
        action: String,
        geometry: EdgeGeometry,
        source: ItemId,
        target: ItemId,
    },
    Action {
        text: String,
    },
    Comment {
        id: String,
        body: String,
        geometry: NodeGeometry,
    },
}

impl ItemData {
    /// Returns the category tag of this payload.
    pub fn category(&self) -> ItemCategory {
        match self {
            Self::Root => ItemCategory::Root,
            Self::MachineRoot { .. } => ItemCategory::MachineRoot,
            Self::StatesRoot => ItemCategory::StatesRoot,
            Self::TransitionsRoot => ItemCategory::TransitionsRoot,
            Self::State { .. } => ItemCategory::State,
            Self::Initial { .. } => ItemCategory::Initial,
            Self::Transition { .. } => ItemCategory::Transition,
            Self::Action { .. } => ItemCategory::Action,
            Self::Comment { .. } => ItemCategory::Comment,
        }
    }

    /// Returns the display text of this item.
    pub fn label(&self) -> &str {
        match self {
            Self::Root => "",
            Self::MachineRoot { name } => name,
            Self::StatesRoot => STATES_LABEL,
            Self::TransitionsRoot => TRANSITIONS_LABEL,
            Self::State { title, .. } => title,
            Self::Initial { .. } => INITIAL_MARKER_LABEL,
            Self::Transition { action, .. } => action,
            Self::Action { text } => text,
            Self::Comment { body, .. } => body,
        }
    }

    /// Returns the committed identifier, for the categories that carry one.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::State { id, .. }
            | Self::Initial { id, .. }
            | Self::Transition { id, .. }
            | Self::Comment { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Returns the transition endpoint handles, for transitions.
    pub fn endpoints(&self) -> Option<(ItemId, ItemId)> {
        match self {
            Self::Transition { source, target, .. } => Some((*source, *target)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_an_icon() {
        let categories = [
            ItemCategory::Root,
            ItemCategory::MachineRoot,
            ItemCategory::StatesRoot,
            ItemCategory::TransitionsRoot,
            ItemCategory::State,
            ItemCategory::Initial,
            ItemCategory::Transition,
            ItemCategory::Action,
            ItemCategory::Comment,
        ];
        for category in categories {
            // Only the synthetic root maps to the empty icon.
            let expect_none = category == ItemCategory::Root;
            assert_eq!(category.icon() == Icon::None, expect_none);
        }
    }

    #[test]
    fn test_capability_table() {
        let state = ItemCategory::State.capabilities();
        assert!(state.selectable && state.editable && state.draggable && state.droppable);

        let initial = ItemCategory::Initial.capabilities();
        assert!(initial.draggable && !initial.droppable && !initial.editable);

        let states_root = ItemCategory::StatesRoot.capabilities();
        assert!(states_root.droppable && !states_root.draggable && !states_root.editable);

        for editable_only in [
            ItemCategory::MachineRoot,
            ItemCategory::Action,
            ItemCategory::Comment,
        ] {
            let caps = editable_only.capabilities();
            assert!(caps.editable && !caps.draggable && !caps.droppable);
        }

        for inert in [
            ItemCategory::Root,
            ItemCategory::TransitionsRoot,
            ItemCategory::Transition,
        ] {
            let caps = inert.capabilities();
            assert!(caps.selectable);
            assert!(!caps.editable && !caps.draggable && !caps.droppable);
        }
    }

    #[test]
    fn test_labels() {
        let state = ItemData::State {
            id: "s1".into(),
            title: "Off".into(),
            geometry: NodeGeometry::default(),
        };
        assert_eq!(state.label(), "Off");
        assert_eq!(state.identifier(), Some("s1"));

        let initial = ItemData::Initial {
            id: "i1".into(),
            position: Point::default(),
        };
        assert_eq!(initial.label(), INITIAL_MARKER_LABEL);

        assert_eq!(ItemData::StatesRoot.label(), STATES_LABEL);
        assert_eq!(ItemData::TransitionsRoot.label(), TRANSITIONS_LABEL);
        assert_eq!(ItemData::Root.identifier(), None);
    }
}
