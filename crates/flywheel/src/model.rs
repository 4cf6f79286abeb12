//! The tree adapter consumed by the presentation layer.
//!
//! [`TreeModel`] owns one generation of the item hierarchy plus its
//! identifier index and exposes the address-based contract a tree-view
//! widget queries: row/column navigation, role-keyed cell data, capability
//! flags, inline rename, structural moves, and the drag-and-drop entry
//! points. Registered [`ModelObserver`]s are notified synchronously, with
//! before/after pairs around anything that changes row counts.
//!
//! The model is strictly single-threaded and mutation callbacks are not
//! reentrant: a rename, move, drop, or load must complete before the next
//! one starts. The presentation layer holds only opaque [`Address`] values;
//! every address dies with the generation that minted it and must be
//! re-derived after a reset.

use std::{path::Path, rc::Rc};

use log::{debug, error, info};

use flywheel_core::identifier::IdRegistry;

use crate::{
    convert::{self, Conversion},
    document::DocumentSource,
    error::ModelError,
    item::{Capabilities, Icon, ItemCategory, ItemData},
    mime::{self, DragPayload},
    observer::ModelObserver,
    tree::{ItemId, ItemTree},
};

/// An opaque tree position: row and column among siblings plus the item
/// handle the position refers to.
///
/// Addresses are minted by the model and cached by the presentation layer.
/// They stay valid within one hierarchy generation (structural moves shift
/// *rows*, which observers are told about) and all become invalid together
/// on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    row: usize,
    column: usize,
    item: ItemId,
}

impl Address {
    /// Returns the row among siblings.
    pub fn row(self) -> usize {
        self.row
    }

    /// Returns the column. Always 0 in a single-column model.
    pub fn column(self) -> usize {
        self.column
    }

    /// Returns the item handle this address refers to.
    pub fn item(self) -> ItemId {
        self.item
    }
}

/// The cell content role a presentation query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Text shown in the tree.
    Display,
    /// Text shown on hover. Same content as `Display`.
    Tooltip,
    /// Text offered in the inline editor.
    Edit,
    /// The category icon handle.
    Icon,
}

/// A cell value returned by [`TreeModel::data`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Icon(Icon),
}

/// The state-machine item tree and its adapter contract.
///
/// # Examples
///
/// ```no_run
/// use flywheel::document::JsonDocumentSource;
/// use flywheel::model::TreeModel;
///
/// let mut model = TreeModel::new();
/// model
///     .load_document(&JsonDocumentSource, "machine.json".as_ref())
///     .expect("document should load");
///
/// let states = model.states_root_address();
/// for row in 0..model.row_count(Some(states)) {
///     let address = model.address(row, 0, Some(states)).expect("row is valid");
///     println!("{:?}", model.data(address, flywheel::model::Role::Display));
/// }
/// ```
pub struct TreeModel {
    tree: ItemTree,
    index: IdRegistry<ItemId>,
    format_version: String,
    observers: Vec<Rc<dyn ModelObserver>>,
}

impl Default for TreeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeModel {
    /// Creates a model holding the empty skeleton.
    pub fn new() -> Self {
        Self {
            tree: ItemTree::new(0),
            index: IdRegistry::new(),
            format_version: String::new(),
            observers: Vec::new(),
        }
    }

    /// Registers an observer for change notifications.
    pub fn add_observer(&mut self, observer: Rc<dyn ModelObserver>) {
        self.observers.push(observer);
    }

    fn notify(&self, f: impl Fn(&dyn ModelObserver)) {
        for observer in &self.observers {
            f(observer.as_ref());
        }
    }

    // ----- addressing -------------------------------------------------

    /// Address of the synthetic root: row 0, no parent.
    pub fn root_address(&self) -> Address {
        Address {
            row: 0,
            column: 0,
            item: self.tree.root(),
        }
    }

    /// Address of the machine root (row 0 under the synthetic root).
    pub fn machine_address(&self) -> Address {
        Address {
            row: 0,
            column: 0,
            item: self.tree.machine_root(),
        }
    }

    /// Address of the states aggregation (row 0 under the machine root).
    pub fn states_root_address(&self) -> Address {
        Address {
            row: 0,
            column: 0,
            item: self.tree.states_root(),
        }
    }

    /// Address of the transitions aggregation (row 1 under the machine root).
    pub fn transitions_root_address(&self) -> Address {
        Address {
            row: 1,
            column: 0,
            item: self.tree.transitions_root(),
        }
    }

    /// True if `(row, column)` addresses an existing position under `parent`.
    ///
    /// Only column 0 exists; with no parent the single valid row is 0 (the
    /// synthetic root).
    pub fn has_address(&self, row: usize, column: usize, parent: Option<Address>) -> bool {
        if column != 0 {
            return false;
        }
        match parent {
            None => row == 0,
            Some(parent) => row < self.tree.child_count(parent.item),
        }
    }

    /// Mints the address at `(row, column)` under `parent`.
    pub fn address(&self, row: usize, column: usize, parent: Option<Address>) -> Option<Address> {
        if !self.has_address(row, column, parent) {
            return None;
        }
        match parent {
            None => Some(self.root_address()),
            Some(parent) => {
                let item = self.tree.child_at(parent.item, row)?;
                Some(Address {
                    row,
                    column: 0,
                    item,
                })
            }
        }
    }

    /// Returns the parent address; `None` for the synthetic root and for
    /// stale addresses.
    pub fn parent(&self, address: Address) -> Option<Address> {
        let parent = self.tree.parent_of(address.item)?;
        self.address_of(parent)
    }

    /// Re-derives the address of an item handle.
    pub fn address_of(&self, item: ItemId) -> Option<Address> {
        let row = self.tree.row_of(item)?;
        Some(Address {
            row,
            column: 0,
            item,
        })
    }

    /// Number of child rows under `parent` (`None` counts under the
    /// synthetic root).
    pub fn row_count(&self, parent: Option<Address>) -> usize {
        match parent {
            None => self.tree.child_count(self.tree.root()),
            Some(parent) if parent.column != 0 => 0,
            Some(parent) => self.tree.child_count(parent.item),
        }
    }

    /// The model is single-column.
    pub fn column_count(&self) -> usize {
        1
    }

    /// True if any child rows exist under `parent`.
    pub fn has_children(&self, parent: Option<Address>) -> bool {
        self.row_count(parent) > 0
    }

    /// Resolves a committed identifier to its item handle.
    pub fn id_to_item(&self, id: &str) -> Option<ItemId> {
        self.index.get(id).copied()
    }

    /// Borrow the payload of the item at `address`, if it is live.
    pub fn item_data(&self, address: Address) -> Option<&ItemData> {
        Some(self.tree.get(address.item)?.data())
    }

    // ----- cell contract ----------------------------------------------

    /// Returns the cell content for `address` under `role`.
    ///
    /// Stale addresses, non-zero columns, and the synthetic root yield
    /// `None`. The three text roles all return the item label.
    pub fn data(&self, address: Address, role: Role) -> Option<CellValue> {
        if address.column != 0 || address.item == self.tree.root() {
            return None;
        }
        let item = self.tree.get(address.item)?;
        match role {
            Role::Display | Role::Tooltip | Role::Edit => {
                Some(CellValue::Text(item.data().label().to_string()))
            }
            Role::Icon => Some(CellValue::Icon(item.category().icon())),
        }
    }

    /// Returns the capability flags for `address`; none for stale addresses.
    pub fn flags(&self, address: Address) -> Capabilities {
        match self.tree.get(address.item) {
            Some(item) if address.column == 0 => item.category().capabilities(),
            _ => Capabilities::default(),
        }
    }

    /// The rename contract.
    ///
    /// Accepts only `Role::Edit` on column 0 of a machine root, state,
    /// action, or comment. Empty text is rejected except for the free-text
    /// categories (action and comment may be emptied). On success the item
    /// is mutated and a single-cell change notification fires.
    pub fn set_data(&mut self, address: Address, role: Role, value: &str) -> bool {
        if role != Role::Edit || address.column != 0 {
            return false;
        }
        let Some(item) = self.tree.get(address.item) else {
            return false;
        };
        let category = item.category();
        if !category.capabilities().editable {
            return false;
        }
        if value.is_empty() && !category.is_free_text() {
            return false;
        }
        let item = self
            .tree
            .get_mut(address.item)
            .expect("item was just resolved");
        match item.data_mut() {
            ItemData::MachineRoot { name } => *name = value.to_string(),
            ItemData::State { title, .. } => *title = value.to_string(),
            ItemData::Action { text } => *text = value.to_string(),
            ItemData::Comment { body, .. } => *body = value.to_string(),
            _ => return false,
        }
        debug!(category = category.to_string(); "Renamed item");
        self.notify(|observer| observer.cell_changed(address));
        true
    }

    /// Renames the machine root, ignoring empty names. Convenience wrapper
    /// over the rename contract for application code.
    pub fn rename_machine(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        let address = self.machine_address();
        let renamed = self.set_data(address, Role::Edit, name);
        debug_assert!(renamed, "machine root rename only fails on empty names");
    }

    /// Returns the machine's display name.
    pub fn machine_name(&self) -> &str {
        self.tree
            .get(self.tree.machine_root())
            .expect("skeleton machine root is always live")
            .data()
            .label()
    }

    /// Returns the loaded document's format version (empty before a load).
    pub fn format_version(&self) -> &str {
        &self.format_version
    }

    // ----- category predicates ----------------------------------------

    fn category_at(&self, address: Address) -> Option<ItemCategory> {
        self.tree.get(address.item).map(|item| item.category())
    }

    /// True for the root, machine root, and aggregation addresses, and for
    /// stale addresses. Trivial addresses carry no document content.
    pub fn is_trivial(&self, address: Address) -> bool {
        match self.category_at(address) {
            None => true,
            Some(
                ItemCategory::Root
                | ItemCategory::MachineRoot
                | ItemCategory::StatesRoot
                | ItemCategory::TransitionsRoot,
            ) => true,
            Some(_) => false,
        }
    }

    /// True if `address` refers to a state item.
    pub fn is_state(&self, address: Address) -> bool {
        self.category_at(address) == Some(ItemCategory::State)
    }

    /// True if `address` refers to an initial-state marker.
    pub fn is_initial(&self, address: Address) -> bool {
        self.category_at(address) == Some(ItemCategory::Initial)
    }

    /// True if `address` refers to a transition item.
    pub fn is_transition(&self, address: Address) -> bool {
        self.category_at(address) == Some(ItemCategory::Transition)
    }

    /// True if `address` refers to an action item.
    pub fn is_action(&self, address: Address) -> bool {
        self.category_at(address) == Some(ItemCategory::Action)
    }

    // ----- lifecycle ---------------------------------------------------

    /// Tears down the hierarchy and index and rebuilds the empty skeleton
    /// under a fresh generation, bracketed by the reset notification pair.
    /// Every previously minted address and handle is invalid afterwards.
    pub fn reset(&mut self) {
        self.notify(|observer| observer.reset_about_to_happen());
        self.rebuild_empty();
        self.notify(|observer| observer.reset_finished());
    }

    fn rebuild_empty(&mut self) {
        let next = self.tree.generation().wrapping_add(1);
        self.tree = ItemTree::new(next);
        self.index.clear();
        self.format_version.clear();
    }

    /// Loads a document through the parser seam, replacing the whole
    /// hierarchy.
    ///
    /// Always starts with a full teardown; read, conversion, and install all
    /// happen inside one reset bracket, so observers see either the complete
    /// new hierarchy or the empty skeleton, never an intermediate state.
    ///
    /// # Errors
    ///
    /// Read, parse, and endpoint-resolution failures are logged and
    /// returned; every failure leaves the empty skeleton, and re-invoking
    /// after fixing the source file is the supported retry path.
    pub fn load_document<S: DocumentSource>(
        &mut self,
        source: &S,
        path: &Path,
    ) -> Result<(), ModelError> {
        info!(path = path.display().to_string(); "Loading state-machine document");

        self.notify(|observer| observer.reset_about_to_happen());
        self.rebuild_empty();

        let generation = self.tree.generation();
        let result = match source
            .read(path)
            .and_then(|document| convert::convert(&document, generation))
        {
            Ok(Conversion {
                tree,
                index,
                format_version,
            }) => {
                self.tree = tree;
                self.index = index;
                self.format_version = format_version;
                info!(
                    machine = self.machine_name().to_string(),
                    items = self.tree.len();
                    "Document loaded"
                );
                Ok(())
            }
            Err(err) => {
                error!(err:?; "Cannot load state-machine document, model left empty");
                Err(err)
            }
        };

        self.notify(|observer| observer.reset_finished());
        result
    }

    // ----- structural mutation ----------------------------------------

    /// Moves `item` under `new_parent`, or to the top-level states
    /// collection when `new_parent` is `None`.
    ///
    /// The detach and the append are each bracketed by their row-range
    /// notification pair so observers can re-synchronize cached addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidMove`], with no structural change,
    /// when the item is not movable (only states and initial markers are),
    /// when a non-state is moved to the top level, when the target is not a
    /// legal container (a state or the states aggregation), when the target
    /// already owns the item, or when the target lies inside the moved
    /// subtree.
    pub fn move_item(
        &mut self,
        item: ItemId,
        new_parent: Option<ItemId>,
    ) -> Result<(), ModelError> {
        let Some(moving) = self.tree.get(item) else {
            return Err(ModelError::InvalidMove("unknown item"));
        };
        let category = moving.category();
        if !category.is_movable() {
            return Err(ModelError::InvalidMove(
                "only states and initial markers can be moved",
            ));
        }
        if new_parent.is_none() && category != ItemCategory::State {
            return Err(ModelError::InvalidMove(
                "only states can be re-parented to the top level",
            ));
        }

        let target = new_parent.unwrap_or_else(|| self.tree.states_root());
        let Some(target_item) = self.tree.get(target) else {
            return Err(ModelError::InvalidMove("unknown target"));
        };
        if !target_item.category().is_drop_target() {
            return Err(ModelError::InvalidMove("target cannot own states"));
        }

        let owner = self
            .tree
            .parent_of(item)
            .expect("movable items always have an owner");
        if owner == target {
            return Err(ModelError::InvalidMove("target already owns the item"));
        }
        if self.tree.is_ancestor_or_self(item, target) {
            return Err(ModelError::InvalidMove(
                "target lies inside the moved subtree",
            ));
        }

        let source_address = self
            .address_of(owner)
            .expect("owner of a live item is live");
        let removed_row = self.tree.row_of(item).expect("owned items have a row");

        self.notify(|observer| {
            observer.rows_about_to_be_removed(source_address, removed_row, removed_row)
        });
        self.tree.detach(item);
        self.notify(|observer| observer.rows_removed(source_address, removed_row, removed_row));

        // Row positions may have shifted by the detach; derive the target
        // address only now.
        let target_address = self.address_of(target).expect("target is live");
        let inserted_row = self.tree.child_count(target);

        self.notify(|observer| {
            observer.rows_about_to_be_inserted(target_address, inserted_row, inserted_row)
        });
        self.tree.append_existing(target, item);
        self.notify(|observer| observer.rows_inserted(target_address, inserted_row, inserted_row));

        debug!(
            category = category.to_string(),
            row = inserted_row;
            "Moved item"
        );
        Ok(())
    }

    // ----- drag and drop ----------------------------------------------

    /// Serializes a selection into a drag payload.
    ///
    /// Filters the selection to draggable categories (states and initial
    /// markers) on column 0 and encodes their identifiers in selection
    /// order.
    pub fn drag_payload(&self, selection: &[Address]) -> DragPayload {
        let mut ids = Vec::new();
        for address in selection {
            if address.column != 0 {
                continue;
            }
            let Some(item) = self.tree.get(address.item) else {
                continue;
            };
            if !item.category().capabilities().draggable {
                continue;
            }
            if let Some(id) = item.data().identifier() {
                ids.push(id.to_string());
            }
        }
        mime::encode_state_list(&ids)
    }

    /// Applies a dropped payload onto `target`.
    ///
    /// Entries are resolved through the identifier index and moved one by
    /// one, **best-effort**: a later rejection does not roll back earlier
    /// moves. Whether multi-item drops should instead be all-or-nothing is
    /// an open product question; the per-entry behavior is the one the
    /// tests pin down.
    ///
    /// # Errors
    ///
    /// Rejects foreign or malformed payloads, targets that are neither the
    /// states aggregation nor a state, unknown identifiers, and entries the
    /// target already owns.
    pub fn drop_payload(
        &mut self,
        payload: &DragPayload,
        target: Address,
    ) -> Result<(), ModelError> {
        let Some(target_item) = self.tree.get(target.item) else {
            return Err(ModelError::InvalidMove("unknown drop target"));
        };
        if !target_item.category().is_drop_target() {
            return Err(ModelError::InvalidMove(
                "drop target must be a state or the states container",
            ));
        }

        let ids = mime::decode_state_list(payload)?;
        for id in &ids {
            let item = self
                .id_to_item(id)
                .ok_or(ModelError::InvalidMove(
                    "payload references an unknown identifier",
                ))?;
            if self.tree.parent_of(item) == Some(target.item) {
                return Err(ModelError::InvalidMove("target already owns a dropped item"));
            }
            self.move_item(item, Some(target.item))?;
        }
        Ok(())
    }

    // ----- inspection --------------------------------------------------

    /// Borrow the live item tree.
    pub fn tree(&self) -> &ItemTree {
        &self.tree
    }

    /// Borrow the identifier index.
    pub fn index(&self) -> &IdRegistry<ItemId> {
        &self.index
    }

    /// Renders the hierarchy as an indented outline, one line per item,
    /// starting at the machine root. With `show_ids` the committed
    /// identifier is appended where one exists.
    pub fn outline(&self, show_ids: bool) -> String {
        let mut out = String::new();
        self.outline_item(self.tree.machine_root(), 0, show_ids, &mut out);
        out
    }

    fn outline_item(&self, id: ItemId, depth: usize, show_ids: bool, out: &mut String) {
        let Some(item) = self.tree.get(id) else {
            return;
        };
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(item.data().label());
        let category: &'static str = item.category().into();
        out.push_str(" [");
        out.push_str(category);
        out.push(']');
        if show_ids {
            if let Some(identifier) = item.data().identifier() {
                out.push(' ');
                out.push_str(identifier);
            }
        }
        out.push('\n');
        for child in item.children() {
            self.outline_item(*child, depth + 1, show_ids, out);
        }
    }
}
