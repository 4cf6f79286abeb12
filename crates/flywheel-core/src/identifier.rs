//! Identifier registry with collision resolution and fresh-id generation.
//!
//! Every item in a state-machine document carries a string identifier, and
//! transitions reference their endpoints by identifier rather than by tree
//! position. [`IdRegistry`] is the single index that makes those references
//! resolvable: it maps committed identifiers to values while guaranteeing
//! uniqueness at all times.
//!
//! Uniqueness is enforced at insertion: a colliding identifier is suffixed
//! with `_` until it no longer collides, and the committed form is returned
//! to the caller. Items the source document leaves unidentified (comments,
//! typically) get a generated `id-<n>` identifier instead.

use indexmap::IndexMap;
use log::debug;
use rand::RngExt;

/// Maximum numeric suffix for generated identifiers (`id-0` .. `id-9999`).
const GENERATED_ID_SPAN: u32 = 10_000;

/// An identifier-to-value map with collision resolution on insertion.
///
/// Lookup is O(1); iteration preserves insertion order, which follows the
/// document order of the conversion that populated the registry.
///
/// The registry is scoped to one hierarchy generation: it is populated during
/// document conversion and cleared wholesale on model reset. Structural moves
/// keep identifiers stable, so no per-entry removal is provided.
///
/// # Examples
///
/// ```
/// # use flywheel_core::identifier::IdRegistry;
/// let mut registry = IdRegistry::new();
/// assert_eq!(registry.insert("s1", 7), "s1");
/// // A second "s1" is committed under a suffixed variant.
/// assert_eq!(registry.insert("s1", 8), "s1_");
/// assert_eq!(registry.get("s1"), Some(&7));
/// assert_eq!(registry.get("s1_"), Some(&8));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdRegistry<T> {
    entries: IndexMap<String, T>,
}

impl<T> IdRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Inserts `value` under `id`, resolving collisions deterministically.
    ///
    /// If `id` is already present, a `_` is appended until the identifier is
    /// unique. The committed identifier is returned; callers that need to
    /// reference the value later must keep the committed form, not the
    /// requested one. Insertion always succeeds.
    pub fn insert(&mut self, id: impl Into<String>, value: T) -> String {
        let requested = id.into();
        let mut committed = requested.clone();
        while self.entries.contains_key(&committed) {
            committed.push('_');
        }
        if committed != requested {
            debug!(requested, committed; "Resolved identifier collision");
        }
        self.entries.insert(committed.clone(), value);
        committed
    }

    /// Looks up the value committed under `id`.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    /// Returns true if `id` is committed in the registry.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Produces a fresh identifier not present in the registry.
    ///
    /// The candidate has the form `id-<n>` with a random `n` below 10000 and
    /// is regenerated while it collides. The identifier is *not* inserted;
    /// callers insert under the returned id themselves.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        loop {
            let n = rng.random_range(0..GENERATED_ID_SPAN);
            let candidate = format!("id-{n}");
            if !self.entries.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Returns the number of committed identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the registry holds no identifiers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry. Called in lockstep with hierarchy teardown.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over `(committed identifier, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }
}
