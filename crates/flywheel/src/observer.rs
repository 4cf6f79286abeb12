//! Change notifications for the presentation layer.
//!
//! Mutating model operations call back into registered observers
//! *synchronously*, with before/after pairs bracketing anything that changes
//! row counts, so a displaying layer can drop cached addresses exactly when
//! they go stale. The model is single-threaded; observers must not reenter
//! the model from a callback.

use crate::model::Address;

/// Observer of model mutations.
///
/// All methods default to no-ops so observers implement only what they need.
///
/// The four notification kinds:
///
/// - whole-tree reset ([`reset_about_to_happen`](Self::reset_about_to_happen)
///   / [`reset_finished`](Self::reset_finished)) bracketing teardown plus
///   rebuild; every previously issued address is invalid afterwards
/// - single-cell change ([`cell_changed`](Self::cell_changed)) after a rename
/// - row-range insertion and removal pairs bracketing structural moves; the
///   range is contiguous and inclusive under the given parent address
pub trait ModelObserver {
    fn reset_about_to_happen(&self) {}
    fn reset_finished(&self) {}

    fn cell_changed(&self, _address: Address) {}

    fn rows_about_to_be_inserted(&self, _parent: Address, _first: usize, _last: usize) {}
    fn rows_inserted(&self, _parent: Address, _first: usize, _last: usize) {}

    fn rows_about_to_be_removed(&self, _parent: Address, _first: usize, _last: usize) {}
    fn rows_removed(&self, _parent: Address, _first: usize, _last: usize) {}
}
