//! Shared application state.

use dukaan_store::Store;

/// State handed to every handler. The store handle is cheap to clone and
/// all clones share the per-collection locks.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}
