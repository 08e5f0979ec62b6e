use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::store::state::PlayerStore;

// One store per process: the host runtime loads the plugin once and every
// command and view callback needs to reach the same state graph.
static GLOBAL_STORE: OnceCell<Arc<PlayerStore>> = OnceCell::new();

/// Install the process-wide store, creating it on first call.
///
/// Later calls hand back the store that is already installed.
pub fn init_store() -> Arc<PlayerStore> {
    GLOBAL_STORE
        .get_or_init(|| Arc::new(PlayerStore::new()))
        .clone()
}

/// The global store, if the plugin has initialized it.
pub fn try_store() -> Option<Arc<PlayerStore>> {
    GLOBAL_STORE.get().cloned()
}

/// The global store.
///
/// # Panics
///
/// Panics when called before [`init_store`]. Host callbacks that cannot
/// carry a handle must only fire after plugin load.
pub fn store() -> Arc<PlayerStore> {
    try_store().expect("plugin store not initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    // All bridge behavior lives in one test: the static is process-wide and
    // separate tests would race on who initializes it.
    #[test]
    fn global_store_is_installed_once() {
        let first = init_store();
        let second = init_store();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(try_store().is_some());
        assert!(Arc::ptr_eq(&store(), &first));
    }
}
