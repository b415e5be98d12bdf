//! Session command handlers.

use std::path::Path;

use anyhow::{Context, Result};
use gatehouse_core::session::{FileStore, KeyValueStore, SESSION_KEY, ViewController};

/// Prints what the next start would show, plus the raw stored value.
pub fn show(path: &Path) {
    let store = FileStore::new(path);
    let raw = store.get(SESSION_KEY);
    let controller = ViewController::initialize(store);

    if controller.is_authenticated() {
        println!("logged in");
    } else {
        println!("logged out");
    }
    match raw {
        Ok(Some(value)) => println!("{SESSION_KEY} = {value:?}"),
        Ok(None) => println!("{SESSION_KEY} is not set"),
        Err(e) => println!("{SESSION_KEY} could not be read: {e:#}"),
    }
    println!("Store: {}", path.display());
}

/// Removes the persisted flag so the next start shows the login form.
pub fn clear(path: &Path) -> Result<()> {
    let mut store = FileStore::new(path);
    store
        .remove(SESSION_KEY)
        .with_context(|| format!("clear session at {}", path.display()))?;
    tracing::info!(store = %path.display(), "session flag cleared");
    println!("Session cleared");
    Ok(())
}
