//! Per-user channel and topic selection.

mod inmemory;
mod store;

pub use inmemory::InMemoryPreferenceStore;
pub use store::{Preference, PreferenceStore};
