//! Client-side key/value persistence.
//!
//! The frontend keeps a handful of small string values (the serialized session
//! among them) across restarts. [`KeyValueStore`] is the seam; the backend is
//! picked per platform:
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`MemoryStorage`] | Tests, and any target without persistent storage |
//! | [`FileStorage`] | Desktop and mobile (one file per key) |
//! | [`LocalStorage`] | Browser, `wasm32` with the `web` feature |

mod kv;
pub use kv::{KeyValueStore, StorageError};

mod memory;
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;
