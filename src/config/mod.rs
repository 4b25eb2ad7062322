//! Configuration model for trayrun.
//!
//! This module defines the shortcut descriptor set loaded from the user's
//! config file. JSON, YAML, and TOML sources are supported, chosen by file
//! extension. Unknown fields are ignored for forward compatibility.
//!
//! The execution engine consumes descriptors as plain values; nothing in
//! this module is global and nothing here is re-read after load.

mod model;
mod operations;


// Re-export public API
pub use model::{Shortcut, ShortcutSet};
pub use operations::ConfigFormat;
