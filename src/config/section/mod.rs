//! Manifest section definitions.
//!
//! | Module     | Manifest key | Purpose                           |
//! |------------|--------------|-----------------------------------|
//! | `metadata` | `[metadata]` | Site display text (title, author) |
//! | `plugin`   | `plugins`    | Ordered plugin chain              |

mod metadata;
mod plugin;

pub use metadata::MetadataConfig;
pub use plugin::PluginSpec;
