//! Built-in filter implementations.
//!
//! Thin adapters that expose `image` and `imageproc` operations through the
//! dispatcher. Each one reads its input path, transforms, and writes its
//! output path.

mod io;
mod blur;
mod color;
mod transform;

use crate::core::error::RegistryResult;
use crate::filters::registry::FilterRegistry;

/// Register all built-in filters, in listing order.
pub fn register_all(registry: &mut FilterRegistry) -> RegistryResult<()> {
    transform::register(registry)?;
    color::register(registry)?;
    blur::register(registry)?;
    Ok(())
}

// Re-export for direct access
pub use blur::Blur;
pub use color::{Gray, Invert};
pub use transform::{Crop, Flip, Rotate, Scale};
