//! Color filters: Gray, Invert

use crate::core::error::{FilterResult, RegistryResult};
use crate::core::filter::{Filter, FilterMetadata};
use crate::core::invocation::ParsedOptions;
use crate::filters::builtin::io::{load_input, save_output, ARGUMENTS};
use crate::filters::registry::FilterRegistry;

/// Register color filters.
pub fn register(registry: &mut FilterRegistry) -> RegistryResult<()> {
    registry.register(|| Box::new(Gray))?;
    registry.register(|| Box::new(Invert))?;
    Ok(())
}

/// Converts an image to grayscale.
#[derive(Debug, Clone)]
pub struct Gray;

impl Filter for Gray {
    fn metadata(&self) -> FilterMetadata {
        FilterMetadata::builder("Gray")
            .doc("Converts the input image to grayscale using luminance weights.")
            .arguments(ARGUMENTS)
            .build()
    }

    fn run(&self, _options: &ParsedOptions, arguments: &[String]) -> FilterResult<()> {
        let image = load_input("Gray", arguments)?;
        save_output("Gray", arguments, &image.grayscale())
    }
}

/// Inverts the colors of an image.
#[derive(Debug, Clone)]
pub struct Invert;

impl Filter for Invert {
    fn metadata(&self) -> FilterMetadata {
        FilterMetadata::builder("Invert")
            .doc("Inverts every color channel of the input image, leaving alpha untouched.")
            .arguments(ARGUMENTS)
            .build()
    }

    fn run(&self, _options: &ParsedOptions, arguments: &[String]) -> FilterResult<()> {
        let mut image = load_input("Invert", arguments)?;
        image.invert();
        save_output("Invert", arguments, &image)
    }
}
