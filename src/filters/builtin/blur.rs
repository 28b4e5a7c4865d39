//! Blur filters: Gaussian blur

use crate::core::error::{FilterResult, RegistryResult};
use crate::core::filter::{Filter, FilterMetadata};
use crate::core::invocation::ParsedOptions;
use crate::core::option::OptionSpec;
use crate::core::types::ValueType;
use crate::filters::builtin::io::{load_input, save_output, ARGUMENTS};
use crate::filters::registry::FilterRegistry;

/// Register blur filters.
pub fn register(registry: &mut FilterRegistry) -> RegistryResult<()> {
    registry.register(|| Box::new(Blur))
}

/// Applies Gaussian blur to an image.
#[derive(Debug, Clone)]
pub struct Blur;

impl Filter for Blur {
    fn metadata(&self) -> FilterMetadata {
        FilterMetadata::builder("Blur")
            .doc("Smooths the input image with a Gaussian kernel of the given standard deviation.")
            .arguments(ARGUMENTS)
            .option(
                OptionSpec::new("sigma", ValueType::Float)
                    .with_short('s')
                    .with_default(1.0)
                    .with_range(0.1, 100.0)
                    .with_help("Blur intensity (standard deviation)"),
            )
            .build()
    }

    fn run(&self, options: &ParsedOptions, arguments: &[String]) -> FilterResult<()> {
        let sigma = options.get_float("sigma")? as f32;
        let image = load_input("Blur", arguments)?;

        let rgba = image.to_rgba8();
        let blurred = imageproc::filter::gaussian_blur_f32(&rgba, sigma);

        save_output("Blur", arguments, &image::DynamicImage::ImageRgba8(blurred))
    }
}
