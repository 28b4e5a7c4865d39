//! Transform filters: Crop, Flip, Rotate, Scale

use crate::core::error::{FilterError, FilterResult, RegistryResult};
use crate::core::filter::{Filter, FilterMetadata};
use crate::core::invocation::ParsedOptions;
use crate::core::option::{Constraint, OptionSpec};
use crate::core::types::ValueType;
use crate::filters::builtin::io::{load_input, save_output, ARGUMENTS};
use crate::filters::registry::FilterRegistry;
use image::imageops::FilterType;

/// Register transform filters.
pub fn register(registry: &mut FilterRegistry) -> RegistryResult<()> {
    registry.register(|| Box::new(Crop))?;
    registry.register(|| Box::new(Flip))?;
    registry.register(|| Box::new(Rotate))?;
    registry.register(|| Box::new(Scale))?;
    Ok(())
}

/// Crops a region from an image.
#[derive(Debug, Clone)]
pub struct Crop;

impl Filter for Crop {
    fn metadata(&self) -> FilterMetadata {
        FilterMetadata::builder("Crop")
            .doc(
                "Crops a rectangular region out of the input image. The region starts \
                 at the given offset and is clamped to the image bounds.",
            )
            .arguments(ARGUMENTS)
            .option(
                OptionSpec::new("x", ValueType::Integer)
                    .with_short('x')
                    .with_default(0_i64)
                    .with_constraint(Constraint::NonNegative)
                    .with_help("Left edge of the region"),
            )
            .option(
                OptionSpec::new("y", ValueType::Integer)
                    .with_short('y')
                    .with_default(0_i64)
                    .with_constraint(Constraint::NonNegative)
                    .with_help("Top edge of the region"),
            )
            .option(
                OptionSpec::new("width", ValueType::Integer)
                    .required()
                    .with_constraint(Constraint::Positive)
                    .with_help("Width of the region"),
            )
            .option(
                OptionSpec::new("height", ValueType::Integer)
                    .required()
                    .with_constraint(Constraint::Positive)
                    .with_help("Height of the region"),
            )
            .build()
    }

    fn run(&self, options: &ParsedOptions, arguments: &[String]) -> FilterResult<()> {
        let x = pixels("Crop", options, "x")?;
        let y = pixels("Crop", options, "y")?;
        let width = pixels("Crop", options, "width")?;
        let height = pixels("Crop", options, "height")?;

        let image = load_input("Crop", arguments)?;
        let (src_width, src_height) = (image.width(), image.height());

        if x >= src_width || y >= src_height {
            return Err(FilterError::Execution {
                filter: "Crop".to_string(),
                error: format!(
                    "Crop origin ({}, {}) is outside image bounds ({}x{})",
                    x, y, src_width, src_height
                ),
            });
        }

        // Clamp crop dimensions to image bounds
        let crop_width = width.min(src_width - x);
        let crop_height = height.min(src_height - y);

        let cropped = image.crop_imm(x, y, crop_width, crop_height);
        save_output("Crop", arguments, &cropped)
    }
}

/// Mirrors an image.
#[derive(Debug, Clone)]
pub struct Flip;

impl Filter for Flip {
    fn metadata(&self) -> FilterMetadata {
        FilterMetadata::builder("Flip")
            .doc("Mirrors the input image left to right, or top to bottom with --vertical.")
            .arguments(ARGUMENTS)
            .option(
                OptionSpec::flag("vertical")
                    .with_short('v')
                    .with_help("Flip around the horizontal axis instead"),
            )
            .build()
    }

    fn run(&self, options: &ParsedOptions, arguments: &[String]) -> FilterResult<()> {
        let vertical = options.get_bool("vertical")?;
        let image = load_input("Flip", arguments)?;

        let flipped = if vertical { image.flipv() } else { image.fliph() };
        save_output("Flip", arguments, &flipped)
    }
}

/// Rotates an image by a multiple of 90 degrees.
#[derive(Debug, Clone)]
pub struct Rotate;

impl Filter for Rotate {
    fn metadata(&self) -> FilterMetadata {
        FilterMetadata::builder("Rotate")
            .doc("Rotates the input image clockwise by 90, 180 or 270 degrees.")
            .arguments(ARGUMENTS)
            .option(
                OptionSpec::new(
                    "angle",
                    ValueType::Choice(vec![
                        "90".to_string(),
                        "180".to_string(),
                        "270".to_string(),
                    ]),
                )
                .with_short('a')
                .with_default("90")
                .with_help("Rotation angle in degrees"),
            )
            .build()
    }

    fn run(&self, options: &ParsedOptions, arguments: &[String]) -> FilterResult<()> {
        let angle = options.get_string("angle")?;
        let image = load_input("Rotate", arguments)?;

        let rotated = match angle {
            "90" => image.rotate90(),
            "180" => image.rotate180(),
            "270" => image.rotate270(),
            other => {
                return Err(FilterError::InvalidArgument {
                    filter: "Rotate".to_string(),
                    reason: format!("unsupported angle {}", other),
                })
            }
        };
        save_output("Rotate", arguments, &rotated)
    }
}

/// Resizes an image.
#[derive(Debug, Clone)]
pub struct Scale;

impl Filter for Scale {
    fn metadata(&self) -> FilterMetadata {
        FilterMetadata::builder("Scale")
            .doc(
                "Rescales the input image. Give both --width and --height for an exact \
                 size, or only one of them to keep the aspect ratio.",
            )
            .arguments(ARGUMENTS)
            .option(
                OptionSpec::new("width", ValueType::Integer)
                    .with_range(1.0, 16384.0)
                    .with_help("Target width in pixels"),
            )
            .option(
                OptionSpec::new("height", ValueType::Integer)
                    .with_range(1.0, 16384.0)
                    .with_help("Target height in pixels"),
            )
            .option(
                OptionSpec::new(
                    "filter",
                    ValueType::Choice(vec![
                        "nearest".to_string(),
                        "triangle".to_string(),
                        "catmullrom".to_string(),
                        "gaussian".to_string(),
                        "lanczos3".to_string(),
                    ]),
                )
                .with_short('f')
                .with_default("lanczos3")
                .with_help("Resampling filter"),
            )
            .build()
    }

    fn run(&self, options: &ParsedOptions, arguments: &[String]) -> FilterResult<()> {
        let width = options.get_integer_opt("width")?;
        let height = options.get_integer_opt("height")?;
        let filter = match options.get_string("filter")? {
            "nearest" => FilterType::Nearest,
            "triangle" => FilterType::Triangle,
            "catmullrom" => FilterType::CatmullRom,
            "gaussian" => FilterType::Gaussian,
            _ => FilterType::Lanczos3,
        };

        let image = load_input("Scale", arguments)?;
        let (src_width, src_height) = (image.width() as f64, image.height() as f64);

        let (target_width, target_height) = match (width, height) {
            (Some(w), Some(h)) => (w as u32, h as u32),
            (Some(w), None) => (w as u32, scaled(src_height, w as f64 / src_width)),
            (None, Some(h)) => (scaled(src_width, h as f64 / src_height), h as u32),
            (None, None) => {
                return Err(FilterError::InvalidArgument {
                    filter: "Scale".to_string(),
                    reason: "at least one of --width and --height is required".to_string(),
                })
            }
        };

        let resized = image.resize_exact(target_width, target_height, filter);
        save_output("Scale", arguments, &resized)
    }
}

/// Read an integer option as a pixel count.
fn pixels(filter: &str, options: &ParsedOptions, dest: &str) -> FilterResult<u32> {
    let value = options.get_integer(dest)?;
    u32::try_from(value).map_err(|_| FilterError::InvalidArgument {
        filter: filter.to_string(),
        reason: format!("--{} {} is not a valid pixel count", dest, value),
    })
}

fn scaled(length: f64, ratio: f64) -> u32 {
    ((length * ratio).round() as u32).max(1)
}
