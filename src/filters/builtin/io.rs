//! Image I/O shared by the built-in filters.
//!
//! Every built-in filter reads `input` and writes `output`, both taken from
//! its positional arguments.

use crate::core::error::{FilterError, FilterResult};
use image::DynamicImage;
use std::path::Path;

/// Positional arguments of every built-in filter.
pub const ARGUMENTS: [&str; 2] = ["input", "output"];

/// Load the image named by the first positional argument.
pub fn load_input(filter: &str, arguments: &[String]) -> FilterResult<DynamicImage> {
    let path = argument(filter, arguments, 0)?;
    let image = image::open(path).map_err(|e| FilterError::Execution {
        filter: filter.to_string(),
        error: format!("Failed to load image '{}': {}", path, e),
    })?;
    log::info!(
        "{}: loaded {} ({}x{})",
        filter,
        path,
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Save an image to the path named by the second positional argument.
///
/// The format is inferred from the file extension.
pub fn save_output(filter: &str, arguments: &[String], image: &DynamicImage) -> FilterResult<()> {
    let path = argument(filter, arguments, 1)?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(FilterError::InvalidArgument {
                filter: filter.to_string(),
                reason: format!("output directory '{}' does not exist", parent.display()),
            });
        }
    }

    image.save(path).map_err(|e| FilterError::Execution {
        filter: filter.to_string(),
        error: format!("Failed to save image '{}': {}", path, e),
    })?;
    log::info!(
        "{}: saved {} ({}x{})",
        filter,
        path,
        image.width(),
        image.height()
    );
    Ok(())
}

fn argument<'a>(filter: &str, arguments: &'a [String], index: usize) -> FilterResult<&'a str> {
    arguments
        .get(index)
        .map(|s| s.as_str())
        .ok_or_else(|| FilterError::InvalidArgument {
            filter: filter.to_string(),
            reason: format!("missing positional argument '{}'", ARGUMENTS[index]),
        })
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::path::Path;

    /// Write a small gradient PNG and return its path as a string.
    pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> String {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 40) as u8, (y * 40) as u8, 128, 255])
        });
        let path = dir.join(name);
        DynamicImage::ImageRgba8(image).save(&path).unwrap();
        path.to_string_lossy().into_owned()
    }

    pub fn output_path(dir: &Path, name: &str) -> String {
        dir.join(name).to_string_lossy().into_owned()
    }
}
