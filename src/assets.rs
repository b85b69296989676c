//! Asset loading for the color and depth images.
//!
//! Both rasters are decoded up front and joined before any mesh is built; a
//! failed load surfaces as an error instead of a partially-initialized scene.

use crate::{
    depth::invert_depth,
    error::{Error, Result},
};
use image::RgbaImage;
use log::info;
use std::path::Path;

/// Decoded color and depth rasters for one photograph
pub struct ImagePair {
    /// RGB color image draped over the mesh
    pub color: RgbaImage,
    /// Depth map, polarity-corrected at load time
    pub depth: RgbaImage,
}

impl ImagePair {
    /// Load and decode both images, normalizing the depth raster
    pub fn load<P: AsRef<Path>>(color_path: P, depth_path: P) -> Result<Self> {
        let color = load_rgba(color_path.as_ref())?;
        let depth = load_rgba(depth_path.as_ref())?;

        info!(
            "Loaded image pair: color {}x{}, depth {}x{}",
            color.width(),
            color.height(),
            depth.width(),
            depth.height()
        );

        Self::from_rasters(color, depth)
    }

    /// Join already-decoded rasters, applying the depth normalization
    pub fn from_rasters(color: RgbaImage, mut depth: RgbaImage) -> Result<Self> {
        if color.width() == 0 || color.height() == 0 {
            return Err(Error::Asset("color image has zero dimensions".to_string()));
        }
        if depth.width() == 0 || depth.height() == 0 {
            return Err(Error::Asset("depth image has zero dimensions".to_string()));
        }

        invert_depth(&mut depth);

        Ok(Self { color, depth })
    }

    /// Width over height of the color image
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.color.width()) / f64::from(self.color.height())
    }
}

fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|e| Error::Asset(format!("Failed to load {}: {e}", path.display())))?;
    Ok(image.to_rgba8())
}
