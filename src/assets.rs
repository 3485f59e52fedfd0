//! Asset identities and intrinsic-size lookup
//!
//! The simulation never touches pixels. It only needs each image's aspect
//! ratio, and must keep working while an image is still loading (or never
//! loads at all).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::PLANET_COUNT;

/// Opaque handle to a visual asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    /// Player sprite
    Rocket,
    /// Obstacle sprite, numbered 1..=PLANET_COUNT
    Planet(u8),
}

impl AssetId {
    /// File name the host loads this asset from
    pub fn file_name(&self) -> String {
        match self {
            AssetId::Rocket => "roket.jpg".to_string(),
            AssetId::Planet(n) => format!("planet{}.jpg", n),
        }
    }

    /// Every obstacle visual, in pool order
    pub fn planets() -> impl Iterator<Item = AssetId> {
        (1..=PLANET_COUNT).map(AssetId::Planet)
    }
}

/// Source of intrinsic aspect ratios (width / height)
///
/// Returns `None` while an asset is unavailable.
pub trait AssetCatalog {
    fn aspect_ratio(&self, id: AssetId) -> Option<f32>;
}

/// Aspect ratio to use for sizing, falling back to a square
pub fn aspect_or_square(catalog: &dyn AssetCatalog, id: AssetId) -> f32 {
    match catalog.aspect_ratio(id) {
        Some(aspect) if aspect.is_finite() && aspect > 0.0 => aspect,
        _ => 1.0,
    }
}

/// Catalog of assets whose natural size is known once loaded
#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    sizes: HashMap<AssetId, (u32, u32)>,
}

impl AssetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an asset's natural pixel size (host calls this on load)
    pub fn mark_loaded(&mut self, id: AssetId, width: u32, height: u32) {
        log::debug!("Asset {} loaded ({}x{})", id.file_name(), width, height);
        self.sizes.insert(id, (width, height));
    }
}

impl AssetCatalog for AssetTable {
    fn aspect_ratio(&self, id: AssetId) -> Option<f32> {
        let &(w, h) = self.sizes.get(&id)?;
        // A zero natural size means the image decoded to nothing
        if w == 0 || h == 0 {
            return None;
        }
        Some(w as f32 / h as f32)
    }
}

/// Catalog where nothing ever loads
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetCatalog for NoAssets {
    fn aspect_ratio(&self, _id: AssetId) -> Option<f32> {
        None
    }
}
