//! Ordered layer stack for the display surface
//!
//! The stack owns the paths of the files it references. The display keeps it
//! for as long as the composite is on screen.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::AssetKind;
use crate::constants::display;

/// One drawable image, anchored at the canvas origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub kind: AssetKind,
    pub path: PathBuf,
}

/// Five layers, bottom to top
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    /// Build the stack from fetched assets
    ///
    /// Layers are placed in display order whatever order the input is in.
    /// Assets that are not drawn are dropped. Returns `None` if any displayed
    /// kind is missing.
    pub fn from_assets<I>(assets: I) -> Option<Self>
    where
        I: IntoIterator<Item = (AssetKind, PathBuf)>,
    {
        let assets: Vec<(AssetKind, PathBuf)> = assets.into_iter().collect();
        let layers = AssetKind::DISPLAY_ORDER
            .iter()
            .map(|kind| {
                assets
                    .iter()
                    .find(|(candidate, _)| candidate == kind)
                    .map(|(kind, path)| Layer {
                        kind: *kind,
                        path: path.clone(),
                    })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.layers.iter().map(|layer| layer.path.as_path())
    }

    pub fn get(&self, kind: AssetKind) -> Option<&Path> {
        self.layers
            .iter()
            .find(|layer| layer.kind == kind)
            .map(|layer| layer.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Canvas size the layers are drawn onto, in pixels
    pub fn canvas_size() -> (u32, u32) {
        (display::CANVAS_WIDTH, display::CANVAS_HEIGHT)
    }
}
