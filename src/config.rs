//! Detection parameters for the face, eye and nose passes.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::region::SearchWindow;
use crate::types::Rect;

/// Size limits used when asking a provider for regions.
///
/// Eye and nose limits are fractions of the selected face box. Every field
/// has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Smallest face side in pixels.
    pub face_min_size: u32,
    /// Smallest eye side as a fraction of the face side.
    pub eye_min_fraction: f64,
    /// Largest eye side as a fraction of the face side.
    pub eye_max_fraction: f64,
    /// Smallest nose side as a fraction of the face side.
    pub nose_min_fraction: f64,
    /// Equalize the histogram before detection.
    pub equalize: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            face_min_size: 120,
            eye_min_fraction: 0.15,
            eye_max_fraction: 0.5,
            nose_min_fraction: 0.15,
            equalize: true,
        }
    }
}

impl DetectionConfig {
    /// Load overrides from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn face_window(&self) -> SearchWindow {
        SearchWindow::with_min(self.face_min_size, self.face_min_size)
    }

    pub fn eye_window(&self, face: &Rect) -> SearchWindow {
        let (min_w, min_h) = scaled(face, self.eye_min_fraction);
        let (max_w, max_h) = scaled(face, self.eye_max_fraction);
        SearchWindow::with_min(min_w, min_h).with_max(max_w, max_h)
    }

    pub fn nose_window(&self, face: &Rect) -> SearchWindow {
        let (min_w, min_h) = scaled(face, self.nose_min_fraction);
        SearchWindow::with_min(min_w, min_h)
    }
}

/// Face dimensions scaled by `fraction`, truncated to whole pixels.
fn scaled(face: &Rect, fraction: f64) -> (u32, u32) {
    let w = (f64::from(face.w) * fraction).max(0.0) as u32;
    let h = (f64::from(face.h) * fraction).max(0.0) as u32;
    (w, h)
}
