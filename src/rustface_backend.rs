use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::raster::GrayRaster;
use crate::region::{RegionClass, RegionProvider, SearchWindow};
use crate::types::Rect;

/// SeetaFace needs at least 20px windows.
const MIN_SEETA_FACE_SIZE: u32 = 20;

/// Face provider backed by the `rustface` crate (SeetaFace engine).
///
/// SeetaFace only models frontal faces, so eye and nose requests come back
/// empty and classification falls back to whatever those passes yield.
pub struct RustfaceProvider {
    model: rustface::Model,
    score_thresh: f64,
}

impl RustfaceProvider {
    /// Load a `seeta_fd_frontal_v1.0.bin` model from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let model = rustface::read_model(BufReader::new(file)).map_err(|e| {
            Error::Provider(format!("failed to load SeetaFace model {}: {e}", path.display()))
        })?;
        Ok(Self {
            model,
            score_thresh: 2.0,
        })
    }

    /// Minimum detector score for a face to be reported (default: 2.0).
    pub fn score_thresh(mut self, thresh: f64) -> Self {
        self.score_thresh = thresh;
        self
    }

    fn detect_faces(&self, raster: &GrayRaster, window: &SearchWindow) -> Vec<Rect> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(window.min_width.max(MIN_SEETA_FACE_SIZE));
        detector.set_score_thresh(self.score_thresh);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let image = rustface::ImageData::new(raster.as_raw(), raster.width(), raster.height());
        let faces = detector.detect(&image);
        debug!(found = faces.len(), "rustface pass");

        faces
            .iter()
            .filter_map(|face| {
                let bbox = face.bbox();
                Rect::new(bbox.x(), bbox.y(), bbox.width() as i32, bbox.height() as i32).ok()
            })
            .filter(|rect| window.admits(rect))
            .collect()
    }
}

impl RegionProvider for RustfaceProvider {
    fn detect(
        &self,
        class: RegionClass,
        raster: &GrayRaster,
        window: &SearchWindow,
    ) -> Result<Vec<Rect>> {
        match class {
            RegionClass::Face => Ok(self.detect_faces(raster, window)),
            RegionClass::Eye | RegionClass::Nose => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_is_io_error() {
        let result = RustfaceProvider::load("/nonexistent/seeta_fd_frontal_v1.0.bin");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
