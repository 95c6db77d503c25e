//! Locating the face, nose and eyes through a [`RegionProvider`].
//!
//! Eye and nose passes run on the face sub-raster. Their boxes only leave
//! [`FaceRoi`] after being shifted back into full-image coordinates, so the
//! classifier never sees sub-raster coordinates.

use serde::Serialize;
use tracing::debug;

use crate::config::DetectionConfig;
use crate::error::{Error, Result};
use crate::raster::GrayRaster;
use crate::region::{RegionClass, RegionProvider, SearchWindow};
use crate::select::select_largest;
use crate::types::Rect;

/// Boxes for one face, all in full-image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Landmarks {
    pub face: Rect,
    pub nose: Option<Rect>,
    pub eyes: Vec<Rect>,
}

/// The face sub-raster and where it sits in the full image.
pub struct FaceRoi {
    raster: GrayRaster,
    origin: Rect,
}

impl FaceRoi {
    /// Cut the face region out of `raster`. `None` if the box lies entirely
    /// outside the raster.
    pub fn new(raster: &GrayRaster, face: &Rect) -> Option<Self> {
        let (sub, origin) = raster.crop(face)?;
        Some(Self {
            raster: sub,
            origin,
        })
    }

    /// Region of the full image the sub-raster covers.
    pub fn bounds(&self) -> Rect {
        self.origin
    }

    pub fn raster(&self) -> &GrayRaster {
        &self.raster
    }

    /// Run a provider pass inside the face and return full-image boxes.
    ///
    /// Boxes whose translated origin would overflow `i32` are dropped.
    pub fn detect<P: RegionProvider + ?Sized>(
        &self,
        provider: &P,
        class: RegionClass,
        window: &SearchWindow,
    ) -> Result<Vec<Rect>> {
        let found = provider.detect(class, &self.raster, window)?;
        Ok(found
            .iter()
            .filter_map(|rect| rect.checked_offset(self.origin.x, self.origin.y))
            .collect())
    }
}

/// Find the largest face and the landmarks inside it.
///
/// Fails with [`Error::NoFaceDetected`] when the provider reports no face.
pub fn locate<P: RegionProvider + ?Sized>(
    provider: &P,
    raster: &GrayRaster,
    config: &DetectionConfig,
) -> Result<Landmarks> {
    let faces = provider.detect(RegionClass::Face, raster, &config.face_window())?;
    debug!(candidates = faces.len(), "face pass");
    let face = select_largest(&faces).ok_or(Error::NoFaceDetected)?;

    let Some(roi) = FaceRoi::new(raster, &face) else {
        // The face lies outside the raster; nothing to search in.
        return Ok(Landmarks {
            face,
            nose: None,
            eyes: Vec::new(),
        });
    };

    let eyes = roi.detect(provider, RegionClass::Eye, &config.eye_window(&face))?;
    let noses = roi.detect(provider, RegionClass::Nose, &config.nose_window(&face))?;
    let nose = select_largest(&noses);
    debug!(%face, eyes = eyes.len(), noses = noses.len(), "landmark passes");

    Ok(Landmarks { face, nose, eyes })
}
