//! The boundary to whatever detects face, eye and nose regions.
//!
//! Providers answer one question: which boxes of a given class appear in
//! this raster? Coordinates are always relative to the raster they were
//! given. Mapping eye and nose boxes found inside a face sub-raster back to
//! the full image is done by [`crate::landmarks`], never by providers.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::raster::GrayRaster;
use crate::types::Rect;

/// Kind of facial region requested from a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionClass {
    Face,
    Eye,
    Nose,
}

/// Size limits for one detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchWindow {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl SearchWindow {
    pub fn with_min(min_width: u32, min_height: u32) -> Self {
        Self {
            min_width,
            min_height,
            max_width: None,
            max_height: None,
        }
    }

    pub fn with_max(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_width = Some(max_width);
        self.max_height = Some(max_height);
        self
    }

    /// Whether a candidate's size falls inside this window.
    pub fn admits(&self, rect: &Rect) -> bool {
        let (w, h) = (rect.w as u32, rect.h as u32);
        w >= self.min_width
            && h >= self.min_height
            && self.max_width.map_or(true, |max| w <= max)
            && self.max_height.map_or(true, |max| h <= max)
    }
}

/// A source of candidate boxes for each [`RegionClass`].
///
/// Implement this to plug in Haar cascades, ONNX models or anything else.
///
/// ```
/// use face_orientation::{GrayRaster, Rect, RegionClass, RegionProvider, Result, SearchWindow};
///
/// struct CenterFace;
///
/// impl RegionProvider for CenterFace {
///     fn detect(
///         &self,
///         class: RegionClass,
///         raster: &GrayRaster,
///         _window: &SearchWindow,
///     ) -> Result<Vec<Rect>> {
///         match class {
///             RegionClass::Face => {
///                 let (w, h) = (raster.width() as i32 / 2, raster.height() as i32 / 2);
///                 Ok(vec![Rect::new(w / 2, h / 2, w, h)?])
///             }
///             _ => Ok(Vec::new()),
///         }
///     }
/// }
/// ```
pub trait RegionProvider: Send + Sync {
    /// Candidates of `class` within `raster`, in `raster` coordinates.
    fn detect(
        &self,
        class: RegionClass,
        raster: &GrayRaster,
        window: &SearchWindow,
    ) -> Result<Vec<Rect>>;
}

impl<P: RegionProvider + ?Sized> RegionProvider for Box<P> {
    fn detect(
        &self,
        class: RegionClass,
        raster: &GrayRaster,
        window: &SearchWindow,
    ) -> Result<Vec<Rect>> {
        (**self).detect(class, raster, window)
    }
}

impl<P: RegionProvider + ?Sized> RegionProvider for &P {
    fn detect(
        &self,
        class: RegionClass,
        raster: &GrayRaster,
        window: &SearchWindow,
    ) -> Result<Vec<Rect>> {
        (**self).detect(class, raster, window)
    }
}

/// Candidate sets computed ahead of time, e.g. by an external detector.
///
/// Face boxes are in full-image coordinates; eye and nose boxes are relative
/// to the face sub-raster, which is what a detector run on that sub-raster
/// reports. Candidates outside the requested window are dropped.
///
/// JSON form: `{"faces": [..], "eyes": [..], "nose": [..]}`, every key
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedRegions {
    pub faces: Vec<Rect>,
    pub eyes: Vec<Rect>,
    pub nose: Vec<Rect>,
}

impl FixedRegions {
    pub fn new(faces: Vec<Rect>, eyes: Vec<Rect>, nose: Vec<Rect>) -> Self {
        Self { faces, eyes, nose }
    }

    /// Load candidate sets from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    fn candidates(&self, class: RegionClass) -> &[Rect] {
        match class {
            RegionClass::Face => &self.faces,
            RegionClass::Eye => &self.eyes,
            RegionClass::Nose => &self.nose,
        }
    }
}

impl RegionProvider for FixedRegions {
    fn detect(
        &self,
        class: RegionClass,
        _raster: &GrayRaster,
        window: &SearchWindow,
    ) -> Result<Vec<Rect>> {
        Ok(self
            .candidates(class)
            .iter()
            .filter(|rect| window.admits(rect))
            .copied()
            .collect())
    }
}
