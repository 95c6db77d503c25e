//! End-to-end analysis and the JSON report returned to callers.

use serde::Serialize;
use tracing::{info, warn};

use crate::classifier::{classify, Classification, OrientationMetrics};
use crate::config::DetectionConfig;
use crate::error::{Error, Result};
use crate::landmarks::{locate, Landmarks};
use crate::payload::{decode_image, Payload};
use crate::raster::GrayRaster;
use crate::region::RegionProvider;
use crate::types::Orientation;

/// Runs a region provider and the classifier over one image at a time.
///
/// ```
/// use face_orientation::{Analyzer, FixedRegions, GrayRaster, Orientation, Rect};
///
/// let regions = FixedRegions::new(
///     vec![Rect::new(0, 0, 200, 200).unwrap()],
///     vec![],
///     vec![Rect::new(40, 100, 40, 40).unwrap()],
/// );
/// let raster = GrayRaster::from_fn(320, 240, |x, y| (x ^ y) as u8);
/// let analysis = Analyzer::new(regions).analyze_raster(&raster).unwrap();
/// assert_eq!(analysis.classification.orientation, Orientation::Left);
/// ```
pub struct Analyzer<P> {
    provider: P,
    config: DetectionConfig,
}

impl<P: RegionProvider> Analyzer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: DetectionConfig::default(),
        }
    }

    /// Replace the detection parameters.
    pub fn config(mut self, config: DetectionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn detection_config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Locate landmarks in a decoded raster and classify them.
    pub fn analyze_raster(&self, raster: &GrayRaster) -> Result<Analysis> {
        let equalized;
        let raster = if self.config.equalize {
            equalized = raster.equalize_histogram();
            &equalized
        } else {
            raster
        };

        let landmarks = locate(&self.provider, raster, &self.config)?;
        let classification = classify(&landmarks.face, landmarks.nose.as_ref(), &landmarks.eyes);
        info!(
            orientation = %classification.orientation,
            confidence = classification.confidence,
            "classified face"
        );

        Ok(Analysis {
            landmarks,
            classification,
        })
    }

    /// Decode base64 image data and analyze it.
    pub fn analyze_base64(&self, data: &str) -> Result<Analysis> {
        let raster = decode_image(data)?;
        self.analyze_raster(&raster)
    }

    /// Handle a raw JSON request body. Every failure becomes a
    /// [`Report::Failure`].
    pub fn analyze_payload(&self, raw: &str) -> Report {
        let payload = Payload::parse(raw);
        match self.analyze_base64(&payload.image_base64) {
            Ok(analysis) => Report::from(analysis),
            Err(err) => {
                warn!(%err, "analysis failed");
                Report::from(err)
            }
        }
    }
}

/// Landmarks and the classification derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub landmarks: Landmarks,
    pub classification: Classification,
}

/// What the caller receives, serialized as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Success(SuccessReport),
    Failure(FailureReport),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessReport {
    success: bool,
    pub orientation: Orientation,
    /// Rounded to 3 decimals
    pub confidence: f64,
    pub landmarks: Landmarks,
    pub metrics: OrientationMetrics,
    /// Rounded to 2 decimals
    #[serde(rename = "faceYaw")]
    pub face_yaw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    success: bool,
    pub message: String,
    #[serde(skip)]
    exit_code: i32,
}

impl Report {
    pub fn is_success(&self) -> bool {
        matches!(self, Report::Success(_))
    }

    /// 0 on success, otherwise [`Error::exit_code`] of the failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Report::Success(_) => 0,
            Report::Failure(failure) => failure.exit_code,
        }
    }
}

impl From<Analysis> for Report {
    fn from(analysis: Analysis) -> Self {
        let Analysis {
            landmarks,
            classification,
        } = analysis;
        Report::Success(SuccessReport {
            success: true,
            orientation: classification.orientation,
            confidence: round_to(classification.confidence, 3),
            landmarks,
            metrics: classification.metrics,
            face_yaw: round_to(classification.face_yaw(), 2),
        })
    }
}

impl From<Error> for Report {
    fn from(err: Error) -> Self {
        let message = match &err {
            Error::Decode(_) => "image could not be decoded".to_string(),
            Error::NoFaceDetected => "no face detected".to_string(),
            other => other.to_string(),
        };
        Report::Failure(FailureReport {
            success: false,
            message,
            exit_code: err.exit_code(),
        })
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
