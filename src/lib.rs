//! # face-orientation
//!
//! Heuristic yaw orientation (front / left / right) of a face from the
//! bounding boxes of the face, the nose and the eyes.
//!
//! This crate provides:
//! - **Region selection**: picking the representative face and nose boxes
//! - **Classification**: nose-offset and eye-asymmetry signals combined into an
//!   orientation, a confidence in `[0, 1]` and diagnostic metrics
//! - **Region provider boundary**: a trait for plugging in any detector,
//!   with sub-raster boxes mapped back to full-image coordinates
//! - **Analysis**: base64 payload decoding and a JSON report
//!
//! ## Algorithm Overview
//!
//! 1. Select the largest face box
//! 2. Search the face sub-raster for eyes and a nose, then translate them
//!    into full-image coordinates
//! 3. Nose signal: horizontal offset of the nose center from the face center,
//!    relative to face width
//! 4. Eye signal: area difference between the left-most and right-most eye,
//!    which overrides the nose label when strong enough
//! 5. Yaw estimate: the nose offset scaled to degrees, clamped to ±45°
//!
//! ## Quick Start
//!
//! ```rust
//! use face_orientation::{classify, Orientation, Rect};
//!
//! let face = Rect::new(0, 0, 200, 200).unwrap();
//! let nose = Rect::new(40, 100, 20, 20).unwrap();
//!
//! let result = classify(&face, Some(&nose), &[]);
//! assert_eq!(result.orientation, Orientation::Left);
//! assert!((result.confidence - 0.714).abs() < 1e-3);
//! ```
//!
//! ## Custom Detectors
//!
//! Implement [`RegionProvider`] for your detector and hand it to an
//! [`Analyzer`]. Providers report boxes relative to the raster they are
//! given; the analyzer takes care of translating eye and nose boxes found
//! inside the face.

mod analysis;
pub mod classifier;
mod config;
mod error;
pub mod landmarks;
mod payload;
mod raster;
mod region;
#[cfg(feature = "rustface")]
mod rustface_backend;
mod select;
mod types;

pub use analysis::{Analysis, Analyzer, FailureReport, Report, SuccessReport};
pub use classifier::{classify, estimate_yaw, Classification, OrientationMetrics};
pub use config::DetectionConfig;
pub use error::{Error, Result};
pub use landmarks::{locate, FaceRoi, Landmarks};
pub use payload::{decode_image, Payload};
pub use raster::GrayRaster;
pub use region::{FixedRegions, RegionClass, RegionProvider, SearchWindow};
#[cfg(feature = "rustface")]
pub use rustface_backend::RustfaceProvider;
pub use select::select_largest;
pub use types::{Orientation, Rect};
