//! Yaw orientation from face, nose and eye boxes.
//!
//! Two signals are combined in a fixed order:
//!
//! 1. **Nose offset**: horizontal displacement of the nose center from the
//!    face center, normalized by face width.
//! 2. **Eye asymmetry**: relative difference between the areas of the
//!    left-most and right-most eye boxes. When strong enough it replaces
//!    the label chosen by the nose signal; confidence only ever rises.
//!
//! All boxes must already be in full-image coordinates.

use serde::Serialize;
use tracing::debug;

use crate::types::{Orientation, Rect};

/// Nose offsets below this magnitude count as facing the camera.
pub const FRONT_OFFSET_THRESHOLD: f64 = 0.08;

/// Offset magnitude at which front confidence bottoms out.
pub const FRONT_CONFIDENCE_SPAN: f64 = 0.15;

/// Lowest confidence reported for a nose-based front decision.
pub const FRONT_CONFIDENCE_FLOOR: f64 = 0.2;

/// Offset magnitude that maps to full confidence for a turned head.
pub const TURN_CONFIDENCE_SPAN: f64 = 0.35;

/// Eye area ratio above which the eyes decide the label.
pub const EYE_ASYMMETRY_THRESHOLD: f64 = 0.25;

/// Confidence given to a front decision backed only by balanced eyes.
pub const EYE_FALLBACK_CONFIDENCE: f64 = 0.3;

/// Degrees of yaw per unit of nose offset ratio.
pub const YAW_DEGREES_PER_OFFSET: f64 = 120.0;

/// Estimated yaw is clamped to `[-MAX_YAW_DEGREES, MAX_YAW_DEGREES]`.
pub const MAX_YAW_DEGREES: f64 = 45.0;

/// Diagnostic values gathered while classifying.
///
/// Serializes as a JSON object holding only the entries that were computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OrientationMetrics {
    /// `(nose center x - face center x) / face width`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nose_offset_ratio: Option<f64>,

    /// `|left area - right area| / max(left area, right area)`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_area_ratio: Option<f64>,

    /// Yaw in degrees derived from the nose offset, clamped to ±45°
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_face_yaw: Option<f64>,
}

impl OrientationMetrics {
    pub fn is_empty(&self) -> bool {
        self.nose_offset_ratio.is_none()
            && self.eye_area_ratio.is_none()
            && self.estimated_face_yaw.is_none()
    }
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub orientation: Orientation,
    /// Always within `[0.0, 1.0]`.
    pub confidence: f64,
    pub metrics: OrientationMetrics,
}

impl Classification {
    /// Estimated yaw in degrees, `0.0` when no nose was available.
    pub fn face_yaw(&self) -> f64 {
        self.metrics.estimated_face_yaw.unwrap_or(0.0)
    }
}

/// Classify the head turn for one face.
///
/// `eyes` may arrive in any order; they are sorted by `x` before the
/// left-most and right-most boxes are compared.
pub fn classify(face: &Rect, nose: Option<&Rect>, eyes: &[Rect]) -> Classification {
    let mut orientation = Orientation::Unknown;
    let mut confidence = 0.0_f64;
    let mut metrics = OrientationMetrics::default();

    if let Some(nose) = nose {
        let offset_ratio = nose_offset_ratio(face, nose);
        metrics.nose_offset_ratio = Some(offset_ratio);

        let magnitude = offset_ratio.abs();
        if magnitude < FRONT_OFFSET_THRESHOLD {
            orientation = Orientation::Front;
            confidence = FRONT_CONFIDENCE_FLOOR
                .max(1.0 - (magnitude / FRONT_CONFIDENCE_SPAN).min(1.0));
        } else {
            orientation = if offset_ratio < 0.0 {
                Orientation::Left
            } else {
                Orientation::Right
            };
            confidence = (magnitude / TURN_CONFIDENCE_SPAN).min(1.0);
        }
        debug!(offset_ratio, %orientation, confidence, "nose signal");
    }

    if let Some((left_area, right_area)) = outer_eye_areas(eyes) {
        let area_ratio = eye_area_ratio(left_area, right_area);
        metrics.eye_area_ratio = Some(area_ratio);

        if area_ratio > EYE_ASYMMETRY_THRESHOLD {
            // The side whose eye box is larger names the turn.
            orientation = if left_area > right_area {
                Orientation::Left
            } else {
                Orientation::Right
            };
            confidence = confidence.max(area_ratio.min(1.0));
        } else if orientation == Orientation::Unknown {
            orientation = Orientation::Front;
            confidence = confidence.max(EYE_FALLBACK_CONFIDENCE);
        }
        debug!(area_ratio, left_area, right_area, %orientation, confidence, "eye signal");
    }

    metrics.estimated_face_yaw = metrics.nose_offset_ratio.map(estimate_yaw);

    Classification {
        orientation,
        confidence: confidence.clamp(0.0, 1.0),
        metrics,
    }
}

/// Map a nose offset ratio to degrees of yaw.
pub fn estimate_yaw(offset_ratio: f64) -> f64 {
    (offset_ratio * YAW_DEGREES_PER_OFFSET).clamp(-MAX_YAW_DEGREES, MAX_YAW_DEGREES)
}

fn nose_offset_ratio(face: &Rect, nose: &Rect) -> f64 {
    (nose.center_x() - face.center_x()) / f64::from(face.w)
}

/// Areas of the left-most and right-most eye by screen position.
fn outer_eye_areas(eyes: &[Rect]) -> Option<(i64, i64)> {
    if eyes.len() < 2 {
        return None;
    }
    let mut sorted = eyes.to_vec();
    sorted.sort_by_key(|eye| eye.x);
    let left = sorted.first()?;
    let right = sorted.last()?;
    Some((left.area(), right.area()))
}

fn eye_area_ratio(left_area: i64, right_area: i64) -> f64 {
    let larger = left_area.max(right_area);
    if larger <= 0 {
        return 0.0;
    }
    (left_area - right_area).abs() as f64 / larger as f64
}
