use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An axis-aligned box in pixel coordinates, origin at the top-left corner.
///
/// Width and height are always positive; [`Rect::new`] and deserialization
/// both reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRect")]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Deserialize)]
struct RawRect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl TryFrom<RawRect> for Rect {
    type Error = Error;

    fn try_from(raw: RawRect) -> Result<Self> {
        Rect::new(raw.x, raw.y, raw.w, raw.h)
    }
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w <= 0 || h <= 0 {
            return Err(Error::InvalidRect { w, h });
        }
        Ok(Self { x, y, w, h })
    }

    /// Area in square pixels. Widened so large boxes cannot overflow.
    pub fn area(&self) -> i64 {
        i64::from(self.w) * i64::from(self.h)
    }

    pub fn center_x(&self) -> f64 {
        f64::from(self.x) + f64::from(self.w) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        f64::from(self.y) + f64::from(self.h) / 2.0
    }

    /// The same box shifted by `(dx, dy)`, or `None` if the new origin
    /// does not fit in `i32`.
    pub fn checked_offset(&self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            ..*self
        })
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.w, self.h, self.x, self.y)
    }
}

/// Inferred horizontal head turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Front,
    Left,
    Right,
    #[default]
    Unknown,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Front => "front",
            Orientation::Left => "left",
            Orientation::Right => "right",
            Orientation::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_geometry() {
        let rect = Rect::new(10, 20, 40, 30).unwrap();
        assert_eq!(rect.area(), 1200);
        assert_eq!(rect.center_x(), 30.0);
        assert_eq!(rect.center_y(), 35.0);
    }

    #[test]
    fn rect_center_keeps_half_pixels() {
        let rect = Rect::new(0, 0, 5, 3).unwrap();
        assert_eq!(rect.center_x(), 2.5);
        assert_eq!(rect.center_y(), 1.5);
    }

    #[test]
    fn rect_offset_moves_origin_only() {
        let rect = Rect::new(5, 6, 7, 8).unwrap();
        let moved = rect.checked_offset(100, 200);
        assert_eq!(moved, Some(Rect::new(105, 206, 7, 8).unwrap()));
    }

    #[test]
    fn rect_offset_overflow_is_none() {
        let rect = Rect::new(i32::MAX, 0, 40, 40).unwrap();
        assert_eq!(rect.checked_offset(1, 0), None);
        assert_eq!(rect.checked_offset(0, 0), Some(rect));

        let rect = Rect::new(0, i32::MIN, 40, 40).unwrap();
        assert_eq!(rect.checked_offset(0, -1), None);
    }

    #[test]
    fn rect_rejects_empty_sizes() {
        assert!(matches!(
            Rect::new(0, 0, 0, 10),
            Err(Error::InvalidRect { w: 0, h: 10 })
        ));
        assert!(Rect::new(0, 0, 10, -1).is_err());
    }

    #[test]
    fn rect_json_shape() {
        let rect = Rect::new(1, 2, 3, 4).unwrap();
        let json = serde_json::to_string(&rect).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"w":3,"h":4}"#);

        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rect);
    }

    #[test]
    fn rect_json_rejects_zero_width() {
        let parsed: std::result::Result<Rect, _> =
            serde_json::from_str(r#"{"x":1,"y":2,"w":0,"h":4}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn orientation_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Orientation::Left).unwrap(),
            r#""left""#
        );
        assert_eq!(Orientation::default(), Orientation::Unknown);
        assert_eq!(Orientation::Front.to_string(), "front");
    }
}
