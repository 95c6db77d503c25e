//! Picking the representative box out of a candidate set.

use crate::types::Rect;

/// Return the candidate with the largest area, or `None` for an empty set.
///
/// When several candidates share the maximal area the first one wins.
/// Used for the face and nose passes; eyes keep the whole set.
pub fn select_largest(candidates: &[Rect]) -> Option<Rect> {
    candidates.iter().copied().fold(None, |best, rect| match best {
        Some(current) if current.area() >= rect.area() => Some(current),
        _ => Some(rect),
    })
}
