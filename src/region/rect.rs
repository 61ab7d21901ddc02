use std::fmt;

use serde::{Deserialize, Serialize};

/// A rectangle as supplied by the caller, in pixels, top-left origin.
///
/// Coordinates may be negative and the rectangle may extend past the
/// raster it refers to; [`super::resolve`] clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert a rect measured from the bottom-left corner of a raster of
    /// `raster_height` rows into the canonical top-left form.
    pub fn flipped_from_bottom_left(&self, raster_height: u32) -> Self {
        let height = i64::from(raster_height);
        let y = height - i64::from(self.y) - i64::from(self.height);
        Self {
            y: i32::try_from(y).unwrap_or(if y < 0 { i32::MIN } else { i32::MAX }),
            ..*self
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(x: {}, y: {}, w: {}, h: {})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// A rectangle clamped to raster bounds. Width and height are never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ResolvedRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if this rectangle fully contains another
    pub fn contains(&self, other: &ResolvedRect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.x + self.width >= other.x + other.width
            && self.y + self.height >= other.y + other.height
    }
}

impl fmt::Display for ResolvedRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(x: {}, y: {}, w: {}, h: {})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Which corner a region's `y` coordinate is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RectOrigin {
    #[default]
    TopLeft,
    BottomLeft,
}

/// One sprite's placement within its parent texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Output base name (sprite name or `<array>_<index>`)
    pub name: String,
    pub rect: Rect,
}

impl Region {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
        }
    }

    /// Region covering a whole raster of the given size.
    pub fn whole(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self::new(
            name,
            Rect::new(
                0,
                0,
                i32::try_from(width).unwrap_or(i32::MAX),
                i32::try_from(height).unwrap_or(i32::MAX),
            ),
        )
    }

    /// Returns this region expressed with a top-left origin.
    pub fn to_top_left(&self, origin: RectOrigin, raster_height: u32) -> Region {
        match origin {
            RectOrigin::TopLeft => self.clone(),
            RectOrigin::BottomLeft => Region {
                name: self.name.clone(),
                rect: self.rect.flipped_from_bottom_left(raster_height),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let outer = ResolvedRect::new(0, 0, 20, 20);
        let inner = ResolvedRect::new(5, 5, 5, 5);
        let partial = ResolvedRect::new(15, 15, 10, 10);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&partial));
    }

    #[test]
    fn test_flip_bottom_left() {
        // 10 rows tall sprite sitting on the bottom edge of a 64 row texture
        let rect = Rect::new(4, 0, 8, 10);
        assert_eq!(rect.flipped_from_bottom_left(64), Rect::new(4, 54, 8, 10));

        let region = Region::new("a", Rect::new(0, 54, 8, 10));
        assert_eq!(
            region.to_top_left(RectOrigin::BottomLeft, 64).rect,
            Rect::new(0, 0, 8, 10)
        );
        assert_eq!(region.to_top_left(RectOrigin::TopLeft, 64), region);
    }

    #[test]
    fn test_whole_region() {
        let region = Region::whole("sheet", 32, 16);
        assert_eq!(region.name, "sheet");
        assert_eq!(region.rect, Rect::new(0, 0, 32, 16));
    }

    #[test]
    fn test_origin_deserialize() {
        let origin: RectOrigin = serde_json::from_str("\"bottom-left\"").unwrap();
        assert_eq!(origin, RectOrigin::BottomLeft);
    }
}
