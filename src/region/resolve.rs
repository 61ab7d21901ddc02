use super::{Region, ResolvedRect};
use crate::error::ExtractError;

/// Clamp `region` to a `width x height` raster.
///
/// Negative origins shrink the rectangle by the overhang before it is
/// moved to zero; the far edges are clamped afterwards in the same pass.
/// Fails with [`ExtractError::RegionRejected`] when nothing is left.
pub fn resolve(
    raster_width: u32,
    raster_height: u32,
    region: &Region,
) -> Result<ResolvedRect, ExtractError> {
    let rect = region.rect;
    let mut x = i64::from(rect.x);
    let mut y = i64::from(rect.y);
    let mut w = i64::from(rect.width);
    let mut h = i64::from(rect.height);
    let raster_w = i64::from(raster_width);
    let raster_h = i64::from(raster_height);

    if x < 0 {
        w += x;
        x = 0;
    }
    if y < 0 {
        h += y;
        y = 0;
    }
    if x + w > raster_w {
        w = raster_w - x;
    }
    if y + h > raster_h {
        h = raster_h - y;
    }

    let bounds = ResolvedRect::new(0, 0, raster_width, raster_height);
    if w <= 0 || h <= 0 {
        return Err(ExtractError::RegionRejected {
            name: region.name.clone(),
            rect,
            bounds,
        });
    }

    // All four values are now within 0..=raster dimension.
    let to_u32 = |v: i64| u32::try_from(v).unwrap_or(u32::MAX);
    Ok(ResolvedRect::new(to_u32(x), to_u32(y), to_u32(w), to_u32(h)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Rect;

    fn region(x: i32, y: i32, w: i32, h: i32) -> Region {
        Region::new("sprite", Rect::new(x, y, w, h))
    }

    #[test]
    fn test_inside_bounds_unchanged() {
        let resolved = resolve(100, 100, &region(10, 20, 30, 40)).unwrap();
        assert_eq!(resolved, ResolvedRect::new(10, 20, 30, 40));

        let full = resolve(100, 100, &region(0, 0, 100, 100)).unwrap();
        assert_eq!(full, ResolvedRect::new(0, 0, 100, 100));
    }

    #[test]
    fn test_negative_origin() {
        let resolved = resolve(100, 100, &region(-10, 5, 50, 20)).unwrap();
        assert_eq!(resolved, ResolvedRect::new(0, 5, 40, 20));

        let resolved = resolve(100, 100, &region(5, -15, 20, 20)).unwrap();
        assert_eq!(resolved, ResolvedRect::new(5, 0, 20, 5));
    }

    #[test]
    fn test_overhang() {
        let resolved = resolve(100, 100, &region(90, 90, 30, 30)).unwrap();
        assert_eq!(resolved, ResolvedRect::new(90, 90, 10, 10));
    }

    #[test]
    fn test_negative_origin_and_overhang_in_one_pass() {
        let resolved = resolve(100, 50, &region(-20, -20, 200, 200)).unwrap();
        assert_eq!(resolved, ResolvedRect::new(0, 0, 100, 50));
    }

    #[test]
    fn test_fully_outside_rejected() {
        let err = resolve(100, 100, &region(150, 150, 10, 10)).unwrap_err();
        match err {
            ExtractError::RegionRejected { name, rect, bounds } => {
                assert_eq!(name, "sprite");
                assert_eq!(rect, Rect::new(150, 150, 10, 10));
                assert_eq!(bounds, ResolvedRect::new(0, 0, 100, 100));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_degenerate_rejected() {
        assert!(resolve(100, 100, &region(-10, 0, 10, 10)).is_err());
        assert!(resolve(100, 100, &region(0, 0, 0, 10)).is_err());
        assert!(resolve(100, 100, &region(0, 0, 10, -5)).is_err());
        assert!(resolve(100, 100, &region(100, 0, 10, 10)).is_err());
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let resolved = resolve(100, 100, &region(i32::MIN, 0, i32::MAX, 10));
        assert!(resolved.is_err());
        let resolved = resolve(100, 100, &region(0, 0, i32::MAX, i32::MAX)).unwrap();
        assert_eq!(resolved, ResolvedRect::new(0, 0, 100, 100));
    }
}
