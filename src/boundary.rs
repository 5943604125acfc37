//! Site boundary approximation
//!
//! The surveyed area is approximated by the convex hull of the accepted
//! image positions, computed in plain lon/lat space.

use crate::types::ImageRecord;
use geo::{Area, ConvexHull, Coord, MultiPoint, Point, Polygon};
use tracing::warn;

/// Hulls smaller than this (square degrees, about 1 cm²) count as collinear
const MIN_BOUNDARY_AREA: f64 = 1e-14;

/// Convex hull of the image positions, or `None` when it has no area
///
/// Needs at least three distinct, non-collinear positions.
pub fn site_boundary(records: &[ImageRecord]) -> Option<Polygon<f64>> {
    let points = distinct_points(records);

    if points.len() < 3 {
        warn!(
            "Not enough distinct image positions for a site boundary ({} < 3)",
            points.len()
        );
        return None;
    }

    let hull = MultiPoint::new(points).convex_hull();

    if hull.unsigned_area() < MIN_BOUNDARY_AREA {
        warn!("Image positions are collinear, no site boundary");
        return None;
    }

    Some(hull)
}

fn distinct_points(records: &[ImageRecord]) -> Vec<Point<f64>> {
    let mut coords: Vec<Coord<f64>> = records
        .iter()
        .map(|r| Coord {
            x: r.gps.longitude,
            y: r.gps.latitude,
        })
        .collect();

    coords.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    coords.dedup();
    coords.into_iter().map(Point::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GpsFix, ImageKind};
    use std::path::PathBuf;

    fn at(lon: f64, lat: f64) -> ImageRecord {
        ImageRecord {
            path: PathBuf::from(format!("{}_{}.JPG", lon, lat)),
            gps: GpsFix {
                latitude: lat,
                longitude: lon,
                altitude: 50.0,
            },
            gimbal: None,
            kind: ImageKind::Unknown,
        }
    }

    #[test]
    fn test_square_with_interior_point() {
        let records = vec![
            at(0.0, 0.0),
            at(1.0, 0.0),
            at(1.0, 1.0),
            at(0.0, 1.0),
            at(0.5, 0.5),
        ];
        let hull = site_boundary(&records).unwrap();
        // Closed ring: four corners plus the repeated first point
        assert_eq!(hull.exterior().0.len(), 5);
        assert!((hull.unsigned_area() - 1.0).abs() < 1e-12);
        assert!(!hull
            .exterior()
            .0
            .iter()
            .any(|c| c.x == 0.5 && c.y == 0.5));
    }

    #[test]
    fn test_too_few_points() {
        assert!(site_boundary(&[]).is_none());
        assert!(site_boundary(&[at(1.0, 1.0), at(2.0, 2.0)]).is_none());
        // Duplicates don't count as distinct positions
        assert!(site_boundary(&[at(1.0, 1.0), at(1.0, 1.0), at(2.0, 2.0)]).is_none());
    }

    #[test]
    fn test_collinear_points() {
        let records = vec![at(0.0, 0.0), at(1.0, 1.0), at(2.0, 2.0), at(3.0, 3.0)];
        assert!(site_boundary(&records).is_none());
    }

    #[test]
    fn test_triangle() {
        let records = vec![at(-74.0, 40.0), at(-73.99, 40.0), at(-74.0, 40.01)];
        let hull = site_boundary(&records).unwrap();
        assert_eq!(hull.exterior().0.len(), 4);
        assert!(hull.unsigned_area() > 0.0);
    }
}
