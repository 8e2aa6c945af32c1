//! Graham scan (monotone chain variant) over an index arena

use std::iter;

use crate::hull::search_point::{SearchPoint, direction, sort_left};

/// Result of a hull reduction
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedHull {
    /// Hull vertices, starting at the "sortleft" minimum, counter-clockwise
    pub points: Vec<SearchPoint>,
    /// Whether `points` differs from the input (see [`GrahamScan::reduce`])
    pub changed: bool,
}

/// Convex hull reduction of a point sequence
///
/// The input is copied once into a sorted arena; partitions and half hulls
/// are index lists into that arena, so nothing borrows into caller data
/// beyond the input slice itself.
pub struct GrahamScan<'a> {
    raw: &'a [SearchPoint],
}

/// Points split by the line from `left` to `right`, as arena indices
struct Partition {
    left: usize,
    right: usize,
    upper: Vec<usize>,
    lower: Vec<usize>,
}

impl Partition {
    /// Split a sorted, duplicate free arena with at least two points
    fn new(arena: &[SearchPoint]) -> Self {
        let left = 0;
        let right = arena.len() - 1;

        let mut upper = Vec::new();
        let mut lower = Vec::new();
        for index in (left + 1)..right {
            let d = direction(
                arena[left].location,
                arena[right].location,
                arena[index].location,
            );
            if d < 0.0 {
                upper.push(index);
            } else {
                lower.push(index);
            }
        }

        Self {
            left,
            right,
            upper,
            lower,
        }
    }
}

impl<'a> GrahamScan<'a> {
    pub fn new(raw: &'a [SearchPoint]) -> Self {
        Self { raw }
    }

    /// Reduce the input to its convex hull
    ///
    /// Consecutive duplicate locations collapse into one vertex and collinear
    /// boundary points are dropped. `changed` is true when the hull differs
    /// from the input in size or order.
    ///
    /// Inputs with fewer than three points are returned unchanged, yet
    /// `changed` is still `true`. Callers must not read that flag as "the
    /// points differ" for such inputs.
    pub fn reduce(&self) -> ReducedHull {
        if self.raw.len() < 3 {
            return ReducedHull {
                points: self.raw.to_vec(),
                changed: true,
            };
        }

        let mut arena = self.raw.to_vec();
        arena.sort_by(sort_left);
        arena.dedup_by(|later, earlier| later.location == earlier.location);

        let points = if arena.len() == 1 {
            arena
        } else {
            let partition = Partition::new(&arena);
            let lower = build_half_hull(&arena, &partition, &partition.lower, 1.0);
            let upper = build_half_hull(&arena, &partition, &partition.upper, -1.0);

            // the lower hull ends in `right`, the upper hull starts in `left`
            lower[..lower.len() - 1]
                .iter()
                .chain(upper[1..].iter().rev())
                .map(|&index| arena[index])
                .collect()
        };

        let changed = points.as_slice() != self.raw;
        tracing::trace!(
            input = self.raw.len(),
            output = points.len(),
            changed,
            "reduced hull"
        );

        ReducedHull { points, changed }
    }
}

/// Build one half of the hull from `left` through `points` to `right`
///
/// `factor` is `1` for the lower and `-1` for the upper half and flips the
/// convexity test. A middle point on or inside the line of its neighbours is
/// erased.
fn build_half_hull(
    arena: &[SearchPoint],
    partition: &Partition,
    points: &[usize],
    factor: f64,
) -> Vec<usize> {
    let mut output = Vec::with_capacity(points.len() + 2);
    output.push(partition.left);

    for &index in points.iter().chain(iter::once(&partition.right)) {
        output.push(index);

        while output.len() >= 3 {
            let n = output.len();
            let d = direction(
                arena[output[n - 3]].location,
                arena[output[n - 1]].location,
                arena[output[n - 2]].location,
            );
            if factor * d <= 0.0 {
                output.remove(n - 2);
            } else {
                break;
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GeoPoint;
    use insta::assert_compact_debug_snapshot;

    fn points(coords: &[(f64, f64)]) -> Vec<SearchPoint> {
        coords
            .iter()
            .zip(0u32..)
            .map(|(&(lon, lat), id)| SearchPoint::new(GeoPoint::new(lon, lat), id))
            .collect()
    }

    fn locations(hull: &ReducedHull) -> Vec<(f64, f64)> {
        hull.points
            .iter()
            .map(|p| (p.location.lon, p.location.lat))
            .collect()
    }

    #[test]
    fn square_with_interior_point() {
        let input = points(&[(0.0, 0.0), (1.0, 0.0), (0.5, 0.5), (1.0, 1.0), (0.0, 1.0)]);
        let hull = GrahamScan::new(&input).reduce();

        assert!(hull.changed);
        assert_compact_debug_snapshot!(
            locations(&hull),
            @"[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]"
        );
    }

    #[test]
    fn square_in_hull_order_is_unchanged() {
        let input = points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let hull = GrahamScan::new(&input).reduce();

        assert!(!hull.changed);
        assert_eq!(hull.points, input);
    }

    #[test]
    fn same_points_in_other_order_are_changed() {
        let input = points(&[(1.0, 1.0), (0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let hull = GrahamScan::new(&input).reduce();

        assert!(hull.changed);
        assert_eq!(hull.points.len(), 4);
        let ids: Vec<_> = hull.points.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 0, 3]);
    }

    #[test]
    fn degenerate_sizes_keep_input_and_report_change() {
        for input in [
            points(&[]),
            points(&[(3.0, 4.0)]),
            points(&[(3.0, 4.0), (1.0, 2.0)]),
        ] {
            let hull = GrahamScan::new(&input).reduce();
            assert!(hull.changed);
            assert_eq!(hull.points, input);
        }
    }

    #[test]
    fn duplicates_collapse() {
        let input = points(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 0.0),
            (0.0, 2.0),
            (0.0, 0.0),
        ]);
        let hull = GrahamScan::new(&input).reduce();

        assert!(hull.changed);
        assert_compact_debug_snapshot!(
            locations(&hull),
            @"[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]"
        );
        // the lowest id survives for a duplicated location
        assert_eq!(hull.points[0].id, 0);
        assert_eq!(hull.points[1].id, 1);
    }

    #[test]
    fn signed_zeros_are_one_location() {
        let input = points(&[(-0.0, 1.0), (-0.0, 5.0), (0.0, 1.0)]);
        let hull = GrahamScan::new(&input).reduce();

        assert_compact_debug_snapshot!(locations(&hull), @"[(-0.0, 1.0), (-0.0, 5.0)]");
        let ids: Vec<_> = hull.points.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1]);

        let input = points(&[(0.0, 0.0), (1.0, 0.0), (-0.0, 1.0), (-0.0, 0.0)]);
        let hull = GrahamScan::new(&input).reduce();

        assert_compact_debug_snapshot!(
            locations(&hull),
            @"[(0.0, 0.0), (1.0, 0.0), (-0.0, 1.0)]"
        );
    }

    #[test]
    fn all_points_identical() {
        let input = points(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
        let hull = GrahamScan::new(&input).reduce();

        assert!(hull.changed);
        assert_eq!(hull.points.len(), 1);
        assert_eq!(hull.points[0].location, GeoPoint::new(5.0, 5.0));
    }

    #[test]
    fn collinear_points_reduce_to_segment() {
        let input = points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let hull = GrahamScan::new(&input).reduce();

        assert!(hull.changed);
        assert_compact_debug_snapshot!(locations(&hull), @"[(0.0, 0.0), (3.0, 3.0)]");
    }

    #[test]
    fn collinear_edge_points_are_removed() {
        // midpoints on the bottom and on the left (vertical) edge
        let input = points(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (0.0, 2.0),
            (0.0, 1.0),
        ]);
        let hull = GrahamScan::new(&input).reduce();

        assert_compact_debug_snapshot!(
            locations(&hull),
            @"[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]"
        );
    }

    #[test]
    fn concave_polygon() {
        let input = points(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (2.0, 1.0),
            (0.0, 4.0),
        ]);
        let hull = GrahamScan::new(&input).reduce();

        assert!(hull.changed);
        assert_compact_debug_snapshot!(
            locations(&hull),
            @"[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]"
        );
    }

    #[test]
    fn reducing_twice_is_stable() {
        let input = points(&[
            (3.0, 1.0),
            (0.0, 0.0),
            (1.0, 2.0),
            (5.0, 5.0),
            (2.0, 4.0),
            (4.0, -1.0),
            (2.0, 2.0),
        ]);
        let first = GrahamScan::new(&input).reduce();
        let second = GrahamScan::new(&first.points).reduce();

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(second.points, first.points);
    }
}
