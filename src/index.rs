use crate::accumulator::Accumulator;
use crate::axis::{Axis, AxisKind};
use crate::handle::PointId;
use crate::point::Point;

/// An axis-projected spatial index over a fixed set of 2D points.
///
/// Built once (`insert` exactly `N` times, then `finalize`), then queried
/// many times via [`SpatialIndex::nearest`] or [`SpatialIndex::nearest_to`].
/// Mutation after `finalize()` is not supported; see the crate's Non-goals.
pub struct SpatialIndex {
    points: Vec<Point>,
    axes: [Axis; 2],
    finalized: bool,
}

impl SpatialIndex {
    /// Creates an empty index with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        SpatialIndex {
            points: Vec::with_capacity(capacity),
            axes: [Axis::new(AxisKind::X, capacity), Axis::new(AxisKind::Y, capacity)],
            finalized: false,
        }
    }

    /// Inserts a point, returning the handle assigned to it. Must be called
    /// exactly `capacity` times before [`SpatialIndex::finalize`].
    pub fn insert(&mut self, point: Point) -> PointId {
        assert!(!self.finalized, "cannot insert into a finalized index");
        let id = PointId(self.points.len() as u32);
        self.points.push(point);
        for axis in &mut self.axes {
            axis.insert(id);
        }
        id
    }

    /// Sorts each axis and builds its handle→position map. Idempotent.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        for axis in &mut self.axes {
            axis.finalize(&self.points);
        }
        self.finalized = true;
    }

    /// All inserted points, in insertion (handle) order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, id: PointId) -> &Point {
        &self.points[id.index()]
    }

    /// Approximate k-nearest-neighbor query anchored at an already-inserted
    /// point. `n < 0` means unbounded (return every viable neighbor within
    /// `max`); `n >= 0` caps the result at `n` points. `max` is a linear
    /// (not squared) axis-separation cutoff.
    ///
    /// `id` must have been returned by a prior call to `insert` on this same
    /// index. Querying before `finalize()`, or with a handle this index
    /// never issued, is a programming error.
    pub fn nearest(&self, id: PointId, n: isize, max: f32) -> Vec<PointId> {
        assert!(self.finalized, "SpatialIndex queried before finalize()");
        let cap = cap_from(n);
        let point = self.points[id.index()];
        let mut acc = Accumulator::new(&self.points, point, cap);
        acc.insert(id);

        for axis in &self.axes {
            let anchor = axis.index_for(id);
            sweep_axis(axis, &self.points, &mut acc, anchor, axis.query_value(&point), max);
        }

        acc.into_result()
    }

    /// Approximate k-nearest-neighbor query anchored at an arbitrary
    /// coordinate that need not be a member of the index. Unlike
    /// [`SpatialIndex::nearest`], the result is never pre-seeded with a
    /// self-match, since `point` may not correspond to any inserted handle.
    pub fn nearest_to(&self, point: &Point, n: isize, max: f32) -> Vec<PointId> {
        assert!(self.finalized, "SpatialIndex queried before finalize()");
        let cap = cap_from(n);
        let mut acc = Accumulator::new(&self.points, *point, cap);

        for axis in &self.axes {
            let anchor = axis.search_position(&self.points, axis.query_value(point));
            sweep_axis(axis, &self.points, &mut acc, anchor, axis.query_value(point), max);
        }

        acc.into_result()
    }
}

fn cap_from(n: isize) -> Option<usize> {
    if n < 0 {
        None
    } else {
        Some(n as usize)
    }
}

/// One axis's contribution to a k-NN query: an alternating left/right sweep
/// outward from `anchor`, pruned by the accumulator's viability and
/// potential predicates.
///
/// A side is only eligible for admission once its axis-separation from the
/// query falls within `max` *and* the accumulator judges it viable by
/// distance. Gating admission on `max` directly (rather than only gating
/// continuation) is what makes an empty-radius query return nothing beyond
/// the seed point.
fn sweep_axis(
    axis: &Axis,
    points: &[Point],
    acc: &mut Accumulator,
    anchor: usize,
    query_value: f32,
    max: f32,
) {
    let len = axis.len();
    let mut left = anchor as isize - 1;
    let mut right = anchor as isize + 1;

    loop {
        let mut left_viable = false;
        let mut left_dist = f32::INFINITY;
        if left >= 0 {
            let id = axis.at(left as usize);
            let delta = query_value - axis.value_for(points, id);
            let (dist_viable, d) = acc.viable(id);
            left_viable = delta.abs() <= max && dist_viable;
            left_dist = d;
            if !left_viable {
                left -= 1;
            }
        }

        let mut right_viable = false;
        let mut right_dist = f32::INFINITY;
        if (right as usize) < len {
            let id = axis.at(right as usize);
            let delta = query_value - axis.value_for(points, id);
            let (dist_viable, d) = acc.viable(id);
            right_viable = delta.abs() <= max && dist_viable;
            right_dist = d;
            if !right_viable {
                right += 1;
            }
        }

        if left_viable && (!right_viable || left_dist < right_dist) {
            acc.insert(axis.at(left as usize));
            left -= 1;
        } else if right_viable {
            acc.insert(axis.at(right as usize));
            right += 1;
        }

        let left_potential = left >= 0 && {
            let id = axis.at(left as usize);
            acc.has_potential(query_value - axis.value_for(points, id), max)
        };
        let right_potential = (right as usize) < len && {
            let id = axis.at(right as usize);
            acc.has_potential(query_value - axis.value_for(points, id), max)
        };

        if !left_potential && !right_potential {
            break;
        }
        if !left_potential {
            left = -1;
        }
        if !right_potential {
            right = len as isize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(coords: &[(f32, f32)]) -> (SpatialIndex, Vec<PointId>) {
        let mut index = SpatialIndex::with_capacity(coords.len());
        let ids = coords
            .iter()
            .map(|&(x, y)| index.insert(Point::new(x, y)))
            .collect();
        index.finalize();
        (index, ids)
    }

    #[test]
    fn self_containment_and_ordering() {
        let (index, ids) = build(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (5.0, 5.0)]);
        let result = index.nearest(ids[0], 3, f32::INFINITY);
        assert_eq!(result[0], ids[0]);
        let mut prev = 0.0f32;
        for &id in &result {
            let d = Point::distance_squared(index.point(ids[0]), index.point(id));
            assert!(d >= prev);
            prev = d;
        }
    }

    #[test]
    fn self_query_returns_self_first() {
        let (index, ids) = build(&[(0.0, 0.0), (10.0, 10.0), (-5.0, 3.0)]);
        for &id in &ids {
            let result = index.nearest(id, 1, f32::INFINITY);
            assert_eq!(result, vec![id]);
        }
    }

    #[test]
    fn empty_radius_returns_only_self() {
        let (index, ids) = build(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (2.0, 2.0)]);
        for &id in &ids {
            let result = index.nearest(id, 5, 0.0);
            assert_eq!(result, vec![id]);
        }
    }

    #[test]
    fn matches_brute_force_on_small_set() {
        let coords: Vec<(f32, f32)> = (0..20)
            .map(|i| {
                let i = i as f32;
                (i * 0.37 % 5.0, (i * 0.61 + 1.0) % 5.0)
            })
            .collect();
        let (index, ids) = build(&coords);

        for (qi, &qid) in ids.iter().enumerate() {
            let got = index.nearest(qid, 5, f32::INFINITY);
            let mut brute: Vec<(f32, usize)> = ids
                .iter()
                .enumerate()
                .map(|(i, &id)| (Point::distance_squared(index.point(qid), index.point(id)), i))
                .collect();
            brute.sort_by(|a, b| a.0.total_cmp(&b.0));
            let expected: Vec<PointId> = brute.iter().take(5).map(|&(_, i)| ids[i]).collect();

            let got_dists: Vec<f32> = got
                .iter()
                .map(|&id| Point::distance_squared(index.point(qid), index.point(id)))
                .collect();
            let expected_dists: Vec<f32> = expected
                .iter()
                .map(|&id| Point::distance_squared(index.point(qid), index.point(id)))
                .collect();
            assert_eq!(got.len(), expected.len(), "query {qi}");
            for (a, b) in got_dists.iter().zip(expected_dists.iter()) {
                assert!((a - b).abs() < 1e-6, "query {qi}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn degenerate_all_coincident_no_infinite_loop() {
        let coords: Vec<(f32, f32)> = (0..50).map(|_| (0.6, 0.6)).collect();
        let (index, _ids) = build(&coords);
        let query = Point::new(0.5, 0.5);
        let result = index.nearest_to(&query, 3, 0.25);
        assert_eq!(result.len(), 3);
        let unique: std::collections::HashSet<PointId> = result.iter().copied().collect();
        assert_eq!(unique.len(), 3);
    }
}
