use crate::handle::PointId;
use crate::point::Point;

/// A capacity-bounded (or unbounded) buffer of point handles, kept sorted by
/// squared distance to a fixed query coordinate.
///
/// Shared across both axis sweeps in [`crate::SpatialIndex::nearest`] /
/// `nearest_to`: a point admitted while sweeping the x-axis tightens `worst`
/// for the y-axis sweep and vice versa, and the identity check in
/// [`Accumulator::insert`] rejects a point considered by both axes.
pub(crate) struct Accumulator<'a> {
    points: &'a [Point],
    src: Point,
    cap: Option<usize>,
    results: Vec<PointId>,
    worst: Option<f32>,
}

impl<'a> Accumulator<'a> {
    pub(crate) fn new(points: &'a [Point], src: Point, cap: Option<usize>) -> Self {
        Accumulator {
            points,
            src,
            cap,
            results: Vec::with_capacity(cap.unwrap_or(8)),
            worst: None,
        }
    }

    fn distance_sq(&self, id: PointId) -> f32 {
        Point::distance_squared(&self.src, &self.points[id.index()])
    }

    fn is_full(&self) -> bool {
        matches!(self.cap, Some(cap) if self.results.len() >= cap)
    }

    /// Returns the squared distance of `id` to the query point, and whether
    /// `id` could currently displace the worst admitted neighbor.
    pub(crate) fn viable(&self, id: PointId) -> (bool, f32) {
        let d = self.distance_sq(id);
        if !self.is_full() {
            (true, d)
        } else {
            (d < self.worst.expect("worst is set once full"), d)
        }
    }

    /// Whether a point separated from the query by `delta` along the current
    /// axis could still improve the result, given the linear cutoff `max`.
    pub(crate) fn has_potential(&self, delta: f32, max: f32) -> bool {
        if delta.abs() > max {
            return false;
        }
        if !self.is_full() {
            return true;
        }
        delta * delta < self.worst.expect("worst is set once full")
    }

    /// Inserts `id`, maintaining sorted order. Ties favor the
    /// already-admitted point: a new candidate is only inserted ahead of an
    /// occupant it is *strictly* closer than.
    pub(crate) fn insert(&mut self, id: PointId) {
        if self.results.contains(&id) {
            return;
        }

        let d_new = self.distance_sq(id);
        let pos = self
            .results
            .iter()
            .position(|&other| d_new < self.distance_sq(other))
            .unwrap_or(self.results.len());

        if let Some(cap) = self.cap {
            if pos >= cap {
                return;
            }
        }

        self.results.insert(pos, id);
        if let Some(cap) = self.cap {
            self.results.truncate(cap);
        }

        if self.is_full() {
            let last = *self.results.last().unwrap();
            self.worst = Some(self.distance_sq(last));
        }
    }

    pub(crate) fn into_result(self) -> Vec<PointId> {
        self.results
    }
}
