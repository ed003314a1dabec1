use crate::handle::PointId;
use crate::point::Point;

/// Which coordinate an [`Axis`] projects points onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AxisKind {
    X,
    Y,
}

impl AxisKind {
    fn value(self, point: &Point) -> f32 {
        match self {
            AxisKind::X => point.x,
            AxisKind::Y => point.y,
        }
    }
}

/// A sorted projection of the point set onto one coordinate.
///
/// Insertion is a plain append; the sequence is ordered once, in bulk, at
/// [`Axis::finalize`]. An incremental `O(N)`-per-insert sorted insert would
/// keep the sequence ordered at every point in time, but since nothing may
/// query the axis before `finalize()` anyway, the bulk sort does strictly
/// less work.
pub(crate) struct Axis {
    kind: AxisKind,
    order: Vec<PointId>,
    position: Vec<u32>,
    finalized: bool,
}

impl Axis {
    pub(crate) fn new(kind: AxisKind, capacity: usize) -> Self {
        Axis {
            kind,
            order: Vec::with_capacity(capacity),
            position: Vec::new(),
            finalized: false,
        }
    }

    pub(crate) fn insert(&mut self, id: PointId) {
        assert!(!self.finalized, "cannot insert into a finalized axis");
        assert!(
            self.order.len() < self.order.capacity(),
            "axis insert past declared capacity"
        );
        self.order.push(id);
    }

    pub(crate) fn finalize(&mut self, points: &[Point]) {
        if self.finalized {
            return;
        }

        let kind = self.kind;
        self.order
            .sort_unstable_by(|&a, &b| value_of(kind, points, a).total_cmp(&value_of(kind, points, b)));

        let mut position = vec![0u32; self.order.len()];
        for (pos, &id) in self.order.iter().enumerate() {
            position[id.index()] = pos as u32;
        }
        self.position = position;
        self.finalized = true;
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn at(&self, pos: usize) -> PointId {
        self.order[pos]
    }

    pub(crate) fn index_for(&self, id: PointId) -> usize {
        assert!(self.finalized, "axis queried before finalize()");
        self.position[id.index()] as usize
    }

    pub(crate) fn value_for(&self, points: &[Point], id: PointId) -> f32 {
        self.kind.value(&points[id.index()])
    }

    pub(crate) fn query_value(&self, point: &Point) -> f32 {
        self.kind.value(point)
    }

    /// The position at which `value` would need to be inserted to keep the
    /// axis sorted — used to anchor a sweep for a query point that is not
    /// itself a member of the index.
    pub(crate) fn search_position(&self, points: &[Point], value: f32) -> usize {
        assert!(self.finalized, "axis queried before finalize()");
        let kind = self.kind;
        self.order
            .partition_point(|&id| value_of(kind, points, id) < value)
    }
}

fn value_of(kind: AxisKind, points: &[Point], id: PointId) -> f32 {
    kind.value(&points[id.index()])
}
