/// A dense handle assigned to a point at insertion time.
///
/// Coordinate-coincident points still need a stable identity distinct from
/// their coordinates; a dense integer assigned at insert time gives that
/// guarantee and doubles as a direct index into arena-backed storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub(crate) u32);

impl PointId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
