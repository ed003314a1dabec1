//! An axis-projected spatial index and an OPTICS-style density clusterer
//! over a fixed set of 2D points.
//!
//! Build a [`SpatialIndex`] once from a point set, `finalize()` it, then
//! either query it directly with [`SpatialIndex::nearest`] or hand it to
//! [`optics::optics`] to partition the points into density-based clusters.
//!
//! Both sides are single-threaded and batch-oriented: the index does not
//! support insertion after `finalize()`, and a cluster run owns its
//! reachability state exclusively for the duration of the call.

mod accumulator;
mod axis;
mod handle;
mod index;
mod point;
pub mod optics;
mod reachability;

pub use handle::PointId;
pub use index::SpatialIndex;
pub use optics::{optics as cluster, Cluster, OpticsOptions};
pub use point::Point;
