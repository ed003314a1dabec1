#[cfg(feature = "indicatif")]
use indicatif::ProgressBar;

use crate::handle::PointId;
use crate::index::SpatialIndex;
use crate::point::Point;
use crate::reachability::{ReachRecord, ReachabilityQueue};

/// An ordered sequence of point handles produced by one seed's expansion.
/// Insertion order is the `optics` visit order: the seed first, then every
/// subsequent point in non-decreasing reachability order.
#[derive(Clone, Debug, Default)]
pub struct Cluster {
    pub points: Vec<PointId>,
}

impl Cluster {
    fn seeded(seed: PointId) -> Self {
        Cluster { points: vec![seed] }
    }
}

/// Configuration for an `optics` run: density thresholds plus an optional
/// progress callback.
#[derive(Clone)]
pub struct OpticsOptions {
    epsilon: f32,
    min_points: usize,
    #[cfg(feature = "indicatif")]
    progress: Option<ProgressBar>,
}

impl OpticsOptions {
    pub fn new(epsilon: f32, min_points: usize) -> Self {
        assert!(epsilon >= 0.0, "epsilon must be non-negative");
        assert!(min_points >= 1, "min_points must be at least 1");
        OpticsOptions {
            epsilon,
            min_points,
            #[cfg(feature = "indicatif")]
            progress: None,
        }
    }

    /// A `ProgressBar` advanced once per point the outer walk visits.
    #[cfg(feature = "indicatif")]
    pub fn progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }
}

/// Runs OPTICS density clustering over `index`, returning one cluster per
/// previously-unprocessed seed the outer walk encounters, in visit order.
pub fn optics(index: &SpatialIndex, epsilon: f32, min_points: usize) -> Vec<Cluster> {
    optics_with_options(index, OpticsOptions::new(epsilon, min_points))
}

/// Like [`optics`], but accepts an [`OpticsOptions`] for a progress callback.
pub fn optics_with_options(index: &SpatialIndex, options: OpticsOptions) -> Vec<Cluster> {
    let OpticsOptions {
        epsilon,
        min_points,
        #[cfg(feature = "indicatif")]
        progress,
    } = options;

    let n = index.len();
    let mut records = vec![ReachRecord::new(); n];
    let mut clusters = Vec::new();

    #[cfg(feature = "indicatif")]
    if let Some(bar) = &progress {
        bar.set_length(n as u64);
    }

    for seed_idx in 0..n {
        let seed = PointId(seed_idx as u32);
        if records[seed_idx].processed {
            continue;
        }

        let mut cluster = Cluster::seeded(seed);
        records[seed_idx].processed = true;

        if let Some(core_sq) = core_distance_sq(index, seed, min_points, epsilon) {
            let neighbors = index.nearest(seed, -1, epsilon);
            let mut queue = ReachabilityQueue::new(n);
            update(index, seed, core_sq, &neighbors, &mut records, &mut queue);
            expand(index, &mut cluster, &mut records, &mut queue, epsilon, min_points);
        }

        clusters.push(cluster);

        #[cfg(feature = "indicatif")]
        if let Some(bar) = &progress {
            bar.set_position(cluster_progress(&clusters) as u64);
        }
    }

    #[cfg(feature = "indicatif")]
    if let Some(bar) = progress {
        bar.finish();
    }

    clusters
}

#[cfg(feature = "indicatif")]
fn cluster_progress(clusters: &[Cluster]) -> usize {
    clusters.iter().map(|c| c.points.len()).sum()
}

/// The squared distance from `p` to its `min_points`-th nearest neighbor,
/// or `None` when fewer than `min_points` neighbors lie within `epsilon`.
fn core_distance_sq(index: &SpatialIndex, p: PointId, min_points: usize, epsilon: f32) -> Option<f32> {
    let neighbors = index.nearest(p, min_points as isize, epsilon);
    if neighbors.len() == min_points {
        let farthest = *neighbors.last().unwrap();
        Some(Point::distance_squared(index.point(p), index.point(farthest)))
    } else {
        None
    }
}

/// For each unprocessed neighbor of `p`, records a tentative reachability
/// distance and either enqueues it for the first time or lowers its key.
fn update(
    index: &SpatialIndex,
    p: PointId,
    core_sq: f32,
    neighbors: &[PointId],
    records: &mut [ReachRecord],
    queue: &mut ReachabilityQueue,
) {
    for &q in neighbors {
        if records[q.index()].processed {
            continue;
        }

        let tentative = Point::distance_squared(index.point(p), index.point(q)).max(core_sq);
        match records[q.index()].reach_dist {
            None => {
                records[q.index()].reach_dist = Some(tentative);
                queue.push(q, records);
            }
            Some(current) if tentative < current => {
                records[q.index()].reach_dist = Some(tentative);
                queue.decrease_key(q, records);
            }
            _ => {}
        }
    }
}

/// Drains the reachability queue in ascending-reachability order, folding
/// each popped point into `cluster` and feeding its own neighbors back into
/// the same queue when it turns out to be a core point.
///
/// This is an explicit loop over `queue.pop()` rather than recursion, so
/// that expansion always observes the queue's current min-heap order
/// instead of whatever order its backing storage happens to hold.
fn expand(
    index: &SpatialIndex,
    cluster: &mut Cluster,
    records: &mut [ReachRecord],
    queue: &mut ReachabilityQueue,
    epsilon: f32,
    min_points: usize,
) {
    while let Some(q) = queue.pop(records) {
        if records[q.index()].processed {
            continue;
        }
        records[q.index()].processed = true;
        cluster.points.push(q);

        if let Some(core_sq) = core_distance_sq(index, q, min_points, epsilon) {
            let neighbors = index.nearest(q, -1, epsilon);
            update(index, q, core_sq, &neighbors, records, queue);
        }
    }
}
