use bencher::{benchmark_group, benchmark_main, Bencher};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use reachable::{cluster, Point, SpatialIndex};

benchmark_main!(benches);
benchmark_group!(benches, build_index, nearest_small_k, optics_cluster);

const SEED: u64 = 123456789;

fn random_points(n: usize) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..n).map(|_| Point::new(rng.gen(), rng.gen())).collect()
}

fn build_index(bench: &mut Bencher) {
    let points = random_points(1024);
    bench.iter(|| {
        let mut index = SpatialIndex::with_capacity(points.len());
        for &p in &points {
            index.insert(p);
        }
        index.finalize();
        index
    })
}

fn nearest_small_k(bench: &mut Bencher) {
    let points = random_points(1024);
    let mut index = SpatialIndex::with_capacity(points.len());
    let ids: Vec<_> = points.iter().map(|&p| index.insert(p)).collect();
    index.finalize();

    bench.iter(|| {
        for &id in &ids {
            index.nearest(id, 5, 0.1);
        }
    })
}

fn optics_cluster(bench: &mut Bencher) {
    let points = random_points(1024);
    let mut index = SpatialIndex::with_capacity(points.len());
    for &p in &points {
        index.insert(p);
    }
    index.finalize();

    bench.iter(|| cluster(&index, 0.05, 4))
}
