use reachable::{cluster, Point, SpatialIndex};

fn main() {
    let coords = [
        (1.0, 1.0),
        (0.0, 1.0),
        (1.0, 0.0),
        (10.0, 10.0),
        (10.0, 11.0),
        (11.0, 10.0),
        (50.0, 50.0),
        (51.0, 50.0),
        (50.0, 51.0),
        (50.0, 49.0),
        (100.0, 100.0),
    ];

    let mut index = SpatialIndex::with_capacity(coords.len());
    for &(x, y) in &coords {
        index.insert(Point::new(x, y));
    }
    index.finalize();

    let clusters = cluster(&index, 4.0, 3);
    for (i, c) in clusters.iter().enumerate() {
        let members: Vec<(f32, f32)> = c
            .points
            .iter()
            .map(|&id| {
                let p = index.point(id);
                (p.x, p.y)
            })
            .collect();
        println!("cluster {i}: {members:?}");
    }
}
