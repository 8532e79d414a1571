use std::{collections::HashMap, time::Instant};

use petgraph::stable_graph::NodeIndex;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::graph::social_graph::SocialGraph;

/// Smallest distance used between two nodes, so coincident nodes still push apart.
const MIN_DISTANCE: f64 = 0.01;
/// Stop early once the mean per-node movement drops below this.
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

pub type Positions = HashMap<NodeIndex, Point>;

/// Fruchterman-Reingold parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Optimal distance between nodes.
    pub k: f64,
    pub iterations: u32,
    /// Seed for the initial random placement; the same seed gives the same picture.
    pub seed: u64,
    /// Multiplier for the attractive force along edges.
    pub c_attract: f64,
    /// Multiplier for the repulsive force between all node pairs.
    pub c_repulse: f64,
    pub center_gravity: bool,
    /// Strength of the pull toward the centroid when center_gravity is on.
    pub gravity: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        LayoutSettings {
            k: 0.15,
            iterations: 20,
            seed: 42,
            c_attract: 1.0,
            c_repulse: 1.0,
            center_gravity: false,
            gravity: 0.1,
        }
    }
}

/// Spring layout: random start in the unit square, linear cooling, then rescaled to [-1, 1].
pub fn spring_layout(graph: &SocialGraph, settings: &LayoutSettings) -> Positions {
    let started = Instant::now();
    let indices: Vec<NodeIndex> = graph.node_indices().collect();
    let n = indices.len();
    match n {
        0 => return Positions::new(),
        1 => return Positions::from([(indices[0], Point::default())]),
        _ => {}
    }

    let slot: HashMap<NodeIndex, usize> = indices.iter().enumerate().map(|(i, &ix)| (ix, i)).collect();

    // Dense weighted adjacency; the graphs drawn here are small.
    let mut adjacency = vec![0.0f64; n * n];
    for (a, b, link) in graph.edges() {
        let (i, j) = (slot[&a], slot[&b]);
        adjacency[i * n + j] = link.weight;
        adjacency[j * n + i] = link.weight;
    }

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut pos: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.random::<f64>(), rng.random::<f64>()))
        .collect();

    let k = settings.k;
    let mut temperature = 0.1 * extent(&pos);
    let cooling = temperature / (settings.iterations as f64 + 1.0);
    let mut iterations_run = 0;

    for _ in 0..settings.iterations {
        iterations_run += 1;
        let centroid = centroid(&pos);
        let mut moved = 0.0;
        let mut next = pos.clone();

        for i in 0..n {
            let (mut dx, mut dy) = (0.0, 0.0);
            for j in 0..n {
                if i == j {
                    continue;
                }
                let ddx = pos[i].x - pos[j].x;
                let ddy = pos[i].y - pos[j].y;
                let distance = (ddx * ddx + ddy * ddy).sqrt().max(MIN_DISTANCE);
                let repulse = settings.c_repulse * k * k / (distance * distance);
                let attract = settings.c_attract * adjacency[i * n + j] * distance / k;
                let force = repulse - attract;
                dx += ddx * force;
                dy += ddy * force;
            }
            if settings.center_gravity {
                dx -= settings.gravity * (pos[i].x - centroid.x);
                dy -= settings.gravity * (pos[i].y - centroid.y);
            }

            let mut length = (dx * dx + dy * dy).sqrt();
            if length < MIN_DISTANCE {
                length = 0.1;
            }
            let step_x = dx * temperature / length;
            let step_y = dy * temperature / length;
            next[i].x += step_x;
            next[i].y += step_y;
            moved += (step_x * step_x + step_y * step_y).sqrt();
        }

        pos = next;
        temperature -= cooling;
        if moved / (n as f64) < CONVERGENCE_THRESHOLD {
            break;
        }
    }

    rescale(&mut pos);
    log::debug!(
        "Spring layout of {} nodes converged after {} iterations in {:?}",
        n,
        iterations_run,
        started.elapsed()
    );
    indices.into_iter().zip(pos).collect()
}

fn extent(pos: &[Point]) -> f64 {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in pos {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (max_x - min_x).max(max_y - min_y)
}

fn centroid(pos: &[Point]) -> Point {
    let n = pos.len().max(1) as f64;
    let (sx, sy) = pos.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

// Centre on the origin and scale so the largest coordinate magnitude is 1.
fn rescale(pos: &mut [Point]) {
    let center = centroid(pos);
    let mut limit: f64 = 0.0;
    for p in pos.iter_mut() {
        p.x -= center.x;
        p.y -= center.y;
        limit = limit.max(p.x.abs()).max(p.y.abs());
    }
    if limit > 0.0 {
        for p in pos.iter_mut() {
            p.x /= limit;
            p.y /= limit;
        }
    }
}
