use glam::Vec2;

/// Distance constraint between two particles, fixed at mesh setup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Particle index A.
    pub p0: u32,
    /// Particle index B.
    pub p1: u32,
    /// Distance the constraint drives the pair toward.
    pub rest_distance: f32,
}

impl Edge {
    pub fn new(p0: u32, p1: u32, rest_distance: f32) -> Self {
        Self {
            p0,
            p1,
            rest_distance,
        }
    }
}

/// Row-major particle positions for a `rows x cols` mesh.
///
/// Particle at (x, y) has index `x + cols * y` and sits at
/// `origin + (x, y) * spacing`.
pub fn grid_positions(rows: usize, cols: usize, spacing: f32, origin: Vec2) -> Vec<Vec2> {
    let mut positions = Vec::with_capacity(rows * cols);
    for y in 0..rows {
        for x in 0..cols {
            positions.push(Vec2::new(x as f32, y as f32) * spacing + origin);
        }
    }
    positions
}

/// Build the edge list of a rectangular mesh.
///
/// Structural edges connect horizontal and vertical neighbours:
/// `rows * (cols - 1) + (rows - 1) * cols` in total. With `shear` both
/// diagonals of every quad are added as well (rest = spacing * sqrt(2)).
pub fn grid_edges(rows: usize, cols: usize, spacing: f32, shear: bool) -> Vec<Edge> {
    let mut edges = Vec::new();
    if rows == 0 || cols == 0 {
        return edges;
    }
    let idx = |x: usize, y: usize| (x + cols * y) as u32;

    // Horizontal + vertical, one right and one down edge per interior quad corner.
    for y in 0..rows - 1 {
        for x in 0..cols - 1 {
            edges.push(Edge::new(idx(x, y), idx(x + 1, y), spacing));
            edges.push(Edge::new(idx(x, y), idx(x, y + 1), spacing));
        }
    }

    // Last row.
    for x in 0..cols - 1 {
        edges.push(Edge::new(idx(x, rows - 1), idx(x + 1, rows - 1), spacing));
    }

    // Last column.
    for y in 0..rows - 1 {
        edges.push(Edge::new(idx(cols - 1, y), idx(cols - 1, y + 1), spacing));
    }

    if shear {
        let diag = (spacing * spacing * 2.0).sqrt();
        for y in 0..rows - 1 {
            for x in 0..cols - 1 {
                edges.push(Edge::new(idx(x, y), idx(x + 1, y + 1), diag));
            }
        }
        for y in 0..rows - 1 {
            for x in 0..cols - 1 {
                edges.push(Edge::new(idx(x + 1, y), idx(x, y + 1), diag));
            }
        }
    }

    edges
}
