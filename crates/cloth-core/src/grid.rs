use glam::{IVec2, Vec2};

/// Chebyshev-1 neighbourhood of a cell: the cell itself plus its 8 neighbours.
const NEIGHBOR_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(0, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// Uniform spatial hash grid for O(1) neighbor queries.
///
/// Uses counting sort for O(N) construction: count particles per slot -> prefix sum -> scatter.
/// Distinct cells that land in the same slot share its range; callers reject
/// those false positives with a distance check.
pub struct SpatialHashGrid {
    spacing: f32,
    table_size: usize,
    /// cell_bounds[hash]..cell_bounds[hash + 1] is the slot's range in `cell_entries`.
    /// Length is `table_size + 1`; the last entry is the guard closing the final range.
    cell_bounds: Vec<u32>,
    /// Particle indices grouped by slot, valid for the positions of the last rebuild.
    cell_entries: Vec<u32>,
}

impl SpatialHashGrid {
    /// Create a grid with the given cell spacing, slot count and particle count.
    ///
    /// Both arrays are sized here and only overwritten afterwards.
    pub fn new(spacing: f32, table_size: usize, particle_count: usize) -> Self {
        debug_assert!(spacing > f32::EPSILON, "spatial hash spacing must be > EPSILON");
        debug_assert!(table_size > 0, "spatial hash needs at least one slot");
        Self {
            spacing,
            table_size,
            cell_bounds: vec![0u32; table_size + 1],
            cell_entries: vec![0u32; particle_count],
        }
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// Number of indexed particles.
    pub fn len(&self) -> usize {
        self.cell_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_entries.is_empty()
    }

    /// Rebuild the index from current positions.
    /// O(N) using counting sort, no allocation.
    pub fn rebuild(&mut self, positions: &[Vec2]) {
        debug_assert!(
            positions.len() == self.cell_entries.len(),
            "positions and cell_entries must have the same length"
        );

        // 1. Clear
        self.cell_bounds.fill(0);

        // 2. Count per slot
        for &pos in positions {
            let h = self.hash_position(pos);
            self.cell_bounds[h] += 1;
        }

        // 3. Inclusive prefix sum: counts -> end offsets
        let mut running = 0u32;
        for bound in self.cell_bounds.iter_mut() {
            running += *bound;
            *bound = running;
        }

        // 4. Scatter; decrementing walks each slot's bound back down to its start
        for (i, &pos) in positions.iter().enumerate() {
            let h = self.hash_position(pos);
            self.cell_bounds[h] -= 1;
            self.cell_entries[self.cell_bounds[h] as usize] = i as u32;
        }
    }

    /// Entries of slot `hash` from the last rebuild.
    pub fn cell_entries(&self, hash: usize) -> &[u32] {
        debug_assert!(hash < self.table_size, "hash {hash} out of bounds");
        let start = self.cell_bounds[hash] as usize;
        let end = self.cell_bounds[hash + 1] as usize;
        &self.cell_entries[start..end]
    }

    pub fn cell_entries_count(&self, hash: usize) -> usize {
        debug_assert!(hash < self.table_size, "hash {hash} out of bounds");
        (self.cell_bounds[hash + 1] - self.cell_bounds[hash]) as usize
    }

    /// Query every slot in the 3x3 cell neighbourhood of `pos`.
    /// Calls `callback(particle_index)` for each entry found in those slots.
    /// The caller is responsible for distance checks.
    pub fn query_neighbors<F: FnMut(u32)>(&self, pos: Vec2, mut callback: F) {
        let cell = self.cell_coords(pos);
        for offset in NEIGHBOR_OFFSETS {
            let h = self.hash_cell(cell.wrapping_add(offset));
            for &idx in self.cell_entries(h) {
                callback(idx);
            }
        }
    }

    /// Hash function: cell coords -> slot index
    #[inline]
    pub fn hash_cell(&self, cell: IVec2) -> usize {
        let h = (cell.x as u32).wrapping_mul(73856093) ^ (cell.y as u32).wrapping_mul(19349663);
        (h as usize) % self.table_size
    }

    /// Convert world position to cell coordinates
    #[inline]
    pub fn cell_coords(&self, pos: Vec2) -> IVec2 {
        (pos / self.spacing).floor().as_ivec2()
    }

    #[inline]
    pub fn hash_position(&self, pos: Vec2) -> usize {
        self.hash_cell(self.cell_coords(pos))
    }
}
