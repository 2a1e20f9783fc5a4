use cloth_core::{ClothConfig, ClothSolver, GravityCommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

/// Packed particle record read by the JS host: 16 bytes, four f32 per particle
/// laid out as `[x, y, radius, inv_mass]`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuParticle {
    position: [f32; 2], // 8 bytes
    radius: f32,        // 4 bytes
    inv_mass: f32,      // 4 bytes
}

#[wasm_bindgen]
pub struct ClothWorld {
    solver: ClothSolver,
    gravity_command: GravityCommand,
    rng: StdRng,
    gpu_buffer: Vec<GpuParticle>,
    /// Flattened `[p0, p1, p0, p1, ...]` for line-list drawing; topology never changes.
    edge_indices: Vec<u32>,
}

#[wasm_bindgen]
impl ClothWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, cols: usize, shear_edges: bool) -> Result<ClothWorld, JsValue> {
        let defaults = ClothConfig::default();
        let config = defaults
            .clone()
            .with_mesh(rows, cols, defaults.rest_distance)
            .with_table_size(5 * rows * cols)
            .with_shear_edges(shear_edges);
        let gravity_command = GravityCommand::new(config.gravity.length());

        let solver = ClothSolver::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

        web_sys::console::log_1(
            &format!(
                "WASM ClothWorld created: {} particles, {} edges",
                solver.particle_count(),
                solver.edges().len()
            )
            .into(),
        );

        let gpu_buffer = vec![<GpuParticle as bytemuck::Zeroable>::zeroed(); solver.particle_count()];
        let edge_indices = solver.edges().iter().flat_map(|e| [e.p0, e.p1]).collect();

        let mut world = ClothWorld {
            solver,
            gravity_command,
            rng: StdRng::seed_from_u64(entropy_seed()),
            gpu_buffer,
            edge_indices,
        };
        world.write_gpu_output();
        Ok(world)
    }

    /// Advance one frame and return the time spent in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.solver.advance(dt);
        self.write_gpu_output();
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    /// Point gravity in a random direction, keeping its magnitude.
    #[wasm_bindgen]
    pub fn randomize_gravity(&mut self) {
        let gravity = self.gravity_command.randomize(&mut self.rng);
        self.solver.set_gravity(gravity);
        web_sys::console::log_1(
            &format!("GRAVITY CHANGED: X={:.2}, Y={:.2}", gravity.x, gravity.y).into(),
        );
    }

    #[wasm_bindgen]
    pub fn set_gravity(&mut self, x: f32, y: f32) {
        self.solver.set_gravity(glam::Vec2::new(x, y));
    }

    /// Replace the entropy-seeded generator with a deterministic one.
    #[wasm_bindgen]
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_ptr(&self) -> *const f32 {
        self.gpu_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_byte_length(&self) -> usize {
        bytemuck::cast_slice::<GpuParticle, u8>(&self.gpu_buffer).len()
    }

    #[wasm_bindgen]
    pub fn get_edge_buffer_ptr(&self) -> *const u32 {
        self.edge_indices.as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_edge_buffer_byte_length(&self) -> usize {
        bytemuck::cast_slice::<u32, u8>(&self.edge_indices).len()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.solver.particle_count()
    }

    #[wasm_bindgen]
    pub fn edge_count(&self) -> usize {
        self.solver.edges().len()
    }
}

impl ClothWorld {
    fn write_gpu_output(&mut self) {
        let radius = self.solver.config().particle_radius;
        let particles = self.solver.particles();
        for (i, gpu) in self.gpu_buffer.iter_mut().enumerate() {
            let pos = particles.position[i];
            *gpu = GpuParticle {
                position: pos.to_array(),
                radius,
                inv_mass: particles.inv_mass[i],
            };
        }
    }
}

/// Seed from the browser's crypto source, falling back to the clock.
fn entropy_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(_) => js_sys::Date::now().to_bits(),
    }
}
