//! # Jelly Simulation
//!
//! [`Simulation`] owns the lattice state and the control frame and advances
//! them in fixed RK4 steps. Hosts call [`Simulation::update`] once per frame;
//! it runs however many steps the wall clock says are due, resolving wall
//! collisions after each one.

use std::time::Duration;

use fastrand::Rng;
use glam::Vec3;
use tracing::{debug, info, trace, warn};

use crate::bezier;
use crate::clock::{steps_due, Pacer};
use crate::collision::ConstraintBox;
use crate::disturbance;
use crate::energy;
use crate::forces::ForceModel;
use crate::frame::ControlFrame;
use crate::integrator::rk4;
use crate::lattice::{self, RestSpring, Spring, CORNER_COUNT, CORNER_INDICES, POINT_COUNT};
use crate::params::{SceneConfig, SimParams};
use crate::state::LatticeState;

/// Catch-up batches longer than this are logged as a stall.
const STALL_STEPS: u64 = 1_000;

pub struct Simulation {
    params: SimParams,
    scene: SceneConfig,

    reference: [Vec3; POINT_COUNT],
    springs: Vec<RestSpring>,
    short_springs: Vec<Spring>,

    control: ControlFrame,
    constraint: ConstraintBox,
    state: LatticeState,

    pacer: Pacer,
    rng: Rng,
}

impl Simulation {
    /// A stopped simulation with the lattice at rest in its reference shape.
    #[must_use]
    pub fn new(scene: SceneConfig, params: SimParams) -> Self {
        let reference = lattice::reference_positions(scene.cube_size);
        let springs = lattice::with_rest_lengths(&lattice::all_springs(), &reference);
        let rng = scene.seed.map_or_else(Rng::new, Rng::with_seed);

        Self {
            params,
            scene,
            reference,
            springs,
            short_springs: lattice::short_springs(),
            control: ControlFrame::new(scene.cube_size),
            constraint: ConstraintBox::new(scene.constraint_half_extents),
            state: LatticeState::at_rest(reference),
            pacer: Pacer::new(),
            rng,
        }
    }

    /// Start the clock from zero. Does nothing if already running.
    pub fn start(&mut self) {
        if self.pacer.start() {
            info!(dt = self.params.dt, "simulation started");
        }
    }

    /// Freeze the clock, keeping the current state.
    pub fn stop(&mut self) {
        if self.pacer.is_running() {
            self.pacer.stop();
            info!(
                steps = self.pacer.steps(),
                t = self.time(),
                "simulation stopped"
            );
        }
    }

    /// Stop and put the lattice back into its reference shape at rest.
    pub fn reset(&mut self) {
        self.pacer.reset();
        self.state = LatticeState::at_rest(self.reference);
        info!("simulation reset");
    }

    /// Run every step that is due by the wall clock. No-op when stopped.
    pub fn update(&mut self) {
        if !self.pacer.is_running() {
            return;
        }
        self.catch_up(self.pacer.elapsed());
    }

    /// Run steps until `elapsed` of simulated time has been covered.
    ///
    /// Returns the number of steps taken. Does nothing when stopped.
    pub fn catch_up(&mut self, elapsed: Duration) -> u64 {
        if !self.pacer.is_running() {
            return 0;
        }
        let target = steps_due(elapsed, self.params.dt);
        let due = target.saturating_sub(self.pacer.steps());
        if due > STALL_STEPS {
            warn!(steps = due, "large catch-up backlog");
        } else if due > 0 {
            debug!(steps = due, "catching up");
        }

        while self.pacer.steps() < target {
            self.step();
            self.pacer.record_step();
        }
        due
    }

    /// One fixed step: RK4 on the whole lattice, then wall collisions.
    ///
    /// Works regardless of the run state and does not touch the step counter.
    pub fn step(&mut self) {
        let anchors = self.control.world_corners();
        let model = ForceModel {
            params: &self.params,
            springs: &self.springs,
            anchors: &anchors,
        };

        let t = self.time();
        let y = self.state.to_array();
        let next = LatticeState::from_array(&rk4(t, self.params.dt, &y, |_, y| {
            model.derivative(y)
        }));

        if !next.is_finite() {
            warn!(t, "integration produced a non-finite state; step rejected");
            return;
        }
        self.state = next;

        let report = self.constraint.resolve(
            &mut self.state.positions,
            &mut self.state.velocities,
            self.params.collision_elasticity,
        );
        if report.reflections > 0 {
            trace!(reflections = report.reflections, clamped = report.clamped, "wall contact");
        }
    }

    /// Replace the particle state wholesale, e.g. to start from a deformed
    /// shape. The step counter and clock are untouched.
    pub fn set_state(&mut self, state: LatticeState) {
        self.state = state;
    }

    /// Kick every particle with a random velocity. Works in any run state.
    pub fn disturb(&mut self) {
        disturbance::disturb(
            &mut self.state.velocities,
            self.params.disturbance_velocity,
            &mut self.rng,
        );
        info!(max_speed = self.params.disturbance_velocity, "lattice disturbed");
    }

    /// Apply every tunable through its setter, so `dt` is still ignored while
    /// running.
    pub fn apply_params(&mut self, params: &SimParams) {
        self.set_dt(params.dt);
        self.set_mass(params.mass);
        self.set_internal_stiffness(params.internal_stiffness);
        self.set_external_stiffness(params.external_stiffness);
        self.set_damping(params.damping);
        self.set_collision_elasticity(params.collision_elasticity);
        self.set_disturbance_velocity(params.disturbance_velocity);
        self.set_external_springs(params.external_springs);
        self.set_gravity(params.gravity);
    }
}

// Read interface
impl Simulation {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.pacer.is_running()
    }

    /// Steps taken since the last start.
    #[must_use]
    pub fn iterations(&self) -> u64 {
        self.pacer.steps()
    }

    /// Simulated time since the last start.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.pacer.steps() as f32 * self.params.dt
    }

    #[must_use]
    pub fn state(&self) -> &LatticeState {
        &self.state
    }

    #[must_use]
    pub fn positions(&self) -> &[Vec3; POINT_COUNT] {
        &self.state.positions
    }

    #[must_use]
    pub fn velocities(&self) -> &[Vec3; POINT_COUNT] {
        &self.state.velocities
    }

    /// Current positions of the eight lattice corners.
    #[must_use]
    pub fn corners(&self) -> [Vec3; CORNER_COUNT] {
        CORNER_INDICES.map(|i| self.state.positions[i])
    }

    /// Undeformed lattice this run started from.
    #[must_use]
    pub fn reference_positions(&self) -> &[Vec3; POINT_COUNT] {
        &self.reference
    }

    /// All lattice springs with their rest lengths.
    #[must_use]
    pub fn springs(&self) -> &[RestSpring] {
        &self.springs
    }

    /// Short springs at the current positions, for drawing.
    #[must_use]
    pub fn internal_spring_segments(&self) -> Vec<(Vec3, Vec3)> {
        self.short_springs
            .iter()
            .map(|s| (self.state.positions[s.a], self.state.positions[s.b]))
            .collect()
    }

    /// Control corner to lattice corner, for drawing.
    #[must_use]
    pub fn external_spring_segments(&self) -> [(Vec3, Vec3); CORNER_COUNT] {
        let anchors = self.control.world_corners();
        let corners = self.corners();
        std::array::from_fn(|k| (anchors[k], corners[k]))
    }

    /// Map a point of the undeformed cube into the deformed lattice volume.
    #[must_use]
    pub fn deform(&self, point: Vec3) -> Vec3 {
        bezier::deform(&self.state.positions, self.scene.cube_size, point)
    }

    #[must_use]
    pub fn control_frame(&self) -> &ControlFrame {
        &self.control
    }

    pub fn control_frame_mut(&mut self) -> &mut ControlFrame {
        &mut self.control
    }

    #[must_use]
    pub fn constraint_box(&self) -> &ConstraintBox {
        &self.constraint
    }

    #[must_use]
    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    #[must_use]
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    #[must_use]
    pub fn particle_mass(&self) -> f32 {
        self.params.particle_mass()
    }

    #[must_use]
    pub fn kinetic_energy(&self) -> f32 {
        energy::kinetic(&self.state.velocities, self.particle_mass())
    }

    /// Kinetic plus the potential of every enabled force.
    #[must_use]
    pub fn total_energy(&self) -> f32 {
        let positions = &self.state.positions;
        let mut total = self.kinetic_energy()
            + energy::spring_potential(positions, &self.springs, self.params.internal_stiffness);
        if self.params.external_springs {
            total += energy::external_potential(
                positions,
                &self.control.world_corners(),
                self.params.external_stiffness,
            );
        }
        if self.params.gravity {
            total += energy::gravity_potential(positions, self.particle_mass());
        }
        total
    }
}

// Tunables
impl Simulation {
    #[must_use]
    pub fn dt(&self) -> f32 {
        self.params.dt
    }

    /// Ignored while running so an in-flight catch-up keeps its cadence.
    pub fn set_dt(&mut self, dt: f32) {
        if self.pacer.is_running() {
            debug!(dt, "time step change ignored while running");
            return;
        }
        self.params.dt = dt;
    }

    #[must_use]
    pub fn mass(&self) -> f32 {
        self.params.mass
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.params.mass = mass;
    }

    #[must_use]
    pub fn internal_stiffness(&self) -> f32 {
        self.params.internal_stiffness
    }

    pub fn set_internal_stiffness(&mut self, stiffness: f32) {
        self.params.internal_stiffness = stiffness;
    }

    #[must_use]
    pub fn external_stiffness(&self) -> f32 {
        self.params.external_stiffness
    }

    pub fn set_external_stiffness(&mut self, stiffness: f32) {
        self.params.external_stiffness = stiffness;
    }

    #[must_use]
    pub fn damping(&self) -> f32 {
        self.params.damping
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.params.damping = damping;
    }

    #[must_use]
    pub fn collision_elasticity(&self) -> f32 {
        self.params.collision_elasticity
    }

    pub fn set_collision_elasticity(&mut self, elasticity: f32) {
        self.params.collision_elasticity = elasticity;
    }

    #[must_use]
    pub fn disturbance_velocity(&self) -> f32 {
        self.params.disturbance_velocity
    }

    pub fn set_disturbance_velocity(&mut self, velocity: f32) {
        self.params.disturbance_velocity = velocity;
    }

    #[must_use]
    pub fn external_springs(&self) -> bool {
        self.params.external_springs
    }

    pub fn set_external_springs(&mut self, enabled: bool) {
        self.params.external_springs = enabled;
    }

    #[must_use]
    pub fn gravity(&self) -> bool {
        self.params.gravity
    }

    pub fn set_gravity(&mut self, enabled: bool) {
        self.params.gravity = enabled;
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SceneConfig::default(), SimParams::default())
    }
}
