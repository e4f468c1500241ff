#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
//! # Softbody: the jelly cube engine
//!
//! A deformable cube made of 64 point masses on a 4×4×4 grid, tied together
//! by springs and anchored at its eight corners to a rigid, user-driven
//! control frame. The lattice is integrated with the classical fourth-order
//! Runge-Kutta method at a fixed step, paced against the wall clock, and kept
//! inside an axis-aligned constraint box by reflecting collisions.
//!
//! ## Key Components
//!
//! -   **Integration:** [`integrator::rk4`] advances any fixed-size `f32`
//!     state vector. It knows nothing about particles.
//! -   **Topology:** [`lattice`] builds the reference geometry, the spring
//!     sets and the corner indices from a parametric [`lattice::CubeGrid`].
//! -   **Control frame:** [`ControlFrame`] is the rigid cube the lattice
//!     corners are pulled towards.
//! -   **Simulation:** [`Simulation`] owns the particle state, evaluates the
//!     force model, resolves wall collisions and runs the catch-up loop.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use softbody::{SceneConfig, SimParams, Simulation};
//!
//! let mut sim = Simulation::new(SceneConfig::default(), SimParams::default());
//! sim.start();
//! loop {
//!     sim.update();
//!     draw(sim.positions());
//! }
//! ```

pub mod bezier;
pub mod clock;
pub mod collision;
pub mod disturbance;
pub mod energy;
pub mod error;
pub mod forces;
pub mod frame;
pub mod integrator;
pub mod lattice;
pub mod params;
pub mod simulation;
pub mod state;

pub use collision::ConstraintBox;
pub use error::ParamError;
pub use frame::ControlFrame;
pub use lattice::{RestSpring, Spring, CORNER_COUNT, POINT_COUNT};
pub use params::{SceneConfig, SimParams, GRAVITY};
pub use simulation::Simulation;
pub use state::{LatticeState, StateVector, STATE_LEN};

pub use glam::Vec3;
