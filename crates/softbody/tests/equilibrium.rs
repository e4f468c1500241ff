use std::time::Duration;

use softbody::forces::spring_force;
use softbody::lattice::{all_springs, reference_positions, with_rest_lengths};
use softbody::{SceneConfig, SimParams, Simulation, Vec3};

fn resting_params() -> SimParams {
    SimParams {
        internal_stiffness: 50.0,
        damping: 0.03,
        gravity: false,
        external_springs: false,
        dt: 0.005,
        ..SimParams::default()
    }
}

#[test]
fn reference_lattice_has_no_internal_force() {
    for size in [Vec3::ONE, Vec3::new(2.0, 0.5, 1.5)] {
        let reference = reference_positions(size);
        for spring in with_rest_lengths(&all_springs(), &reference) {
            let f = spring_force(&spring, &reference, 50.0);
            assert_eq!(f, Vec3::ZERO, "spring {}-{}", spring.a, spring.b);
        }
    }
}

#[test]
fn undisturbed_cube_stays_at_rest_for_one_second() {
    let mut sim = Simulation::new(SceneConfig::default(), resting_params());
    sim.start();
    let steps = sim.catch_up(Duration::from_secs(1));
    assert_eq!(steps, 200);
    assert_eq!(sim.iterations(), 200);

    for (p, r) in sim.positions().iter().zip(sim.reference_positions()) {
        assert!((*p - *r).length() < 1e-5, "moved from {r:?} to {p:?}");
    }
    assert!(sim.velocities().iter().all(|v| v.length() < 1e-5));
}

#[test]
fn rest_shape_is_identity_deformation() {
    let sim = Simulation::new(SceneConfig::default(), resting_params());
    for p in [Vec3::ZERO, Vec3::new(0.4, -0.2, 0.1), Vec3::splat(-0.5)] {
        assert!((sim.deform(p) - p).length() < 1e-5);
    }
}
