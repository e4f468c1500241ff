use softbody::{LatticeState, SceneConfig, SimParams, Simulation, Vec3};

fn seeded(seed: u64) -> Simulation {
    Simulation::new(
        SceneConfig {
            seed: Some(seed),
            ..SceneConfig::default()
        },
        SimParams::default(),
    )
}

#[test]
fn disturb_leaves_positions_alone() {
    let mut sim = seeded(9);
    let before = *sim.positions();
    sim.disturb();
    assert_eq!(*sim.positions(), before);
    assert!(sim.velocities().iter().any(|v| *v != Vec3::ZERO));
    assert!(!sim.is_running());
}

#[test]
fn mean_squared_kick_scales_with_speed_squared() {
    let mut sim = seeded(1234);
    let trials = 200;

    for max_speed in [2.0_f32, 6.0] {
        sim.set_disturbance_velocity(max_speed);
        let mut sum = 0.0;
        for _ in 0..trials {
            sim.set_state(LatticeState::default());
            sim.disturb();
            sum += sim.velocities().iter().map(|v| v.length_squared()).sum::<f32>();
        }
        let mean = sum / (trials * 64) as f32;
        // E[u^2] = 1/3 for u uniform on [0, 1]
        let expected = max_speed * max_speed / 3.0;
        assert!(
            (mean - expected).abs() < 0.05 * expected,
            "max_speed={max_speed} mean={mean} expected={expected}"
        );
    }
}

#[test]
fn kick_adds_to_existing_velocity() {
    let mut sim = seeded(5);
    sim.set_disturbance_velocity(1.0);
    let mut state = sim.state().clone();
    state.velocities = [Vec3::new(100.0, 0.0, 0.0); 64];
    sim.set_state(state);
    sim.disturb();
    for v in sim.velocities() {
        assert!((*v - Vec3::new(100.0, 0.0, 0.0)).length() <= 1.0 + 1e-4);
    }
}

#[test]
fn same_seed_same_kick() {
    let mut a = seeded(77);
    let mut b = seeded(77);
    a.disturb();
    b.disturb();
    assert_eq!(a.velocities(), b.velocities());
}
