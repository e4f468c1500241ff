use std::time::Duration;

use softbody::{SceneConfig, SimParams, Simulation};

fn still() -> Simulation {
    Simulation::new(
        SceneConfig::default(),
        SimParams {
            external_springs: false,
            gravity: false,
            ..SimParams::default()
        },
    )
}

#[test]
fn second_start_does_not_reset_the_counter() {
    let mut sim = still();
    sim.start();
    sim.catch_up(Duration::from_millis(50));
    assert_eq!(sim.iterations(), 10);

    sim.start();
    assert!(sim.is_running());
    assert_eq!(sim.iterations(), 10);
}

#[test]
fn restart_after_stop_resets_the_counter() {
    let mut sim = still();
    sim.start();
    sim.catch_up(Duration::from_millis(50));
    sim.stop();
    assert_eq!(sim.iterations(), 10);
    assert!((sim.time() - 0.05).abs() < 1e-6);

    sim.start();
    assert_eq!(sim.iterations(), 0);
    assert_eq!(sim.time(), 0.0);
}

#[test]
fn catch_up_covers_irregular_frames() {
    let mut sim = still();
    sim.start();
    let frames = [3_u64, 16, 17, 40, 41, 200, 1000];
    let mut total = 0;
    for ms in frames {
        total += sim.catch_up(Duration::from_millis(ms));
    }
    assert_eq!(total, 200);
    assert_eq!(sim.iterations(), 200);
}

#[test]
fn update_follows_the_wall_clock() {
    let mut sim = still();
    sim.start();
    std::thread::sleep(Duration::from_millis(30));
    sim.update();
    // at least the 6 steps that fit into the sleep
    assert!(sim.iterations() >= 6, "iterations={}", sim.iterations());

    sim.stop();
    let frozen = sim.iterations();
    std::thread::sleep(Duration::from_millis(20));
    sim.update();
    assert_eq!(sim.iterations(), frozen);
}

#[test]
fn step_size_is_locked_while_running() {
    let mut sim = still();
    sim.start();
    sim.set_dt(0.05);
    assert_eq!(sim.dt(), 0.005);
    assert_eq!(sim.catch_up(Duration::from_millis(100)), 20);
}
