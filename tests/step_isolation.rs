mod common;

use common::{run_log, Recorder, SimulationBuilder};
use glam::DVec3;

#[test]
fn test_daughter_not_visited_in_creating_step() {
    let log = run_log();
    let mut divider = Recorder::logging(&log);
    divider.divide_at = Some(0);
    let (mut sim, ids) = SimulationBuilder::new()
        .with_cell(DVec3::ZERO, 10.0, vec![Box::new(divider)])
        .build();
    let a = ids[0];

    sim.step().unwrap();
    assert_population!(sim.ecm, 2);
    let daughter = sim.ecm.ids()[1];
    assert!(log.lock().unwrap().iter().all(|(_, id)| *id != daughter));

    sim.step().unwrap();
    let entries = log.lock().unwrap().clone();
    assert_eq!(entries, vec![(0, a), (1, a), (1, daughter)]);
}

#[test]
fn test_every_snapshot_cell_runs_once_despite_divisions() {
    let log = run_log();
    let mut builder = SimulationBuilder::new();
    for i in 0..5 {
        let mut r = Recorder::logging(&log);
        r.divide_at = Some(0);
        builder = builder.with_cell(DVec3::new(i as f64 * 30.0, 0.0, 0.0), 20.0, vec![Box::new(r)]);
    }
    let (mut sim, ids) = builder.build();

    sim.step().unwrap();
    let visited: Vec<_> = log.lock().unwrap().iter().map(|(_, id)| *id).collect();
    assert_eq!(visited, ids);
    assert_population!(sim.ecm, 10);
    assert_eq!(sim.ecm.last_step().visited, 5);
    assert_eq!(sim.ecm.last_step().born, 5);
}

#[test]
fn test_each_module_runs_once_per_step() {
    let log = run_log();
    let first = Recorder::logging(&log);
    let mut second = Recorder::logging(&log);
    second.divide_at = Some(0);
    let (mut sim, ids) = SimulationBuilder::new()
        .with_cell(DVec3::ZERO, 10.0, vec![Box::new(first), Box::new(second)])
        .build();

    sim.step().unwrap();
    let state = sim.ecm.get(ids[0]).unwrap().snapshot();
    assert_eq!(state.modules.len(), 2);
    assert_eq!(state.modules[0].state["runs"], 1);
    assert_eq!(state.modules[1].state["runs"], 1);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn test_module_added_during_step_runs_next_step() {
    let log = run_log();
    let mut spawner = Recorder::logging(&log);
    spawner.spawn_module_at = Some(0);
    let (mut sim, ids) = SimulationBuilder::new()
        .with_cell(DVec3::ZERO, 10.0, vec![Box::new(spawner)])
        .build();
    let a = ids[0];

    sim.step().unwrap();
    let cell = sim.ecm.get(a).unwrap();
    assert_eq!(cell.module_count(), 2);
    assert!(cell.modules().iter().all(|m| m.cell() == Some(a)));
    assert_eq!(log.lock().unwrap().len(), 1);

    sim.step().unwrap();
    assert_eq!(log.lock().unwrap().len(), 3);
}

#[test]
fn test_retired_module_is_detached_after_pass() {
    let log = run_log();
    let mut quitter = Recorder::logging(&log);
    quitter.retire_at = Some(0);
    let stayer = Recorder::logging(&log);
    let (mut sim, ids) = SimulationBuilder::new()
        .with_cell(DVec3::ZERO, 10.0, vec![Box::new(quitter), Box::new(stayer)])
        .build();

    sim.step().unwrap();
    assert_eq!(log.lock().unwrap().len(), 2);
    assert_eq!(sim.ecm.get(ids[0]).unwrap().module_count(), 1);

    sim.step().unwrap();
    assert_eq!(log.lock().unwrap().len(), 3);
}

#[test]
fn test_removal_applies_at_step_boundary() {
    let (mut sim, ids) = SimulationBuilder::new()
        .with_config(|c| {
            c.senescence.enabled = true;
            c.senescence.lifespan_steps = 2;
            c.simulation.initial_population = 2;
        })
        .build();

    sim.step().unwrap();
    assert_population!(sim.ecm, 2);
    sim.step().unwrap();
    assert_population!(sim.ecm, 0);
    assert!(ids.iter().all(|id| !sim.ecm.contains(*id)));
    assert_eq!(sim.ecm.last_step().removed, 2);
    assert_eq!(sim.metrics.removals(), 2);
}

#[test]
fn test_second_scheduler_does_not_replay_step() {
    use cellsim_lib::model::{Scheduler, SimError};

    let log = run_log();
    let (mut sim, ids) = SimulationBuilder::new()
        .with_cell(DVec3::ZERO, 10.0, vec![Box::new(Recorder::logging(&log))])
        .build();

    let mut rival = Scheduler::new(&sim.ecm);
    sim.step().unwrap();
    assert!(matches!(
        rival.simulate_one_step(&mut sim.ecm),
        Err(SimError::StepOutOfSync { .. })
    ));

    sim.step().unwrap();
    assert_eq!(*log.lock().unwrap(), vec![(0, ids[0]), (1, ids[0])]);
    assert_eq!(sim.ecm.clock(), 2);
}
