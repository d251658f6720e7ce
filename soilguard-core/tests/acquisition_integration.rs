//! Integration tests for the acquisition loop
//!
//! Drives `AcquisitionManager` through simulated time with a scripted board:
//! timer behaviour, debounced presence, validity bypass and change
//! detection against the 5 s baseline.

mod common;

use common::{run_for, ScriptedBoard, BOARD_DEBOUNCE_MS};
use soilguard_core::{
    AcquisitionConfig, AcquisitionManager, DigitalChannel, ManualClock, PhysicalSample,
    SensorSelector,
};

const WINDOW: usize = 4;

fn manager(clock: &ManualClock) -> AcquisitionManager<ScriptedBoard<'_>, &ManualClock, WINDOW> {
    AcquisitionManager::new(ScriptedBoard::new(clock), clock, AcquisitionConfig::default())
}

#[test]
fn full_cycles_follow_interval() {
    let clock = ManualClock::new(0);
    let mut manager = manager(&clock);
    manager.init();
    assert_eq!(manager.read_count(), 1);

    // 10 s of 10 ms ticks: one full cycle per second
    run_for(&mut manager, &clock, 10_000, 10);
    assert_eq!(manager.read_count(), 11);
    assert_eq!(manager.hardware().analog_reads, 11);
}

#[test]
fn press_becomes_presence() {
    let clock = ManualClock::new(0);
    let mut manager = manager(&clock);
    manager.init();

    manager.hardware_mut().press(DigitalChannel::Phosphorus);
    run_for(&mut manager, &clock, 200, 10);
    assert!(manager.data().phosphorus);
    assert!(!manager.data().potassium);
    assert_eq!(manager.raw_data().phosphorus_state, 1);

    manager.hardware_mut().release(DigitalChannel::Phosphorus);
    run_for(&mut manager, &clock, 200, 10);
    assert!(!manager.data().phosphorus);
    assert!(!manager.last_presence(DigitalChannel::Phosphorus));
}

#[test]
fn presence_published_before_next_full_cycle() {
    let clock = ManualClock::new(0);
    let mut manager = manager(&clock);
    clock.set(1000);
    assert!(manager.update(false));
    let reads = manager.read_count();

    manager.hardware_mut().press(DigitalChannel::Potassium);
    run_for(&mut manager, &clock, 150, 5);

    assert!(manager.data().potassium);
    // No full cycle was needed
    assert_eq!(manager.read_count(), reads);
}

#[test]
fn bounce_shorter_than_window_is_ignored() {
    let clock = ManualClock::new(0);
    let mut manager = manager(&clock);
    manager.init();
    run_for(&mut manager, &clock, 100, 10);

    // Contact closes for less than the debounce window, then opens again
    manager.hardware_mut().press(DigitalChannel::Phosphorus);
    run_for(&mut manager, &clock, BOARD_DEBOUNCE_MS - 20, 10);
    manager.hardware_mut().release(DigitalChannel::Phosphorus);
    let changed = run_for(&mut manager, &clock, 500, 10);

    assert!(!manager.data().phosphorus);
    assert!(!manager.last_presence(DigitalChannel::Phosphorus));
    assert_eq!(changed, 0);
}

#[test]
fn out_of_range_temperature_leaves_history() {
    let clock = ManualClock::new(0);
    let mut manager = manager(&clock);
    manager.init();
    let before = *manager.filters().temperature_history();

    manager.hardware_mut().temperature = 150.0;
    assert!(manager.update(true));

    assert_eq!(manager.data().temperature, 150.0);
    assert_eq!(manager.filters().temperature_history(), &before);
    assert!(manager
        .data()
        .check_ranges(manager.config())
        .is_err());

    // Humidity still went through the filter on the same cycle
    assert_ne!(manager.filters().humidity_history(), &[50.0; WINDOW]);
}

#[test]
fn histories_stay_index_aligned() {
    let clock = ManualClock::new(0);
    let mut manager = manager(&clock);

    for i in 0..6u16 {
        manager.hardware_mut().adc = 100 * (i + 1);
        manager.hardware_mut().temperature = 20.0 + f32::from(i);
        manager.hardware_mut().humidity = 40.0 + f32::from(i);
        manager.acquire_cycle();
    }

    let filters = manager.filters();
    assert_eq!(filters.cursor(), 6 % WINDOW);
    for slot in 0..WINDOW {
        let cycle = filters.ph_history()[slot] / 100 - 1;
        assert_eq!(filters.temperature_history()[slot], 20.0 + f32::from(cycle));
        assert_eq!(filters.humidity_history()[slot], 40.0 + f32::from(cycle));
    }
}

#[test]
fn moving_average_converges() {
    let clock = ManualClock::new(0);
    let mut manager = manager(&clock);
    manager.hardware_mut().temperature = 30.0;

    for _ in 0..WINDOW - 1 {
        manager.acquire_cycle();
        assert!(manager.data().temperature < 30.0);
    }
    manager.acquire_cycle();
    assert_eq!(manager.data().temperature, 30.0);
}

#[test]
fn sensor_changed_within_reference_window() {
    let clock = ManualClock::new(0);
    let config = AcquisitionConfig::default();
    let mut manager: AcquisitionManager<_, _, 1> =
        AcquisitionManager::new(ScriptedBoard::new(&clock), &clock, config);

    manager.hardware_mut().adc = 1000;
    manager.acquire_cycle();

    // First call after the window elapsed refreshes the baseline
    clock.set(5001);
    assert!(!manager.sensor_changed(SensorSelector::Ph, 1.0));

    // pH moves by ~2.0 inside the same window
    manager.hardware_mut().adc = 1000 + 585;
    manager.acquire_cycle();
    let delta = manager.data().ph - manager.reference().baseline().ph;
    assert!((delta - 2.0).abs() < 0.01, "delta {delta}");

    clock.advance(100);
    assert!(manager.sensor_changed(SensorSelector::Ph, 1.0));
    clock.advance(100);
    assert!(manager.sensor_changed(SensorSelector::Ph, 1.0));

    // Next refresh: unchanged regardless of delta
    manager.hardware_mut().adc = 4095;
    manager.acquire_cycle();
    clock.set(10_202);
    assert!(!manager.sensor_changed(SensorSelector::Ph, 1.0));
    assert_eq!(manager.reference().refreshed_at(), 10_202);
}

#[test]
fn sensor_changed_digital_and_unknown() {
    let clock = ManualClock::new(0);
    let mut manager = manager(&clock);
    manager.init();

    clock.set(6000);
    assert!(!manager.sensor_changed(SensorSelector::Potassium, 0.0));

    manager.hardware_mut().press(DigitalChannel::Potassium);
    run_for(&mut manager, &clock, 100, 10);
    assert!(manager.sensor_changed(SensorSelector::Potassium, 0.0));
    assert!(!manager.sensor_changed(SensorSelector::Phosphorus, 0.0));
    assert!(!manager.sensor_changed_code(42, 0.0));
    assert!(manager.sensor_changed_code(3, 0.0));
}

#[test]
fn published_sample_matches_conversion() {
    let clock = ManualClock::new(0);
    let mut manager = manager(&clock);
    manager.init();
    run_for(&mut manager, &clock, 5000, 50);

    assert_eq!(*manager.data(), PhysicalSample::from_raw(manager.raw_data()));
}
