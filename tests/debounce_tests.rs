//! Integration tests for DebouncedButton

mod common;
use common::*;

use core::cell::Cell;

use button_sequencer::config::DEBOUNCE_MS;
use button_sequencer::{DebouncedButton, TransitionStamp};

#[test]
fn starts_released() {
    let level = Cell::new(false);
    let timer = MockTimeSource::new();
    let stamp = TransitionStamp::new();
    let mut button = DebouncedButton::new(MockButton::new(&level), &timer, &stamp, ms(DEBOUNCE_MS));

    timer.set_time(500);
    assert!(!button.state());
    assert!(!button.last_state());
}

#[test]
fn burst_faster_than_window_changes_output_at_most_once() {
    let level = Cell::new(false);
    let timer = MockTimeSource::new();
    let stamp = TransitionStamp::new();
    let mut button = DebouncedButton::new(MockButton::new(&level), &timer, &stamp, ms(DEBOUNCE_MS));

    // Raw level flips every 5 ms for 25 ms, ending released
    let flips = [(1000, true), (1005, false), (1010, true), (1015, false), (1020, true), (1025, false)];

    let mut previous = button.state();
    let mut changes = 0;
    for t in 1000..=1030 {
        if let Some((_, raw)) = flips.iter().find(|(when, _)| *when == t) {
            level.set(*raw);
        }
        timer.set_time(t);
        let state = button.state();
        if state != previous {
            changes += 1;
            previous = state;
        }
    }
    assert!(changes <= 1);

    // Once settled the output follows the final raw level
    timer.set_time(1030 + DEBOUNCE_MS + 10);
    assert_eq!(button.state(), level.get());
}

#[test]
fn edge_interrupt_suppresses_bounce_until_contacts_settle() {
    let level = Cell::new(false);
    let timer = MockTimeSource::new();
    let stamp = TransitionStamp::new();
    let mut button = DebouncedButton::new(MockButton::new(&level), &timer, &stamp, ms(DEBOUNCE_MS));

    // Contacts bounce every 20 ms; the edge interrupt marks each press edge
    let start = 2000;
    let mut changes = 0;
    let mut previous = false;
    for t in start..start + 200 {
        let offset = t - start;
        if offset % 20 == 0 {
            let pressed = (offset / 20) % 2 == 0;
            level.set(pressed);
            if pressed {
                stamp.mark(at(t));
            }
        }
        timer.set_time(t);
        let state = button.state();
        if state != previous {
            changes += 1;
            previous = state;
        }
    }
    assert!(changes <= 1);

    // Settle pressed
    level.set(true);
    stamp.mark(at(start + 200));
    timer.set_time(start + 200 + DEBOUNCE_MS);
    assert!(!button.state());
    timer.set_time(start + 200 + DEBOUNCE_MS + 1);
    assert!(button.state());
}

#[test]
fn accepted_transition_updates_shared_stamp() {
    let level = Cell::new(false);
    let timer = MockTimeSource::new();
    let stamp = TransitionStamp::new();
    let mut button = DebouncedButton::new(MockButton::new(&level), &timer, &stamp, ms(DEBOUNCE_MS));

    level.set(true);
    timer.set_time(300);
    assert!(button.state());
    assert_eq!(stamp.get(), at(300));

    // Release inside the window is held off
    level.set(false);
    timer.set_time(320);
    assert!(button.state());
    timer.set_time(336);
    assert!(!button.state());
    assert_eq!(button.stamp().get(), at(336));
}

#[test]
fn works_across_counter_wrap() {
    let level = Cell::new(false);
    let timer = MockTimeSource::new();
    let stamp = TransitionStamp::new();
    let mut button = DebouncedButton::new(MockButton::new(&level), &timer, &stamp, ms(DEBOUNCE_MS));

    stamp.mark(at(u32::MAX - 10));
    level.set(true);

    timer.set_time(u32::MAX - 10);
    timer.advance(20);
    assert!(!button.state());

    timer.advance(20);
    assert!(button.state());
}

#[test]
fn edge_stamped_after_sample_time_still_holds_off() {
    let level = Cell::new(false);
    let timer = MockTimeSource::new();
    let stamp = TransitionStamp::new();
    let mut button = DebouncedButton::new(MockButton::new(&level), &timer, &stamp, ms(DEBOUNCE_MS));

    // The interrupt preempts the loop between its clock read and the sample
    level.set(true);
    stamp.mark(at(1001));
    assert!(!button.sample(at(1000)));

    // Same-millisecond stamp is inside the window too
    stamp.mark(at(1000));
    assert!(!button.sample(at(1000)));

    assert!(!button.sample(at(1000 + DEBOUNCE_MS)));
    assert!(button.sample(at(1001 + DEBOUNCE_MS)));
}

#[test]
fn long_idle_stamp_does_not_block_presses() {
    let level = Cell::new(false);
    let timer = MockTimeSource::new();
    let stamp = TransitionStamp::new();
    let mut button = DebouncedButton::new(MockButton::new(&level), &timer, &stamp, ms(DEBOUNCE_MS));

    // Last transition more than half the counter range ago
    stamp.mark(at(1000));
    level.set(true);
    assert!(button.sample(at(1000 + u32::MAX / 2 + 100)));
}
