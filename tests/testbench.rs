mod common;

use common::*;
use embedded_hal::delay::DelayNs;
use sh1106_testbench::{bring_up, config, Millis, Stage, StageScheduler, TestBench};

#[test]
fn ten_seconds_of_ticks_visit_every_stage_once() {
    let (display, _) = display();
    let time = SimTime::default();
    let mut bench = TestBench::new(display, time.clone());

    let mut visited = vec![];
    let mut held = vec![];
    let mut transitions = 0;
    let mut last = None;

    // t = 0, 50, ..., 10000
    for _ in 0..=200 {
        let stage = bench.step().unwrap();
        if last != Some(stage) {
            if last.is_some() {
                transitions += 1;
            }
            visited.push(stage);
            held.push(0);
        }
        *held.last_mut().unwrap() += 1;
        last = Some(stage);
        time.clone().delay_ms(config::LOOP_DELAY_MS);
    }

    assert_eq!(transitions, 5);
    assert_eq!(
        visited,
        vec![Stage::Welcome, Stage::Shapes, Stage::Circles, Stage::Text, Stage::Combined, Stage::Welcome]
    );
    // every stage but the last runs for 2000 ms, 40 ticks
    assert_eq!(&held[..5], &[40, 40, 40, 40, 40]);
    assert_eq!(bench.scheduler().last_transition(), Millis(10_000));
    // one flush of 8 pages per tick
    assert_eq!(bench.display().backend().data_transfers().len(), 201 * 8);
    // the combined stage ran for 40 ticks
    assert_eq!(bench.renderer().counter().count(), 40);
}

#[test]
fn console_reports_switches_stages_and_the_counter() {
    capture_console();
    let (display, _) = display();
    let time = SimTime::default();
    let mut bench = TestBench::new(display, time.clone());

    for _ in 0..=200 {
        bench.step().unwrap();
        time.clone().delay_ms(config::LOOP_DELAY_MS);
    }

    let lines = console_lines();
    let switches: Vec<&String> = lines.iter().filter(|l| l.contains("switching to stage")).collect();
    assert_eq!(switches.len(), 5);
    for (line, (secs, stage)) in switches.iter().zip([(2, 2), (4, 3), (6, 4), (8, 5), (10, 1)]) {
        assert!(
            line.starts_with(&format!("[time] {} s - switching to stage {} ", secs, stage)),
            "{}",
            line
        );
    }

    // the first frame of every stage, repeats stay below the board's filter
    let entered: Vec<&String> = lines
        .iter()
        .filter(|l| l.starts_with("[stage ") && !l.contains("cycle counter"))
        .collect();
    let numbers: Vec<&str> = entered.iter().map(|l| &l[7..8]).collect();
    assert_eq!(numbers, vec!["1", "2", "3", "4", "5", "1"]);

    // 40 combined frames, counter shown as 0..=39
    let counters: Vec<&str> = lines
        .iter()
        .filter(|l| l.contains("cycle counter"))
        .map(|l| l.as_str())
        .collect();
    assert_eq!(counters, vec!["[stage 5] cycle counter: 0", "[stage 5] cycle counter: 20"]);
}

#[test]
fn a_stalled_loop_advances_one_stage_at_a_time() {
    let (display, _) = display();
    let time = SimTime::default();
    let mut bench = TestBench::new(display, time.clone());

    assert_eq!(bench.step().unwrap(), Stage::Welcome);
    time.advance_ms(7_000);
    assert_eq!(bench.step().unwrap(), Stage::Shapes);
    assert_eq!(bench.step().unwrap(), Stage::Shapes);
    time.advance_ms(2_000);
    assert_eq!(bench.step().unwrap(), Stage::Circles);
}

#[test]
fn custom_stage_duration() {
    let (display, _) = display();
    let time = SimTime::default();
    let mut bench = TestBench::with_scheduler(display, time.clone(), StageScheduler::new(500));

    time.advance_ms(499);
    assert_eq!(bench.step().unwrap(), Stage::Welcome);
    time.advance_ms(1);
    assert_eq!(bench.step().unwrap(), Stage::Shapes);
}

#[test]
fn bring_up_waits_for_power_then_blanks_the_panel() {
    let (mut display, log) = display();
    let mut time = SimTime::default();

    capture_console();
    bring_up(&mut display, &mut time).unwrap();

    // 2 s settle, 2 x 100 ms around init, 21 ms reset pulse
    assert!(time.now_ms() >= config::POWER_SETTLE_MS + 2 * config::PANEL_SETTLE_MS + 20);
    // the reset pulse happens after the power settle wait
    assert_eq!(log.borrow().len(), 3);

    let commands = display.backend().commands();
    assert!(commands.windows(2).any(|w| w == [0x81, config::DEFAULT_CONTRAST]));
    assert!(display.is_display_on());
    assert!(display.framebuffer().iter().all(|b| *b == 0));
    // init clears RAM once, bring-up flushes the blank buffer again
    assert_eq!(display.backend().data_transfers().len(), 16);

    // one progress line per 100 ms of the power settle wait
    let lines = console_lines();
    let progress: Vec<&String> = lines
        .iter()
        .filter(|l| l.starts_with("[step 1] ") && l.ends_with(" ms"))
        .collect();
    assert_eq!(progress.len(), config::POWER_SETTLE_STEPS as usize);
    assert_eq!(progress.first().map(|l| l.as_str()), Some("[step 1] 100 ms"));
    assert_eq!(progress.last().map(|l| l.as_str()), Some("[step 1] 2000 ms"));
}
