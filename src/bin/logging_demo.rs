//! Interactive demo host for the scoped-logging facade.
//!
//! Mirrors the classic logging-guide walkthrough: pick a scenario, then
//! drive log calls from single-character commands on stdin. Scenario 5 adds
//! a background timer that logs every five seconds.

use colored::Color;
use scoped_logging::prelude::*;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const CONFIG_PATH: &str = "demos/logging.json";

fn main() {
    let scenario = match read_scenario() {
        Ok(scenario) => scenario,
        Err(input) => {
            eprintln!("Invalid scenario selection: '{}'", input.trim());
            std::process::exit(2);
        }
    };

    let registry = match build_registry(scenario) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    let stop = Arc::new(AtomicBool::new(false));

    let timer_handle = (scenario == 5).then(|| {
        let logger = registry.logger("demo.timer");
        let stop = Arc::clone(&stop);
        thread::spawn(move || run_timer(&logger, &stop))
    });

    let reader_handle = {
        let logger = registry.logger("demo.host");
        let stop = Arc::clone(&stop);
        thread::spawn(move || run_read_loop(&logger, &stop))
    };

    // Shutdown is a drain, not an abort: the read loop (and timer, if any)
    // are awaited to completion before sinks are disposed.
    reader_handle.join().expect("read loop panicked");
    stop.store(true, Ordering::Release);
    if let Some(handle) = timer_handle {
        handle.join().expect("timer loop panicked");
    }

    registry.shutdown();
}

fn read_scenario() -> std::result::Result<u32, String> {
    if let Some(arg) = std::env::args().nth(1) {
        return parse_scenario(&arg);
    }

    print!("Enter scenario number (1-5): ");
    std::io::stdout().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| e.to_string())?;
    parse_scenario(&line)
}

fn parse_scenario(input: &str) -> std::result::Result<u32, String> {
    match input.trim().parse() {
        Ok(n @ 1..=5) => Ok(n),
        _ => Err(input.to_string()),
    }
}

fn build_registry(scenario: u32) -> scoped_logging::Result<LoggerRegistry> {
    let registry = match scenario {
        1 => {
            println!("...building registry with a plain Cyan sink.");
            LoggerRegistry::builder()
                .sink("Cyan", ConsoleSink::new(Color::Cyan))
                .build()
        }
        2 => {
            println!("...building registry with a scope-aware Green sink. Press 's' to see scopes.");
            LoggerRegistry::builder()
                .sink("Green", ConsoleSink::new(Color::Green).with_scopes(true))
                .build()
        }
        3 => {
            println!("...building registry with two sinks and filter rules in code.");
            LoggerRegistry::builder()
                .sink("Green", ConsoleSink::new(Color::Green).with_scopes(true))
                .sink("Cyan", ConsoleSink::new(Color::Cyan))
                .min_level(LogLevel::Warning)
                // Applies to all sinks and categories.
                .filter_fn(Arc::new(|_category, _level| true))
                // Applies only to Cyan; all categories.
                .rule(FilterRule::for_sink("Cyan", LogLevel::Critical))
                // Applies only to Green; only categories starting with "demo".
                .rule(FilterRule::new(Some("Green"), Some("demo"), LogLevel::Debug))
                .build()
        }
        4 => {
            println!("...building registry with two sinks and filter rules from {}.", CONFIG_PATH);
            let json = std::fs::read_to_string(CONFIG_PATH)?;
            let config = LoggingConfig::from_json(&json)?;
            LoggerRegistry::builder()
                .sink("Green", ConsoleSink::new(Color::Green).with_scopes(true))
                .sink("Cyan", ConsoleSink::new(Color::Cyan))
                .config(&config)?
                .build()
        }
        5 => {
            println!("...building registry with a Green sink and a 5s timer.");
            LoggerRegistry::builder()
                .sink("Green", ConsoleSink::new(Color::Green).with_scopes(true))
                .build()
        }
        _ => unreachable!("scenario already validated"),
    };
    Ok(registry)
}

fn run_read_loop(logger: &CategoryLogger, stop: &AtomicBool) {
    println!(
        "Commands: t=Trace d=Debug i=Information w=Warning e=Error c=Critical \
         l=state log, r=structured log, s=scoped log, q=quit"
    );

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if stop.load(Ordering::Acquire) {
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let Some(key) = line.trim().chars().next() else {
            continue;
        };

        match key.to_ascii_lowercase() {
            't' => logger.trace("Trace log."),
            'd' => logger.debug("Debug log."),
            'i' => logger.information("Information log."),
            'w' => logger.warning("Warning log."),
            'e' => logger.error("Error log."),
            'c' => logger.critical("Critical log."),
            'l' => log_with_state(logger),
            'r' => log_structured(logger),
            's' => log_with_scopes(logger),
            'q' => {
                stop.store(true, Ordering::Release);
                break;
            }
            other => logger.information(format!("`{}` pressed.", other)),
        }
    }
}

/// Dictionary-shaped state with a call-site formatter and an event id
fn log_with_state(logger: &CategoryLogger) {
    let state = LogState::new()
        .with_field("Key1", true)
        .with_field("Key2", "ABC");

    logger.log(
        LogLevel::Information,
        EventId::new(123),
        state,
        None,
        Arc::new(|state, _| format!("The state has {} items.", state.len())),
    );
}

/// Message-template logging with live values
fn log_structured(logger: &CategoryLogger) {
    logger.log_template(
        LogLevel::Information,
        "The time is '{Time}'. A correlation id is '{Id}'.",
        &[
            chrono::Utc::now().into(),
            format!("{:032x}", rand::random::<u128>()).into(),
        ],
    );
}

/// Nested scope demonstration: the innermost log sees all three frames
fn log_with_scopes(logger: &CategoryLogger) {
    let _outer = logger.begin_scope_template("{Key1}", &["A".into()]);
    do_something1(logger);
}

fn do_something1(logger: &CategoryLogger) {
    let _scope = logger.begin_scope_template("{Key2}", &["B".into()]);
    do_something2(logger);
}

fn do_something2(logger: &CategoryLogger) {
    let _scope = logger.begin_scope_template("{Key1} value is {Key2}", &["C".into(), "D".into()]);
    do_something3(logger);
}

fn do_something3(logger: &CategoryLogger) {
    logger.information("Logging with scope.");
}

fn run_timer(logger: &CategoryLogger, stop: &AtomicBool) {
    const PERIOD: Duration = Duration::from_secs(5);
    let mut next_fire = Instant::now() + PERIOD;

    while !stop.load(Ordering::Acquire) {
        if Instant::now() >= next_fire {
            logger.information("Timer fired.");
            next_fire += PERIOD;
        }
        thread::sleep(Duration::from_millis(100));
    }
}
