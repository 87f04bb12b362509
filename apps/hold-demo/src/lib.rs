pub mod app;
pub mod config;
pub mod script;

use anyhow::Result;
use app::DemoApp;
use config::DemoConfig;
use holdpress_core::{StdClock, TimerRuntime};
use script::{default_script, ScriptRunner};

/// Shared entry point: runs the scripted session in real time and prints
/// the final state of both cards.
pub fn entry_point() -> Result<()> {
    let config = DemoConfig::from_env()?;
    let (short, long) = config.effective_delays();
    log::info!("short hold {short}ms, long hold {long}ms");

    let runtime = TimerRuntime::new();
    let mut app = DemoApp::new(runtime.handle(), &config);
    let mut runner = ScriptRunner::new(default_script(&config));
    runner.run_realtime(&mut app, &runtime, &StdClock::new());

    for card in app.cards() {
        let state = card.state();
        println!(
            "{:>5}: done = {:<5} background = {}",
            card.name(),
            state.done,
            state.background
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod script_tests;
