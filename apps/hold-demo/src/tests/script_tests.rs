use crate::app::{progress_background, CardId, DemoApp, IDLE_BACKGROUND};
use crate::config::{DemoConfig, DEFAULT_LONG_DELAY_MS, LONG_DELAY_ENV, SHORT_DELAY_ENV};
use crate::script::{default_script, ScriptRunner};
use holdpress_core::TimerRuntime;
use holdpress_foundation::PointerEventKind;

#[test]
fn config_defaults_without_environment() {
    let config = DemoConfig::from_lookup(|_| None).expect("defaults parse");
    assert_eq!(config, DemoConfig::default());
    assert_eq!(config.effective_delays(), (400.0, DEFAULT_LONG_DELAY_MS));
}

#[test]
fn config_reads_overrides() {
    let config = DemoConfig::from_lookup(|key| match key {
        SHORT_DELAY_ENV => Some("150".to_string()),
        LONG_DELAY_ENV => Some(" 900 ".to_string()),
        _ => None,
    })
    .expect("overrides parse");

    assert_eq!(config.short_delay_ms, Some(150.0));
    assert_eq!(config.long_delay_ms, Some(900.0));
}

#[test]
fn config_rejects_malformed_delay() {
    let error = DemoConfig::from_lookup(|key| {
        (key == LONG_DELAY_ENV).then(|| "forever".to_string())
    })
    .expect_err("malformed delay must fail");

    assert!(error.to_string().contains(LONG_DELAY_ENV));
}

#[test]
fn default_script_alternates_presses_and_releases() {
    let script = default_script(&DemoConfig::default());
    assert_eq!(script.len(), 6);
    for pair in script.chunks(2) {
        assert_eq!(pair[0].kind, PointerEventKind::Down);
        assert_eq!(pair[1].kind, PointerEventKind::Up);
        assert_eq!(pair[0].card, pair[1].card);
        assert!(pair[0].at_ms < pair[1].at_ms);
    }
    assert!(script.windows(2).all(|w| w[0].at_ms < w[1].at_ms));
}

#[test]
fn scripted_session_confirms_both_buttons() {
    let config = DemoConfig {
        short_delay_ms: Some(100.0),
        long_delay_ms: Some(300.0),
    };
    let runtime = TimerRuntime::new();
    let mut app = DemoApp::new(runtime.handle(), &config);
    let mut runner = ScriptRunner::new(default_script(&config));

    runner.run_virtual(&mut app, &runtime);

    assert!(runner.is_finished());
    assert!(!runtime.has_pending_intervals());
    assert!(app.card(CardId::Short).state().done);
    // Abandoned once, then confirmed once.
    assert!(app.card(CardId::Long).state().done);
    assert_eq!(
        app.card(CardId::Long).state().background,
        progress_background(31.0 / 30.0)
    );
    assert_ne!(app.card(CardId::Short).state().background, IDLE_BACKGROUND);
}

#[test]
fn scripted_session_partial_run_shows_progress() {
    let config = DemoConfig {
        short_delay_ms: Some(100.0),
        long_delay_ms: Some(300.0),
    };
    let runtime = TimerRuntime::new();
    let mut app = DemoApp::new(runtime.handle(), &config);
    let mut runner = ScriptRunner::new(default_script(&config));

    // The short press lands at 200ms; three ticks later the bar is at 40%.
    runner.run_until(&mut app, &runtime, 230);

    assert!(!runner.is_finished());
    assert_eq!(
        app.card(CardId::Short).state().background,
        progress_background(0.4)
    );
}
