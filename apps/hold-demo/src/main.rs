fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== holdpress Hold-to-Confirm Demo ===");
    println!("A scripted pointer session presses two hold buttons:");
    println!("  - the short button is held until it confirms");
    println!("  - the long button is released halfway, then held until it confirms");
    println!();
    println!("Set HOLD_DEMO_SHORT_DELAY_MS / HOLD_DEMO_LONG_DELAY_MS to change the delays,");
    println!("and RUST_LOG=debug to watch each hold start, tick and settle.");
    println!();

    hold_demo::entry_point()
}
