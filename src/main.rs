use std::io;

use four_chess::console::console_top::run_stdio_loop;
use four_chess::engine::config::EngineConfig;
use four_chess::engine::game_engine::GameEngine;
use four_chess::variants::variant_trait::Variant;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    // Replies go to stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let mut config = EngineConfig::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--ffa" => config.variant = Variant::FreeForAll,
            "--block-after-result" => config.block_moves_after_result = true,
            other => tracing::warn!(arg = other, "ignoring unknown argument"),
        }
    }

    let mut engine = GameEngine::with_config(config);
    if let Err(err) = engine.new_game() {
        tracing::error!(error = %err, "could not set up the starting position");
    }
    run_stdio_loop(engine)
}
