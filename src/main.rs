use std::path::PathBuf;

use anyhow::Context;
use haunted_house::{
    app::HauntedHouseApp,
    config::{WorldConfig, CONFIG_ENV_VAR},
    world::WorldContext,
};
use rand::{rngs::StdRng, SeedableRng};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
    let config = WorldConfig::load_or_default(config_path.as_deref())
        .context("failed to load configuration")?;

    let seed = config.resolve_seed();
    log::info!("Graveyard seed: {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let world = WorldContext::from_config(&config, &mut rng)?;
    let frames = HauntedHouseApp::new(world, config.window.clone()).run()?;
    log::info!("Rendered {frames} frames");
    Ok(())
}
