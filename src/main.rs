mod app;
mod config;
mod input;
mod model;
mod player;
mod render;
mod rng;
mod sim;
mod terrain;
mod treasure;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
