use armillary::Point;
use clap::Parser;
use orrery::config;
use orrery::gui::app::{AppModel, WINDOW_SIZE};
use orrery::gui::theme::Theme;
use orrery::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "orrery", version, about = "A clickable tabletop orrery", long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start on the dark table background
    #[arg(long)]
    dark: bool,

    /// Write the default configuration file and print its path
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let cfg = config::load_or_default(cli.config.as_deref());
    let theme = Theme::from_config(&cfg)?;
    let center = Point::new(f64::from(WINDOW_SIZE) / 2.0, f64::from(WINDOW_SIZE) / 2.0);
    let scene = cfg.build_scene(center)?;
    let dark_mode = cli.dark || cfg.dark_mode;

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx, cli.config.clone());

    let app = RelmApp::new("org.pact.orrery");
    app.run::<AppModel>((scene, theme, dark_mode, cli.config, rx));
    Ok(())
}
