use clap::Parser;
use fifths::config;
use fifths::gui::app::AppModel;
use fifths::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fifths", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the one in the user config directory
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the default config file (if missing), print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    if cli.write_config {
        config::write_default_config(&config_path)?;
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = config::load_or_default(&config_path);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(config_path.clone(), tx);

    // arguments are handled above, keep GTK from parsing them again
    let app = RelmApp::new("org.fifths.wheel").with_args(Vec::new());

    app.run::<AppModel>((config, config_path, rx));
    Ok(())
}
