mod cli;
mod config;
mod platform;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    platform::logging::initialize(args.log, args.level());
    let config = config::AppConfig::load(args.config.as_deref())?.with_overrides(&args);
    platform::app::run(&args, config)
}
