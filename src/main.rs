use clap::{CommandFactory, Parser};

use codeblocks::cli::{self, Args, Command};
use codeblocks::config::Config;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> codeblocks::Result<()> {
    match &args.command {
        Some(Command::Config { action }) => {
            return cli::handle_config_action(action, args.config.as_deref());
        }
        Some(Command::Cache { action }) => {
            let config = Config::load(args.config.as_deref())?;
            return cli::handle_cache_action(action, &config);
        }
        None => {}
    }

    let Some(input) = args.input.as_deref() else {
        Args::command().print_help()?;
        return Ok(());
    };

    let mut config = Config::load(args.config.as_deref())?;
    args.apply_to(&mut config);

    cli::generate(input, &config, args.output.as_deref(), args.format).await?;
    Ok(())
}
