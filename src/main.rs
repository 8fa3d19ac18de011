use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use tiresias::cli::{Cli, Commands, ConfigAction};
use tiresias::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let config = load_config(cli.config.as_deref())?;
            if let Err(e) = tiresias::app::run_ask_command(
                config,
                cli.run,
                cli.audio,
                cli.image,
                cli.output,
                cli.no_play,
                cli.quiet,
                cli.verbose,
            )
            .await
            {
                eprintln!("{}", format!("Error: {}", e).red());
                if matches!(e, tiresias::TiresiasError::MissingCredential { .. }) {
                    eprintln!("Run `tiresias check` to verify your setup.");
                }
                std::process::exit(1);
            }
        }
        Some(Commands::Check) => {
            let config_path = cli
                .config
                .unwrap_or_else(Config::default_path);
            if !tiresias::diagnostics::check_dependencies(&config_path) {
                std::process::exit(1);
            }
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "tiresias", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/tiresias/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path())?
    };

    Ok(config.with_env_overrides())
}

/// Handle configuration commands.
fn handle_config_command(
    action: ConfigAction,
    custom_path: Option<&std::path::Path>,
) -> Result<()> {
    let config_path = custom_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(Config::default_path);

    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_or_default(&config_path)?.with_env_overrides();
            match config.get_value(&key) {
                Ok(value) => println!("{}", value),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            Config::set_value(&config_path, &key, &value)?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::Dump => {
            print!("{}", Config::dump_template());
        }
    }
    Ok(())
}
