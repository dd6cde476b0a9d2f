use clap::Parser;
use pamm_calc::cli::{Cli, Commands};
use pamm_calc::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if std::path::Path::new(&cli.config).exists() {
        Config::load(&cli.config)?
    } else {
        eprintln!("Warning: {} not found, using defaults", cli.config);
        Config::default()
    };

    // Initialize telemetry
    pamm_calc::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Odds(args) => args.execute(&config, cli.json)?,
        Commands::Quote(args) => args.execute(&config, cli.json).await?,
        Commands::Payout(args) => args.execute(cli.json)?,
        Commands::Phase(args) => args.execute(&config, cli.json)?,
        Commands::Conviction(args) => args.execute(&config, cli.json)?,
        Commands::Market(args) => args.execute(&config, cli.json).await?,
        Commands::Markets(args) => args.execute(&config, cli.json).await?,
        Commands::Watch(args) => args.execute(&config, cli.json).await?,
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
