use env_logger::{Builder, Env, Target};
use log::error;
use manga_chain::{run, Cli, Settings};
use std::process;

#[tokio::main]
async fn main() {
    // Init logging
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Stdout);
    builder.init();

    // Parse Args
    let cli = Cli::new();

    // Parse Settings
    let settings = match Settings::load(&cli.config_file, Some(&cli)) {
        Ok(s) => s,
        Err(e) => {
            error!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    // Run
    if let Err(e) = run(settings).await {
        error!("Application error: {}", e);
        process::exit(1);
    }
}
