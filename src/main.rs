use clap::Parser;
use fractal_weaver::{Cli, CliController, NeverCancel, PpmFilePresenter, TileScheduler};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let scheduler = match cli.workers {
        Some(workers) => TileScheduler::new(workers)?,
        None => TileScheduler::with_available_parallelism()?,
    };

    let controller = CliController::new(PpmFilePresenter::new(), &scheduler);
    let result = controller.run(&cli.command, &NeverCancel);
    drop(controller);
    scheduler.shutdown();

    Ok(result?)
}
