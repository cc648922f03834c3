use clap::Parser;
use hygiene_application::QueryService;
use shaku::HasComponent;
use std::sync::Arc;

#[path = "../args.rs"]
mod args;
#[path = "../di.rs"]
mod di;

use crate::args::SourceArgs;

#[derive(Parser)]
#[command(name = "hygiene-query")]
#[command(about = "Print local authorities, or the rating breakdown of one authority", long_about = None)]
struct Cli {
    /// Local authority id; lists all authorities when omitted
    #[arg(long)]
    local_id: Option<String>,

    #[command(flatten)]
    source: SourceArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // One-shot process: nothing to gain from the cache.
    let module = di::create_app_module(&cli.source.to_config(), false)?;
    let service: Arc<dyn QueryService> = module.resolve();

    match cli.local_id {
        Some(local_id) => {
            let result = service.establishments(&local_id).await?;
            println!("Ratings for authority {} ({:?}):", result.local_id, result.duration);
            for row in result.output() {
                println!("  {:<28} {:>8}", row.name, row.rating);
            }
        }
        None => {
            let result = service.authorities().await?;
            println!("{} authorities ({:?}):", result.records.len(), result.duration);
            for row in result.output() {
                println!("  {:>6}  {}", row.local_id, row.name);
            }
        }
    }

    Ok(())
}
