use clap::Parser;
use rover::Cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Exit decisions live here and nowhere else; rover::run reports the
    // outcome to the operator and the run log before returning.
    match rover::run(cli).await {
        Ok(outcome) if outcome.succeeded => {}
        _ => std::process::exit(1),
    }
}
