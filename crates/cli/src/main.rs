use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(err) = synthpool_cli::run(synthpool_cli::args::Cli::parse()).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
