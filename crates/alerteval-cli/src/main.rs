use clap::Parser;

mod cli;

use cli::Cli;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = cli::run(cli).await {
        eprintln!("fatal: {e:?}");
        std::process::exit(2);
    }
}
