use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    maitre_lib::run(maitre_lib::Cli::parse()).await
}
