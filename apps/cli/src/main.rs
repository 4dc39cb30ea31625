#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cardport_cli::run().await
}
