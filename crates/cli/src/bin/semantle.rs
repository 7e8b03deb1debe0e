use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    semantle_cli::main_entry().await
}
