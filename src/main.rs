#[tokio::main]
async fn main() -> anyhow::Result<()> {
    production_console::run_console().await
}
