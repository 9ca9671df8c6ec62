use vidsign_core::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    // Telemetry, storage roots, signer credentials and routes
    let (_state, router) = vidsign_api::setup::initialize_app(config.clone()).await?;

    vidsign_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
