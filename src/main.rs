use log::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>>
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    if dotenvy::dotenv().is_err()
    {   warn!(".env file not found, using environment variables");
    }

    let config = hexpal::ServiceConfig::from_env();
    let server = hexpal::ServerConfig::from_env();
    let addr = server.socket_addr()?;

    let app = hexpal::server::router(
      hexpal::PaletteService::new(config)
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server starting on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
