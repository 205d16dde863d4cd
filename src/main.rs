use httpwire::config::Config;
use httpwire::http::request::Request;
use httpwire::http::response::{StatusCode, default_headers};
use httpwire::http::writer::{ResponseWriter, WriterError};
use httpwire::server::Server;
use tokio::net::tcp::OwnedWriteHalf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let server = Server::serve(&cfg.listen_addr, handle).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    server.close();

    Ok(())
}

async fn handle(writer: ResponseWriter<OwnedWriteHalf>, request: Request) {
    // Write errors mid-response cannot be undone; log and move on
    if let Err(err) = respond(writer, &request).await {
        tracing::error!("Failed to write response: {}", err);
    }
}

async fn respond(
    mut writer: ResponseWriter<OwnedWriteHalf>,
    request: &Request,
) -> Result<(), WriterError> {
    let body = format!("Hello, you requested {}\n", request.request_line.target);

    writer.write_status_line(StatusCode::Ok).await?;
    writer.write_headers(&default_headers(body.len())).await?;
    writer.write_body(body.as_bytes()).await?;

    Ok(())
}
