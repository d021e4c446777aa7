use std::{sync::Arc, time::Duration};

use casgate_adapters::{
    CasGateSettings, CasTicketValidator, HashMapSessionStore, RedisSessionStore,
};
use casgate_core::{Authenticator, SessionStore};
use casgate_service::CasService;
use color_eyre::eyre::Result;
use redis::Client;
use reqwest::Client as HttpClient;
use tokio::{net::TcpListener, sync::RwLock};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = CasGateSettings::load()?;

    let http_client = HttpClient::builder()
        .timeout(settings.cas_request_timeout())
        .build()?;
    let authenticator = CasTicketValidator::new(
        settings.cas.server_url_prefix.clone(),
        settings.cas.protocol,
        settings.cas.attributes.clone(),
        http_client,
    );

    match &settings.redis {
        Some(redis) => {
            let redis_client = Client::open(format!("redis://{}/", redis.host_name))?;
            let redis_conn = Arc::new(RwLock::new(redis_client.get_connection()?));
            let session_store = RedisSessionStore::new(redis_conn, settings.session.ttl_secs);
            serve(&settings, authenticator, session_store).await
        }
        None => {
            tracing::warn!("No Redis configured, sessions are kept in memory");
            let session_store =
                HashMapSessionStore::with_ttl(Duration::from_secs(settings.session.ttl_secs));
            serve(&settings, authenticator, session_store).await
        }
    }
}

async fn serve<A, S>(settings: &CasGateSettings, authenticator: A, session_store: S) -> Result<()>
where
    A: Authenticator + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let service = CasService::new(settings, authenticator, session_store)?;

    let listener = TcpListener::bind(&settings.server.address).await?;
    tracing::info!("Starting CAS gateway...");

    service.run_standalone(listener).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
