use kitchen_core::ai::{AiClient, CachingAiClient, FakeAiClient};
use kitchen_server::config::ServerConfig;
use kitchen_server::store::{InMemoryStore, PgStore, Store};
use kitchen_server::{api, create_router, db, telemetry, AppContext};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        return match api::openapi().to_pretty_json() {
            Ok(spec) => {
                println!("{}", spec);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to serialize OpenAPI spec: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    telemetry::init_telemetry();

    match run(ServerConfig::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => Arc::new(PgStore::new(db::create_pool(url)?)),
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data is lost on restart");
            Arc::new(InMemoryStore::new())
        }
    };

    let ai: Arc<dyn AiClient> = if config.fake_ai {
        tracing::warn!("KITCHEN_AI_FAKE is set, serving canned AI responses");
        Arc::new(FakeAiClient::with_sample_responses())
    } else {
        let client = CachingAiClient::from_env()?;
        tracing::info!(model = client.model(), "Using AI provider");
        Arc::new(client)
    };

    let bind_addr = config.bind_addr.clone();
    let app = create_router(Arc::new(AppContext { store, ai, config }));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let addr = listener.local_addr()?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("OpenAPI spec available at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
