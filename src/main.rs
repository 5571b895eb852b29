use std::sync::Arc;

use anyhow::Context;
use tower_http::compression::CompressionLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use green_market::adapters::auth::{Argon2PasswordHasher, JwtTokenService};
use green_market::adapters::email::LoggingVerificationNotifier;
use green_market::adapters::http::{
    api_router, cors_layer, ApiState, ProductAppState, UserAppState, WebhookAppState,
};
use green_market::adapters::postgres::{
    connect_pool, run_migrations, PostgresCategoryRepository, PostgresPaymentRepository,
    PostgresProductRepository, PostgresUserRepository,
};
use green_market::application::{PaymentProcessor, ProductCatalog, UserAccounts};
use green_market::config::AppConfig;
use green_market::domain::payment::CallbackTokenVerifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config);

    let pool = connect_pool(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
        info!("Database migrations applied");
    }

    let tokens = Arc::new(JwtTokenService::new(
        &config.auth.jwt_secret(),
        config.auth.token_ttl(),
    ));
    let timeout = config.server.request_timeout();

    let user_service = Arc::new(UserAccounts::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
        tokens.clone(),
        Arc::new(LoggingVerificationNotifier::new(
            config.auth.verification_url.clone(),
        )),
        config.auth.verification_code_ttl(),
    ));
    let product_service = Arc::new(ProductCatalog::new(
        Arc::new(PostgresProductRepository::new(pool.clone())),
        Arc::new(PostgresCategoryRepository::new(pool.clone())),
    ));
    let payments_service = Arc::new(PaymentProcessor::new(Arc::new(
        PostgresPaymentRepository::new(pool.clone()),
    )));

    let state = ApiState {
        users: UserAppState {
            user_service,
            timeout,
        },
        products: ProductAppState {
            product_service,
            timeout,
        },
        webhooks: WebhookAppState {
            payments_service,
            verifier: Arc::new(CallbackTokenVerifier::new(config.payment.callback_token())),
            timeout,
        },
        auth: tokens,
    };

    let app = api_router(state)
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config.server.cors_origins_list()));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, environment = ?config.server.environment, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = wait_or_pend("ctrl-c", Ok::<_, std::io::Error>(tokio::signal::ctrl_c()));

    #[cfg(unix)]
    let terminate = async {
        let listener = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .map(|mut signal| async move {
                signal.recv().await;
                Ok::<(), std::io::Error>(())
            });
        wait_or_pend("SIGTERM", listener).await
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

/// Resolves when the signal arrives. A listener that could not be installed
/// or that fails never resolves, so it cannot trigger a shutdown.
async fn wait_or_pend<F>(name: &'static str, listener: std::io::Result<F>)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    let received = match listener {
        Ok(signal) => signal.await,
        Err(e) => Err(e),
    };
    if let Err(e) = received {
        tracing::error!(signal = name, error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
