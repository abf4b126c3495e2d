use std::{process, sync::Arc};

use recipes_api::{
    application::{error::AppError, recipes::RecipeService, repos::RecipesRepo},
    cache::{self, CacheConfig},
    config::{self, StoreBackendKind},
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, RecipesState},
        memory::MemoryRecipesRepo,
        telemetry,
    },
};
use tokio::signal;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Import(args) => run_import(settings, args).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let service = build_service(&settings).await?;
    let router = http::build_router(RecipesState::new(service));

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(addr = %settings.server.addr, "recipes service listening");

    let drain = settings.server.graceful_shutdown;
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal());

    let serve = async move {
        server
            .await
            .map_err(|err| AppError::unexpected(format!("server error: {err}")))
    };
    tokio::pin!(serve);

    tokio::select! {
        result = &mut serve => result,
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(drain).await;
        } => {
            warn!(timeout = ?drain, "graceful shutdown timed out, dropping open connections");
            Ok(())
        }
    }
}

async fn run_import(settings: config::Settings, args: config::ImportArgs) -> Result<(), AppError> {
    let payload = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|err| AppError::from(InfraError::import_file(&args.file, err)))?;

    let service = build_service(&settings).await?;
    let imported = service.import_recipes(&payload).await?;

    info!(
        file = %args.file.display(),
        imported,
        "recipes imported"
    );
    Ok(())
}

async fn build_service(settings: &config::Settings) -> Result<RecipeService, AppError> {
    let store = init_store(&settings.store).await?;
    let cache_config = CacheConfig::from(&settings.cache);
    let cache = cache::connect(&cache_config).await;

    info!(
        store = ?settings.store.backend,
        cache = cache.provider_name(),
        "recipe service initialised"
    );

    Ok(RecipeService::new(store, cache).with_list_ttl(cache_config.list_ttl))
}

async fn init_store(store: &config::StoreSettings) -> Result<Arc<dyn RecipesRepo>, AppError> {
    match store.backend {
        StoreBackendKind::Memory => Ok(Arc::new(MemoryRecipesRepo::new())),
        StoreBackendKind::Postgres => {
            let url = store
                .url
                .as_ref()
                .ok_or(InfraError::MissingStoreUrl)
                .map_err(AppError::from)?;

            let pool = PostgresRepositories::connect(
                url,
                store.max_connections.get(),
                store.acquire_timeout,
            )
            .await
            .map_err(|err| AppError::from(InfraError::from(err)))?;

            PostgresRepositories::run_migrations(&pool)
                .await
                .map_err(|err| AppError::from(InfraError::from(err)))?;

            Ok(Arc::new(PostgresRepositories::new(pool)))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}
