use std::{fs::OpenOptions, net::SocketAddr, process, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use category_api::{
    AppState, Error, build_router,
    config::StoreConfig,
    graceful_shutdown,
    stores::{CategoryStore, mongo::MongoCategoryStore, sqlite::SQLiteCategoryStore},
};

/// The REST API server for product categories.
///
/// Categories are stored in MongoDB, selected by `APP_STATUS`, unless
/// `--sqlite-path` is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The name of the MongoDB database.
    #[arg(long)]
    database: Option<String>,

    /// The name of the MongoDB collection holding the categories.
    #[arg(long)]
    collection: Option<String>,

    /// File path to a SQLite database to use instead of MongoDB.
    #[arg(long)]
    sqlite_path: Option<String>,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let result = match &args.sqlite_path {
        Some(path) => match open_sqlite_store(path) {
            Ok(store) => serve(addr, store).await,
            Err(error) => Err(error),
        },
        None => match connect_mongo_store(&args).await {
            Ok(store) => serve(addr, store).await,
            Err(error) => Err(error),
        },
    };

    if let Err(error) = result {
        tracing::error!("{error}");
        process::exit(1);
    }
}

fn open_sqlite_store(path: &str) -> Result<SQLiteCategoryStore, String> {
    let connection = Connection::open(path)
        .map_err(|error| format!("Could not open SQLite database at {path}: {error}"))?;

    SQLiteCategoryStore::new(connection).map_err(|error| error.to_string())
}

async fn connect_mongo_store(args: &Args) -> Result<MongoCategoryStore, String> {
    let mut config = StoreConfig::from_env().map_err(|error| error.to_string())?;

    if let Some(database) = &args.database {
        config.database = database.clone();
    }
    if let Some(collection) = &args.collection {
        config.collection = collection.clone();
    }

    tracing::info!(
        "Connecting to collection \"{}\" in database \"{}\"",
        config.collection,
        config.database
    );

    MongoCategoryStore::connect(&config)
        .await
        .map_err(|error: Error| error.to_string())
}

async fn serve<S>(addr: SocketAddr, store: S) -> Result<(), String>
where
    S: CategoryStore,
{
    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(AppState::new(store)));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .map_err(|error| format!("Server error: {error}"))
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let debug_log = match OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
    {
        Ok(log_file) => Some(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(Arc::new(log_file)),
        ),
        Err(error) => {
            eprintln!("Could not create log file, logging to stdout only: {error}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are converted to responses.
        .on_failure(());

    router.layer(tracing_layer)
}
