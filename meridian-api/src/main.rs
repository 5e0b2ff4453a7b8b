use meridian_api::{app, state::{AppState, AuthConfig, ExamAppState}};
use meridian_exam::{AccountDirectory, ExamCatalog};
use meridian_store::{JsonFileStore, SnapshotStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = meridian_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Meridian API on port {}", config.server.port);

    let snapshot =
        JsonFileStore::new(&config.storage.data_dir).expect("Failed to open snapshot store");
    let snapshot: Arc<dyn SnapshotStore> = Arc::new(snapshot);

    let users = snapshot.load_users().expect("Failed to load user accounts");
    let mut exams = snapshot.load_exams().expect("Failed to load exams");
    let results = snapshot.load_results().expect("Failed to load results");

    if exams.is_empty() {
        exams = meridian_store::seed::sample_exams();
        if let Err(e) = snapshot.save_exams(&exams) {
            tracing::warn!("failed to persist sample exams: {}", e);
        }
        tracing::info!("installed {} sample exams", exams.len());
    }

    let reservations =
        meridian_store::seed::sample_reservation_store().expect("Failed to seed demo inventory");

    let exam_state = ExamAppState::new(
        AccountDirectory::from_accounts(users),
        ExamCatalog::from_parts(exams, results),
    );

    let app_state = AppState::new(
        reservations,
        exam_state,
        snapshot,
        AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
