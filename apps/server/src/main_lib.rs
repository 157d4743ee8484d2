use std::sync::Arc;

use crate::config::{Config, LogFormat};
use crate::templates;
use giftlist_core::recipients::{ListOrganizer, ListOrganizerTrait};
use giftlist_storage_sqlite::{
    create_pool, gifts::GiftRepository, init, recipients::RecipientRepository, spawn_writer,
};
use tera::Tera;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

pub struct AppState {
    pub organizer: Arc<dyn ListOrganizerTrait + Send + Sync>,
    pub templates: Tera,
}

fn fmt_layer<W>(format: LogFormat, writer: W, ansi: bool) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Text => fmt::layer().with_ansi(ansi).with_writer(writer).boxed(),
    }
}

/// Installs the global subscriber. Library crates log through `log`, which
/// the subscriber picks up as well.
///
/// When a log file is configured the returned guard must be held until
/// shutdown so buffered lines get flushed.
pub fn init_tracing(config: &Config) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (layer, guard) = match &config.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("GL_LOG_FILE has no file name: {}", path.display()))?;
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (fmt_layer(config.log_format, non_blocking, false), Some(guard))
        }
        None => (fmt_layer(config.log_format, std::io::stdout, true), None),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;
    Ok(guard)
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    let writer = spawn_writer((*pool).clone());

    let recipient_repository = Arc::new(RecipientRepository::new(pool.clone(), writer.clone()));
    let gift_repository = Arc::new(GiftRepository::new(pool.clone(), writer));
    let organizer: Arc<dyn ListOrganizerTrait + Send + Sync> = Arc::new(
        ListOrganizer::new(recipient_repository, gift_repository)
            .with_tax_rate(config.sales_tax_rate),
    );
    tracing::info!("Sales tax rate: {}", config.sales_tax_rate);

    Ok(Arc::new(AppState {
        organizer,
        templates: templates::load()?,
    }))
}
