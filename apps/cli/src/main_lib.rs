use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use wageclock_core::{
    events::DomainEventSink, tracker::SnapshotRepositoryTrait, StartOutcome, TrackerService,
    TrackerServiceTrait, TrackerSettings,
};
use wageclock_storage_sqlite::{db, SnapshotRepository};

use crate::commands::{Command, HELP};
use crate::config::Config;
use crate::notifier::BellSink;
use crate::render::{render_start_outcome, render_view};

pub fn init_tracing() {
    let log_format = std::env::var("WC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so they do not mix with the rendered view.
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub async fn build_service(config: &Config) -> anyhow::Result<Arc<TrackerService>> {
    let settings = TrackerSettings::with_tick_interval(config.tick_interval)?;
    let event_sink: Arc<dyn DomainEventSink> = Arc::new(BellSink::new());

    let repository: Option<Arc<dyn SnapshotRepositoryTrait>> = if config.persist {
        let db_path = db::init(&config.db_path)?;
        tracing::info!("Database path in use: {}", db_path);
        let pool = db::create_pool(&db_path)?;
        db::run_migrations(&pool)?;
        let writer = db::spawn_writer(pool.clone());
        Some(Arc::new(SnapshotRepository::new(pool, writer)))
    } else {
        tracing::info!("Persistence disabled; state lives in memory only");
        None
    };

    let service = TrackerService::new(settings, event_sink, repository)?;
    Ok(Arc::new(service))
}

/// What the input loop should do after a command.
pub enum Flow {
    Continue(String),
    Quit,
}

pub async fn dispatch(service: &TrackerService, command: Command) -> anyhow::Result<Flow> {
    let view = match command {
        Command::Start => service.start().await,
        Command::Pause => service.pause().await,
        Command::Stop => service.stop().await,
        Command::Save => service.save().await?,
        Command::Discard => service.discard().await,
        Command::Set { field, value } => service.update_field(field, &value).await?,
        Command::EditSet { field, value } => service.update_edit_field(field, &value).await?,
        Command::TargetSet => service.set_target().await?,
        Command::TargetSkip => service.skip_target().await?,
        Command::TargetEdit => service.edit_target().await,
        Command::Resume { entry_id } => {
            let outcome = service.start_from_saved(&entry_id).await?;
            return Ok(Flow::Continue(with_outcome(service, outcome).await));
        }
        Command::Confirm(choice) => {
            let outcome = service.confirm(choice).await?;
            return Ok(Flow::Continue(with_outcome(service, outcome).await));
        }
        Command::Edit { entry_id } => service.edit_entry(&entry_id).await?,
        Command::EditSave => service.save_edit().await?,
        Command::EditCancel => service.cancel_edit().await,
        Command::Show => service.view().await,
        Command::Help => return Ok(Flow::Continue(HELP.to_string())),
        Command::Quit => return Ok(Flow::Quit),
    };
    Ok(Flow::Continue(render_view(&view)))
}

async fn with_outcome(service: &TrackerService, outcome: StartOutcome) -> String {
    let view = service.view().await;
    match render_start_outcome(&outcome) {
        Some(line) => format!("{}\n{}", line, render_view(&view)),
        None => render_view(&view),
    }
}
