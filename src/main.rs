use anyhow::Result;
use tracing::info;
use vigil::config::{load_config, VigilConfig};
use vigil::core::Core;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => VigilConfig::default(),
    };

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .init();

    info!("Vigil starting...");

    let core = Core::new(&config);

    // Producer components and the API layer attach to this same core handle.
    // Until then, log every registry event so the daemon is observable.
    let mut entity_added = core.bus().subscribe_entity_added();
    let mut state_changed = core.bus().subscribe_state_changed();

    loop {
        tokio::select! {
            Ok(event) = entity_added.recv() => {
                info!(
                    entity_id = %event.entity.entity_id,
                    name = %event.entity.name,
                    "Entity added"
                );
            }
            Ok(event) = state_changed.recv() => {
                info!(
                    entity_id = %event.entity_id,
                    state = %event.current_state.state,
                    "State changed"
                );
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
