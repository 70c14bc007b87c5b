//! Background task that fetches all three lists and reports over a channel.

use arc_swap::ArcSwap;
use discotui_config::Config;
use discotui_types::{DataSource, ReleaseCatalog, ReleaseModel};
use std::{sync::Arc, time::Duration};
use tokio::{sync::mpsc, task::JoinHandle};

/// Progress of one load cycle, in order: `Started`, one `Loaded`/`Failed`
/// per source, `Finished`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    Started,
    Loaded {
        source: DataSource,
        rows: Vec<ReleaseModel>,
    },
    Failed {
        source: DataSource,
        error: String,
    },
    Finished {
        ok: bool,
    },
}

type Closed = mpsc::error::SendError<LoadEvent>;

/// Fetch collection, wishlist and orders once.
///
/// A collection failure ends the cycle; the other two only mark their list
/// as failed.
async fn load_cycle(catalog: &dyn ReleaseCatalog, tx: &mpsc::Sender<LoadEvent>) -> Result<(), Closed> {
    tx.send(LoadEvent::Started).await?;
    for &source in DataSource::all() {
        match catalog.releases(source).await {
            Ok(rows) => {
                tracing::info!(%source, count = rows.len(), "list loaded");
                tx.send(LoadEvent::Loaded { source, rows }).await?;
            }
            Err(e) => {
                tracing::warn!(%source, error = %e, "list failed to load");
                tx.send(LoadEvent::Failed {
                    source,
                    error: e.to_string(),
                })
                .await?;
                if source == DataSource::Collection {
                    return tx.send(LoadEvent::Finished { ok: false }).await;
                }
            }
        }
    }
    tx.send(LoadEvent::Finished { ok: true }).await
}

/// Load immediately, then again every `update_frequency` seconds or whenever
/// `reload` receives. Stops when either channel closes.
pub fn spawn(
    catalog: Arc<dyn ReleaseCatalog>,
    config: Arc<ArcSwap<Config>>,
    mut reload: mpsc::Receiver<()>,
    tx: mpsc::Sender<LoadEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if load_cycle(catalog.as_ref(), &tx).await.is_err() {
                return;
            }
            let every = Duration::from_secs(config.load().update_frequency.max(1));
            tokio::select! {
                () = tokio::time::sleep(every) => tracing::debug!("periodic reload"),
                msg = reload.recv() => {
                    if msg.is_none() {
                        return;
                    }
                    tracing::debug!("manual reload");
                }
            }
        }
    })
}
