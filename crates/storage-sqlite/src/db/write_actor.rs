use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::{debug, error};
use std::any::Any;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use wageclock_core::errors::Result;

// A write job runs against the writer's connection inside one transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type AnyResult = Box<dyn Any + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    // Results travel back type-erased and are downcast in `exec`.
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(Job<AnyResult>, oneshot::Sender<Result<AnyResult>>)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// Jobs are processed one at a time, each in an immediate transaction,
    /// so concurrent snapshot saves never interleave.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as AnyResult)),
                ret_tx,
            ))
            .await
            .map_err(|_| StorageError::WriterUnavailable("writer actor has stopped".into()))?;

        let boxed = ret_rx.await.map_err(|_| {
            StorageError::WriterUnavailable("writer actor dropped the reply".into())
        })??;

        boxed.downcast::<T>().map(|value| *value).map_err(|_| {
            StorageError::WriterUnavailable("unexpected result type from writer".into()).into()
        })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the
/// database. The actor takes one connection from the pool per job batch and
/// runs jobs serially.
pub fn spawn_writer(pool: Arc<DbPool>) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(Job<AnyResult>, oneshot::Sender<Result<AnyResult>>)>(64);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result = run_job(&pool, job);
            if let Err(e) = &result {
                error!("Write job failed: {}", e);
            }
            // The caller may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
        debug!("Writer actor stopped: all handles dropped");
    });

    WriteHandle { tx }
}

fn run_job(pool: &DbPool, job: Job<AnyResult>) -> Result<AnyResult> {
    let mut conn = pool.get().map_err(StorageError::from)?;
    conn.immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
        .map_err(|e: StorageError| e.into())
}
