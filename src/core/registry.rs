//! Worker registration and lookup. Handles are allocated once and never change.

use crate::core::username::allocate;
use crate::db::store::{StoreError, WorkerRegistry};
use crate::errors::{AppError, AppResult};
use crate::models::worker::{NewWorker, Worker};

/// Registration flow on top of a [`WorkerRegistry`].
pub struct RegistryLogic;

impl RegistryLogic {
    /// Register a worker, deriving the handle from `full_name`.
    ///
    /// A handle that already exists is a configuration error: no retry with
    /// another sequence value is attempted.
    pub fn register<R: WorkerRegistry + ?Sized>(
        registry: &R,
        full_name: &str,
    ) -> AppResult<Worker> {
        let next = registry.highest_id()?.map_or(1, |id| id + 1);
        let handle = allocate(full_name, next.max(0) as u64)?;

        if registry.find_by_handle(&handle)?.is_some() {
            log::error!("handle {handle} already allocated (sequence {next})");
            return Err(AppError::HandleCollision(handle));
        }

        let display_name = full_name.split_whitespace().collect::<Vec<_>>().join(" ");

        let worker = registry
            .create(NewWorker {
                display_name,
                handle: handle.clone(),
            })
            .map_err(|e| match e {
                StoreError::Conflict(_) => AppError::HandleCollision(handle.clone()),
                other => AppError::from(other),
            })?;

        log::info!("registered worker {} as {}", worker.id, worker.handle);
        Ok(worker)
    }

    pub fn by_handle<R: WorkerRegistry + ?Sized>(registry: &R, handle: &str) -> AppResult<Worker> {
        registry
            .find_by_handle(handle)?
            .ok_or_else(|| AppError::WorkerNotFound(handle.to_string()))
    }

    pub fn by_id<R: WorkerRegistry + ?Sized>(registry: &R, id: i64) -> AppResult<Worker> {
        registry
            .find_by_id(id)?
            .ok_or_else(|| AppError::WorkerNotFound(id.to_string()))
    }

    pub fn list<R: WorkerRegistry + ?Sized>(registry: &R) -> AppResult<Vec<Worker>> {
        Ok(registry.list_all()?)
    }

    /// Delete a worker and, with them, all their sessions.
    pub fn remove<R: WorkerRegistry + ?Sized>(registry: &R, handle: &str) -> AppResult<Worker> {
        let worker = Self::by_handle(registry, handle)?;
        if !registry.delete(worker.id)? {
            return Err(AppError::WorkerNotFound(handle.to_string()));
        }
        log::info!("deleted worker {}", worker.handle);
        Ok(worker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    #[test]
    fn handles_follow_the_id_sequence() {
        let store = MemoryStore::new();
        let a = RegistryLogic::register(&store, "João Silva").unwrap();
        let b = RegistryLogic::register(&store, "João Silva").unwrap();

        assert_eq!(a.handle, "joão.silva01");
        assert_eq!(b.handle, "joão.silva02");
        assert_eq!(b.id, 2);
    }

    #[test]
    fn display_name_is_normalised() {
        let store = MemoryStore::new();
        let w = RegistryLogic::register(&store, "  Ana   Souza ").unwrap();
        assert_eq!(w.display_name, "Ana Souza");
        assert_eq!(w.handle, "ana.souza01");
    }

    #[test]
    fn invalid_name_creates_nothing() {
        let store = MemoryStore::new();
        assert!(matches!(
            RegistryLogic::register(&store, "João"),
            Err(AppError::InvalidName(_))
        ));
        assert!(RegistryLogic::list(&store).unwrap().is_empty());
    }

    #[test]
    fn colliding_handle_is_fatal() {
        let store = MemoryStore::new();
        // Occupy the handle the next registration will compute.
        WorkerRegistry::create(
            &store,
            NewWorker {
                display_name: "Other".into(),
                handle: "ana.souza02".into(),
            },
        )
        .unwrap();

        assert!(matches!(
            RegistryLogic::register(&store, "Ana Souza"),
            Err(AppError::HandleCollision(h)) if h == "ana.souza02"
        ));
    }

    #[test]
    fn lookups_report_missing_workers() {
        let store = MemoryStore::new();
        assert!(matches!(
            RegistryLogic::by_handle(&store, "ana.souza01"),
            Err(AppError::WorkerNotFound(_))
        ));
        assert!(matches!(
            RegistryLogic::by_id(&store, 9),
            Err(AppError::WorkerNotFound(_))
        ));
        assert!(matches!(
            RegistryLogic::remove(&store, "ana.souza01"),
            Err(AppError::WorkerNotFound(_))
        ));
    }
}
