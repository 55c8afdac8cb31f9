use serde::Serialize;

/// A registered worker.
/// `handle` is derived once from the full name and never changes afterwards.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Worker {
    pub id: i64,                // ⇔ workers.id (INTEGER PRIMARY KEY)
    pub display_name: String,   // ⇔ workers.display_name
    pub handle: String,         // ⇔ workers.handle (UNIQUE)
}

/// Worker data before the registry assigns an id.
#[derive(Debug, Clone)]
pub struct NewWorker {
    pub display_name: String,
    pub handle: String,
}
