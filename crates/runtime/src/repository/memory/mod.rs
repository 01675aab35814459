mod snapshot;

pub use snapshot::InMemorySnapshotRepo;
