//! CLI command implementations.

pub mod inspect;
pub mod seed;
pub mod user;

use std::path::PathBuf;

use dispatch_server::store::{JsonFileStore, RecordStore, StoreError};

/// Open the record store at the directory named by `DISPATCH_DATA_DIR`.
///
/// Defaults to `./data`, matching the server.
///
/// # Errors
///
/// Returns `StoreError` if the directory cannot be created or an existing
/// collection file fails to parse.
pub fn open_store() -> Result<RecordStore, StoreError> {
    dotenvy::dotenv().ok();

    let data_dir = std::env::var("DISPATCH_DATA_DIR")
        .map_or_else(|_| PathBuf::from("data"), PathBuf::from);

    tracing::info!(dir = %data_dir.display(), "Opening data directory");
    let kv = JsonFileStore::open(&data_dir)?;
    RecordStore::load(Box::new(kv))
}
