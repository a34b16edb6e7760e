mod chamado;
mod controller;
mod csv;
mod import;
mod storage;
mod store;

pub use chamado::{Chamado, FormValues};
pub use controller::{CsvExport, FormController, UserInterface};
pub use csv::{parse_csv, to_csv, CSV_HEADER};
pub use import::{build_batch, header_field, merge_batch, Field, ImportError, PLACEHOLDER_TICKET};
pub use storage::{FileStorage, InMemoryStorage, StorageBackend, StorageError};
pub use store::{ChamadoStore, StoreError, STORAGE_KEY};
