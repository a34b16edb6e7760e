//! CSV import - header inference, row-to-record mapping, and the merge
//! policy that places a parsed batch ahead of the existing records.

use std::fmt;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::chamado::{import_id, Chamado};
use crate::storage::StorageBackend;
use crate::store::{ChamadoStore, StoreError};

/// Ticket placeholder for imported rows carrying neither a ticket nor an
/// activity value.
pub const PLACEHOLDER_TICKET: &str = "importado";

/// Record fields a CSV column can resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Data,
    Chamado,
    Solicitante,
    Usuario,
    Localidade,
    Atividade,
}

/// Error type for import batch construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Fewer than two rows: a header plus at least one data row is required.
    TooFewLines,
    /// Every data row was blank.
    NoValidRows,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::TooFewLines => write!(f, "csv has fewer than two lines"),
            ImportError::NoValidRows => write!(f, "csv has no non-blank data rows"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Fold a header cell for matching: trim, NFKD-decompose, drop combining
/// marks, lowercase. "Usuário" and "usuario" fold to the same text.
fn fold_header(cell: &str) -> String {
    cell.trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Resolve a header cell to a record field by substring containment. The
/// buckets are checked in a fixed order and the first match wins; unmatched
/// columns are ignored, their values dropped for every row.
pub fn header_field(cell: &str) -> Option<Field> {
    let h = fold_header(cell);
    if h.is_empty() {
        return None;
    }

    if h.contains("data") {
        Some(Field::Data)
    } else if h.contains("cham") {
        Some(Field::Chamado)
    } else if h.contains("solicit") {
        Some(Field::Solicitante)
    } else if h.contains("usuario") || h.contains("user") {
        Some(Field::Usuario)
    } else if h.contains("local") {
        Some(Field::Localidade)
    } else if h.contains("ativ") {
        Some(Field::Atividade)
    } else {
        None
    }
}

fn assign(record: &mut Chamado, field: Field, value: String) {
    match field {
        Field::Data => record.data = value,
        Field::Chamado => record.chamado = value,
        Field::Solicitante => record.solicitante = value,
        Field::Usuario => record.usuario = value,
        Field::Localidade => record.localidade = value,
        Field::Atividade => record.atividade = value,
    }
}

/// Build the import batch from decoded rows, file order preserved.
///
/// Row 0 is the header. A row whose every cell trims empty is skipped and
/// counts toward nothing. For surviving rows each resolved column assigns
/// its trimmed value unconditionally, so a later duplicate column overwrites
/// an earlier one and a missing cell assigns the empty string. An empty
/// ticket falls back to the activity value, then to [`PLACEHOLDER_TICKET`].
/// `data` is not enforced on this path.
pub fn build_batch(rows: &[Vec<String>]) -> Result<Vec<Chamado>, ImportError> {
    if rows.len() < 2 {
        return Err(ImportError::TooFewLines);
    }

    let columns: Vec<Option<Field>> = rows[0].iter().map(|cell| header_field(cell)).collect();

    let mut batch = Vec::new();
    for (index, row) in rows.iter().enumerate().skip(1) {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut record = Chamado {
            id: import_id(index),
            ..Chamado::default()
        };

        for (column, field) in columns.iter().enumerate() {
            if let Some(field) = field {
                let value = row.get(column).map(|cell| cell.trim()).unwrap_or("");
                assign(&mut record, *field, value.to_string());
            }
        }

        if record.chamado.is_empty() {
            record.chamado = if record.atividade.is_empty() {
                PLACEHOLDER_TICKET.to_string()
            } else {
                record.atividade.clone()
            };
        }

        batch.push(record);
    }

    if batch.is_empty() {
        return Err(ImportError::NoValidRows);
    }

    Ok(batch)
}

/// Merge a parsed batch into the store: the batch is reversed once, then
/// placed as a block ahead of the existing records. Returns the number of
/// merged records.
pub fn merge_batch<S: StorageBackend>(
    store: &mut ChamadoStore<S>,
    mut batch: Vec<Chamado>,
) -> Result<usize, StoreError> {
    let count = batch.len();
    batch.reverse();
    store.import_batch(batch)?;
    tracing::info!(count, "merged csv import batch");
    Ok(count)
}
