//! FormController - translates user intents (submit, edit, delete, clear,
//! import, export) into store operations and pushes the resulting list back
//! through the UI seam.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::chamado::{next_id, Chamado, FormValues};
use crate::csv::{parse_csv, to_csv};
use crate::import::{build_batch, merge_batch, ImportError};
use crate::storage::StorageBackend;
use crate::store::ChamadoStore;

const MSG_VALIDATION: &str = "Preencha Data e Chamado antes de salvar.";
const MSG_CONFIRM_DELETE: &str = "Excluir este chamado?";
const MSG_CSV_INVALID: &str = "CSV vazio ou inválido.";
const MSG_CSV_NO_ROWS: &str = "Nenhuma linha válida encontrada no CSV.";
const MSG_FILE_READ: &str = "Erro ao ler o arquivo.";

fn msg_imported(count: usize) -> String {
    format!("{} registro(s) importado(s).", count)
}

/// Presentation-side collaborators.
///
/// The controller pushes the full ordered list through `render` after every
/// mutation; an empty list is the cue for the "no records" placeholder. The
/// controller never touches widgets or markup itself.
pub trait UserInterface {
    fn render(&self, records: &[Chamado]);

    /// Blocking confirmation gate. Deletes only proceed on `true`.
    fn confirm(&self, message: &str) -> bool;

    /// Non-blocking informational or error message.
    fn notify(&self, message: &str);
}

/// A rendered CSV export: file contents plus the timestamped download name
/// `chamados_<YYYY-MM-DD-HH-MM-SS>.csv` (UTC).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

impl CsvExport {
    /// Write the export into `dir` and return the written path. Hosts that
    /// want the download side effect call this; the controller itself never
    /// writes files.
    pub fn write_to_dir(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.filename);
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Form state machine over a loaded store.
///
/// Idle when `edit_target` is empty; Editing(id) while a record is pending
/// replacement on the next submit.
pub struct FormController<S: StorageBackend, U: UserInterface> {
    store: ChamadoStore<S>,
    ui: U,
    edit_target: Option<String>,
}

impl<S: StorageBackend, U: UserInterface> FormController<S, U> {
    /// Wrap a loaded store and render the initial listing.
    pub fn new(store: ChamadoStore<S>, ui: U) -> Self {
        let controller = Self {
            store,
            ui,
            edit_target: None,
        };
        controller.ui.render(controller.store.records());
        controller
    }

    pub fn store(&self) -> &ChamadoStore<S> {
        &self.store
    }

    /// Id of the record pending replacement, when editing.
    pub fn edit_target(&self) -> Option<&str> {
        self.edit_target.as_deref()
    }

    /// Begin editing `id`, returning its current values for display. An
    /// unknown id leaves the state untouched. No store mutation.
    pub fn start_edit(&mut self, id: &str) -> Option<FormValues> {
        let values = FormValues::from(self.store.find(id)?);
        self.edit_target = Some(id.to_string());
        Some(values)
    }

    /// Discard any in-progress edit and return to idle. No store mutation.
    pub fn clear(&mut self) {
        self.edit_target = None;
    }

    /// Validate and commit the form. `data` is checked as entered; `chamado`
    /// is checked after trimming. On success an edit replaces its target
    /// under the same id, otherwise a fresh record goes to the head of the
    /// list, and either branch returns to idle.
    pub fn submit(&mut self, values: FormValues) {
        let chamado = values.chamado.trim();
        if values.data.is_empty() || chamado.is_empty() {
            self.ui.notify(MSG_VALIDATION);
            return;
        }

        let id = self.edit_target.clone().unwrap_or_else(next_id);
        let record = Chamado {
            id,
            data: values.data.clone(),
            chamado: chamado.to_string(),
            solicitante: values.solicitante.trim().to_string(),
            usuario: values.usuario.trim().to_string(),
            localidade: values.localidade.trim().to_string(),
            atividade: values.atividade.trim().to_string(),
        };

        let result = match self.edit_target.take() {
            Some(target) => self.store.update(&target, record),
            None => self.store.add(record),
        };

        match result {
            Ok(()) => self.ui.render(self.store.records()),
            Err(e) => self.ui.notify(&e.to_string()),
        }
    }

    /// Delete `id` behind the confirmation gate. A declined confirmation
    /// changes nothing. The edit state is left untouched even when the
    /// deleted record is the one being edited, so a form populated from it
    /// keeps its now-stale values.
    pub fn delete(&mut self, id: &str) {
        if !self.ui.confirm(MSG_CONFIRM_DELETE) {
            return;
        }

        match self.store.remove(id) {
            Ok(()) => self.ui.render(self.store.records()),
            Err(e) => self.ui.notify(&e.to_string()),
        }
    }

    /// Process an import. `read` is the outcome of loading the file's text;
    /// a failed read, an empty file, and a file with only blank data rows
    /// each surface a message and leave the store unchanged.
    pub fn import(&mut self, read: io::Result<String>) {
        let text = match read {
            Ok(text) => text,
            Err(_) => {
                self.ui.notify(MSG_FILE_READ);
                return;
            }
        };

        let batch = match build_batch(&parse_csv(&text)) {
            Ok(batch) => batch,
            Err(ImportError::TooFewLines) => {
                self.ui.notify(MSG_CSV_INVALID);
                return;
            }
            Err(ImportError::NoValidRows) => {
                self.ui.notify(MSG_CSV_NO_ROWS);
                return;
            }
        };

        match merge_batch(&mut self.store, batch) {
            Ok(count) => {
                self.ui.render(self.store.records());
                self.ui.notify(&msg_imported(count));
            }
            Err(e) => self.ui.notify(&e.to_string()),
        }
    }

    /// Snapshot the current records as a downloadable CSV. No mutation.
    pub fn export(&self) -> CsvExport {
        CsvExport {
            filename: format!("chamados_{}.csv", Utc::now().format("%Y-%m-%d-%H-%M-%S")),
            content: to_csv(self.store.records()),
        }
    }
}
