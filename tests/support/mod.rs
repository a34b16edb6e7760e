// Shared test doubles for the integration suites.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chamados::{Chamado, UserInterface};

/// Listing placeholder the UI shows for an empty store.
pub const EMPTY_PLACEHOLDER: &str = "Nenhum chamado registrado.";

/// Buffer-backed UI double: records every render, notice, and confirmation
/// prompt, and answers confirmations with a configurable verdict.
#[derive(Clone)]
pub struct RecordingUi {
    renders: Arc<Mutex<Vec<Vec<Chamado>>>>,
    listing: Arc<Mutex<Vec<String>>>,
    notices: Arc<Mutex<Vec<String>>>,
    confirms: Arc<Mutex<Vec<String>>>,
    confirm_answer: Arc<Mutex<bool>>,
}

impl Default for RecordingUi {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingUi {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
            listing: Arc::new(Mutex::new(Vec::new())),
            notices: Arc::new(Mutex::new(Vec::new())),
            confirms: Arc::new(Mutex::new(Vec::new())),
            confirm_answer: Arc::new(Mutex::new(true)),
        }
    }

    /// Make subsequent confirmations answer "no".
    pub fn deny_confirm(&self) {
        *self.confirm_answer.lock().unwrap() = false;
    }

    /// Record lists passed to `render`, oldest first.
    pub fn renders(&self) -> Vec<Vec<Chamado>> {
        self.renders.lock().unwrap().clone()
    }

    /// The lines of the most recent listing.
    pub fn listing(&self) -> Vec<String> {
        self.listing.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn last_notice(&self) -> Option<String> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl UserInterface for RecordingUi {
    fn render(&self, records: &[Chamado]) {
        let lines = if records.is_empty() {
            vec![EMPTY_PLACEHOLDER.to_string()]
        } else {
            records
                .iter()
                .map(|c| format!("{} | {} | {}", c.data, c.chamado, c.solicitante))
                .collect()
        };

        *self.listing.lock().unwrap() = lines;
        self.renders.lock().unwrap().push(records.to_vec());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        *self.confirm_answer.lock().unwrap()
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

/// Convenience record builder for the suites.
pub fn record(id: &str, data: &str, chamado: &str) -> Chamado {
    Chamado {
        id: id.into(),
        data: data.into(),
        chamado: chamado.into(),
        ..Chamado::default()
    }
}
