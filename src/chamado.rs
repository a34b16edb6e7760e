use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One ticket entry.
///
/// Field names follow the persisted layout. The empty string stands for an
/// absent optional value, and `#[serde(default)]` keeps loading tolerant of
/// blobs that omit optional keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chamado {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub chamado: String,
    #[serde(default)]
    pub solicitante: String,
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub atividade: String,
}

/// Raw widget values as read from the form, untrimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    pub data: String,
    pub chamado: String,
    pub solicitante: String,
    pub usuario: String,
    pub localidade: String,
    pub atividade: String,
}

impl From<&Chamado> for FormValues {
    fn from(record: &Chamado) -> Self {
        FormValues {
            data: record.data.clone(),
            chamado: record.chamado.clone(),
            solicitante: record.solicitante.clone(),
            usuario: record.usuario.clone(),
            localidade: record.localidade.clone(),
            atividade: record.atividade.clone(),
        }
    }
}

/// Millisecond-epoch id for a manually entered record. Collisions within the
/// same millisecond are accepted as negligible for a single-user form.
pub(crate) fn next_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Id for an imported row. The row index disambiguates rows created within
/// the same millisecond.
pub(crate) fn import_id(row: usize) -> String {
    format!("{}_{}", Utc::now().timestamp_millis(), row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_tolerates_missing_optional_keys() {
        let record: Chamado =
            serde_json::from_str(r#"{"id":"1","data":"2024-01-01","chamado":"C1"}"#).unwrap();
        assert_eq!(record.id, "1");
        assert_eq!(record.chamado, "C1");
        assert_eq!(record.solicitante, "");
        assert_eq!(record.atividade, "");
    }

    #[test]
    fn serialize_roundtrip() {
        let record = Chamado {
            id: "42".into(),
            data: "2024-01-01".into(),
            chamado: "C1".into(),
            solicitante: "Ana".into(),
            usuario: "bruno".into(),
            localidade: "Matriz".into(),
            atividade: "Troca de toner".into(),
        };

        let raw = serde_json::to_string(&record).unwrap();
        let back: Chamado = serde_json::from_str(&raw).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn form_values_copy_record_fields() {
        let record = Chamado {
            id: "42".into(),
            data: "2024-01-01".into(),
            chamado: "C1".into(),
            ..Chamado::default()
        };

        let values = FormValues::from(&record);
        assert_eq!(values.data, "2024-01-01");
        assert_eq!(values.chamado, "C1");
        assert_eq!(values.usuario, "");
    }

    #[test]
    fn generated_ids_are_non_empty() {
        assert!(!next_id().is_empty());
        assert!(import_id(3).ends_with("_3"));
    }
}
