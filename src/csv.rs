//! CSV codec - encoder and a small two-state tokenizer.
//!
//! The tokenizer tolerates quoted fields, embedded commas and newlines, and
//! doubled quotes. It does not validate column counts; ragged rows pass
//! through as-is.

use crate::chamado::Chamado;

/// Export column names, in emission order.
pub const CSV_HEADER: [&str; 6] = [
    "Data",
    "Chamado",
    "Solicitante",
    "Usuario",
    "Localidade",
    "Atividade",
];

/// Quote-wrap a field, doubling internal quotes, iff it contains a comma, a
/// quote, or a line break. Everything else is emitted raw.
fn csv_escape(field: &str) -> String {
    if field.contains('"') || field.contains(',') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Encode records as CSV: the fixed header row, then one row per record in
/// header order, lines joined by CRLF with no trailing line break.
pub fn to_csv(records: &[Chamado]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for record in records {
        let row = [
            record.data.as_str(),
            record.chamado.as_str(),
            record.solicitante.as_str(),
            record.usuario.as_str(),
            record.localidade.as_str(),
            record.atividade.as_str(),
        ]
        .map(csv_escape)
        .join(",");
        lines.push(row);
    }

    lines.join("\r\n")
}

/// Split CSV text into rows of cells.
///
/// Two states. Inside quotes, a doubled `""` emits one literal quote and a
/// lone `"` leaves the quoted state; everything else, line breaks included,
/// appends to the cell. Outside quotes, `,` ends the cell, `\n` ends the
/// row, and `\r` is dropped. A pending cell or row at end of input is
/// flushed as a final row.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut cell)),
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut cell));
                    rows.push(std::mem::take(&mut row));
                }
                other => cell.push(other),
            }
        }
    }

    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}
