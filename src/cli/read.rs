use crate::error::Result;
use crate::sheets::SpreadsheetOperations;
use crate::sheets::range::read_address;
use serde_json::Value;
use std::io::Write;

const EMPTY_MARKER: &str = "(empty)";

pub(super) async fn execute<S>(
    sheets: &S,
    tab: &str,
    range: Option<&str>,
    out: &mut impl Write,
) -> Result<()>
where
    S: SpreadsheetOperations + Sync,
{
    let address = read_address(tab, range);
    let rows = sheets.read_range(&address).await?;

    if rows.is_empty() {
        writeln!(out, "{}", EMPTY_MARKER)?;
        return Ok(());
    }

    for (i, row) in rows.iter().enumerate() {
        let label = match i {
            0 => "HDR".to_string(),
            _ => format!("R{}", i),
        };
        writeln!(out, "{}: {}", label, format_row(row))?;
    }

    Ok(())
}

/// JSON array with `", "` between cells; non-ASCII is left unescaped
fn format_row(row: &[Value]) -> String {
    let cells = row.iter().map(Value::to_string).collect::<Vec<_>>();
    format!("[{}]", cells.join(", "))
}
