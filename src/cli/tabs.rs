use crate::error::Result;
use crate::sheets::SpreadsheetOperations;
use std::io::Write;

pub(super) async fn execute<S>(sheets: &S, out: &mut impl Write) -> Result<()>
where
    S: SpreadsheetOperations + Sync,
{
    let summary = sheets.list_tabs().await?;

    writeln!(out, "Spreadsheet: {}", summary.title)?;
    for tab in &summary.tabs {
        writeln!(
            out,
            "  {} ({}x{})",
            tab.title, tab.row_count, tab.column_count
        )?;
    }

    Ok(())
}
