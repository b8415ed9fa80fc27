use crate::error::{AppError, Result};
use crate::sheets::range::write_address;
use crate::sheets::{Rows, SpreadsheetOperations};
use std::io::Write;

/// Rows of cell values supplied on the command line as a JSON array of arrays
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid(pub Rows);

/// clap value parser, so bad input is rejected before any credentials load
pub(super) fn parse_cell_grid(data: &str) -> Result<CellGrid> {
    serde_json::from_str::<Rows>(data)
        .map(CellGrid)
        .map_err(|e| AppError::Validation(format!("expected a JSON array of rows: {}", e)))
}

pub(super) async fn execute<S>(
    sheets: &S,
    tab: &str,
    range: &str,
    data: CellGrid,
    out: &mut impl Write,
) -> Result<()>
where
    S: SpreadsheetOperations + Sync,
{
    let address = write_address(tab, range);
    let updated = sheets.write_range(&address, data.0).await?;

    writeln!(out, "Updated {} cells", updated)?;

    Ok(())
}
