use crate::drive::{DriveOperations, DriveQuery};
use crate::error::Result;
use std::io::Write;

pub(super) async fn execute<D>(
    drive: &D,
    folder_id: Option<&str>,
    out: &mut impl Write,
) -> Result<()>
where
    D: DriveOperations + Sync,
{
    let query = DriveQuery::new(folder_id);
    let files = drive.list_files(&query).await?;

    for file in &files {
        writeln!(out, "  {} ({}) - {}", file.name, file.mime_type, file.id)?;
    }

    Ok(())
}
