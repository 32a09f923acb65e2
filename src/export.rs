use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tokio::fs;
use tracing::{error, info};

use crate::record::OutputTable;
use crate::{Error, Result};

/// `<dir>/<prefix>_<YYYY-MM-DD>.csv`
pub fn output_path(dir: &Path, prefix: &str, run_date: NaiveDate) -> PathBuf {
    dir.join(format!("{prefix}_{}.csv", run_date.format("%Y-%m-%d")))
}

/// Serializes the table as CSV.
pub fn to_csv(table: &OutputTable) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(OutputTable::HEADERS)?;
    for row in table.rows() {
        let serial = row.serial.to_string();
        let date = row.record.iso_date();
        wtr.write_record([
            serial.as_str(),
            date.as_str(),
            row.record.name.as_str(),
            row.record.link.as_str(),
        ])?;
    }
    wtr.into_inner().map_err(|e| Error::Csv(csv::Error::from(e.into_error())))
}

/// Writes the table to `path` atomically: the CSV goes to a hidden temp file next to the
/// target which is then renamed over it. On failure no file is left behind and an existing
/// one is untouched.
pub async fn write_table(table: &OutputTable, path: &Path) -> Result<()> {
    let bytes = to_csv(table)?;
    let export_err = |source: std::io::Error| Error::Export {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir).await.map_err(export_err)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    let written = match fs::write(&tmp_path, &bytes).await {
        Ok(()) => fs::rename(&tmp_path, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        error!(path = %path.display(), error = %e, "couldn't write the output file");
        let _ = fs::remove_file(&tmp_path).await;
        return Err(export_err(e));
    }

    info!(path = %path.display(), rows = table.len(), "wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{assemble, EventRecord};

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("event_scrap_export_{name}"));
        let _ = std::fs::remove_dir_all(&p);
        std::fs::create_dir_all(&p).unwrap();
        p
    }

    fn table() -> OutputTable {
        let date = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        assemble(vec![
            EventRecord {
                date,
                name: "Night Fever".into(),
                link: "https://shotgun.live/en/events/night-fever".into(),
            },
            EventRecord {
                date,
                name: "Bass, Beats & \"More\"".into(),
                link: "https://shotgun.live/en/events/bass".into(),
            },
        ])
    }

    #[test]
    fn filename_embeds_run_date() {
        let run_date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let path = output_path(Path::new("output"), "events", run_date);
        assert_eq!(path, Path::new("output").join("events_2025-01-02.csv"));
    }

    #[test]
    fn csv_columns_and_quoting() {
        let text = String::from_utf8(to_csv(&table()).unwrap()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "S.no,Date,Event name,Event link");
        assert_eq!(
            lines[1],
            "1,2025-11-03,Night Fever,https://shotgun.live/en/events/night-fever"
        );
        assert_eq!(
            lines[2],
            r#"2,2025-11-03,"Bass, Beats & ""More""",https://shotgun.live/en/events/bass"#
        );
    }

    #[test]
    fn empty_table_has_only_headers() {
        let text = String::from_utf8(to_csv(&OutputTable::default()).unwrap()).unwrap();
        assert_eq!(text, "S.no,Date,Event name,Event link\n");
    }

    #[tokio::test]
    async fn write_creates_dir_and_leaves_no_temp_file() {
        let dir = tmp_dir("write");
        let path = dir.join("nested").join("events_2025-11-01.csv");

        write_table(&table(), &path).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn failed_write_keeps_existing_file() {
        let dir = tmp_dir("failed");
        let path = dir.join("events_2025-11-01.csv");
        std::fs::write(&path, "previous").unwrap();
        // A directory squatting on the temp name makes the write fail.
        std::fs::create_dir(dir.join(".events_2025-11-01.csv.tmp")).unwrap();

        let res = write_table(&table(), &path).await;

        assert!(matches!(res, Err(Error::Export { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
    }
}
