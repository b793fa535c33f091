//! I/O utilities.
//!
//! This module is responsible for reading fragment records from JSON, JSONL
//! and CSV files (or standard input), and for writing assembled text. The
//! input format is detected from the file extension, or, for standard input
//! and unknown extensions, from the first non-whitespace byte.

use serde::de::DeserializeOwned;
use tokio::{
    fs::File,
    io::{AsyncReadExt as _, AsyncWrite, AsyncWriteExt as _, BufWriter},
};

use crate::{prelude::*, records::FragmentRecord};

/// Input formats we understand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// A JSON array of records.
    Json,
    /// One JSON record per line.
    Jsonl,
    /// CSV with a header row.
    Csv,
}

impl InputFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "ndjson" => Some(Self::Jsonl),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Guess the format by peeking at the data.
    pub fn sniff(data: &str) -> Self {
        match data.trim_start().as_bytes().first() {
            Some(b'[') => Self::Json,
            Some(b'{') => Self::Jsonl,
            _ => Self::Csv,
        }
    }
}

/// Read an entire file or standard input into a string. Returns a description
/// of the source, for error messages, along with the data.
pub async fn read_path_or_stdin(path: Option<&Path>) -> Result<(String, String)> {
    match path {
        Some(path) => {
            let data = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read file at path: {:?}", path))?;
            Ok((path.to_string_lossy().into_owned(), data))
        }
        None => {
            let mut data = String::new();
            tokio::io::stdin()
                .read_to_string(&mut data)
                .await
                .context("Failed to read standard input")?;
            Ok(("stdin".to_owned(), data))
        }
    }
}

/// Parse records of type `T` from `data`.
pub fn parse_records<T>(description: &str, data: &str, format: InputFormat) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    match format {
        InputFormat::Json => serde_json::from_str(data).with_context(|| {
            format!("Failed to parse JSON array from {:?}", description)
        }),
        InputFormat::Jsonl => data
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str::<T>(line).with_context(|| {
                    format!(
                        "Failed to parse JSON from line {} in {:?}: {:?}",
                        idx + 1,
                        description,
                        line
                    )
                })
            })
            .collect(),
        InputFormat::Csv => csv::Reader::from_reader(data.as_bytes())
            .into_deserialize::<T>()
            .enumerate()
            .map(|(idx, record)| {
                record.with_context(|| {
                    format!(
                        "Failed to read CSV record {} from {:?}",
                        idx + 1,
                        description
                    )
                })
            })
            .collect(),
    }
}

/// Read fragment records from a file or standard input.
#[instrument(level = "debug", skip_all, fields(path = ?path))]
pub async fn read_fragment_records(path: Option<&Path>) -> Result<Vec<FragmentRecord>> {
    let (description, data) = read_path_or_stdin(path).await?;
    let format = path
        .and_then(InputFormat::from_path)
        .unwrap_or_else(|| InputFormat::sniff(&data));
    debug!(?format, bytes = data.len(), "Parsing fragment records");
    let records = parse_records(&description, &data, format)?;
    debug!(count = records.len(), "Read fragment records");
    Ok(records)
}

/// Create an [`AsyncWrite`] for a file or stdout.
pub async fn create_writer(
    path: Option<&Path>,
) -> Result<Box<dyn AsyncWrite + Unpin + Send + Sync + 'static>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .await
                .with_context(|| format!("Failed to create file at path: {:?}", path))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(tokio::io::stdout())),
    }
}

/// Write a string to either standard output or a file.
pub async fn write_text(path: Option<&Path>, text: &str) -> Result<()> {
    let mut writer = BufWriter::new(create_writer(path).await?);
    writer
        .write_all(text.as_bytes())
        .await
        .context("Failed to write text to output")?;
    writer.flush().await.context("Failed to flush output")?;
    Ok(())
}

/// Write records as JSONL to either standard output or a file.
pub async fn write_jsonl<T>(path: Option<&Path>, records: &[T]) -> Result<()>
where
    T: Serialize + std::fmt::Debug,
{
    let mut writer = BufWriter::new(create_writer(path).await?);
    for record in records {
        let json = serde_json::to_string(record)
            .with_context(|| format!("Failed to serialize JSON from {:?}", record))?;
        writer
            .write_all(json.as_bytes())
            .await
            .context("Failed to write JSON to output")?;
        writer
            .write_all(b"\n")
            .await
            .context("Failed to write newline to output")?;
    }
    writer.flush().await.context("Failed to flush output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Orientation;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("a/b.JSON")),
            Some(InputFormat::Json)
        );
        assert_eq!(
            InputFormat::from_path(Path::new("b.jsonl")),
            Some(InputFormat::Jsonl)
        );
        assert_eq!(
            InputFormat::from_path(Path::new("b.csv")),
            Some(InputFormat::Csv)
        );
        assert_eq!(InputFormat::from_path(Path::new("b.txt")), None);
        assert_eq!(InputFormat::from_path(Path::new("b")), None);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(InputFormat::sniff("  \n[{}]"), InputFormat::Json);
        assert_eq!(InputFormat::sniff("{\"page\":1}\n"), InputFormat::Jsonl);
        assert_eq!(InputFormat::sniff("page,text\n"), InputFormat::Csv);
        assert_eq!(InputFormat::sniff(""), InputFormat::Csv);
    }

    #[test]
    fn test_parse_jsonl_skips_blank_lines() {
        let data = r#"{"page":1,"text":"a","left":0,"bottom":0,"width":1,"height":1}

{"page":2,"text":"b","left":0,"bottom":0,"width":1,"height":1,"orientation":1}
"#;
        let records: Vec<FragmentRecord> =
            parse_records("test", data, InputFormat::Jsonl).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].orientation, Orientation::Rotated90);
    }

    #[test]
    fn test_parse_csv_keeps_spaces() {
        let data = "page,text,left,bottom,width,height,orientation\n\
                    1,\"First \",0,200,100,30,0\n\
                    1,First 1,110,200,140,30,0\n";
        let records: Vec<FragmentRecord> =
            parse_records("test", data, InputFormat::Csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "First ");
        assert_eq!(records[1].left, 110.0);
    }

    #[test]
    fn test_parse_csv_without_orientation_column() {
        let data = "page,text,left,bottom,width,height\n1,hi,0,0,10,10\n";
        let records: Vec<FragmentRecord> =
            parse_records("test", data, InputFormat::Csv).unwrap();
        assert_eq!(records[0].orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_parse_csv_blank_orientation_is_horizontal() {
        let data = "page,text,left,bottom,width,height,orientation\n\
                    1,hi,0,0,10,10,\n\
                    1,up,20,0,10,10,1\n";
        let records: Vec<FragmentRecord> =
            parse_records("test", data, InputFormat::Csv).unwrap();
        assert_eq!(records[0].orientation, Orientation::Horizontal);
        assert_eq!(records[1].orientation, Orientation::Rotated90);
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let data = "{\"page\":1,\"text\":\"a\",\"left\":0,\"bottom\":0,\"width\":1,\"height\":1}\nnot json\n";
        let err = parse_records::<FragmentRecord>("test", data, InputFormat::Jsonl)
            .unwrap_err();
        assert!(format!("{err:?}").contains("line 2"));
    }
}
