use crate::record::LogRecord;
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub enum Writer {
    Json(BufWriter<Box<dyn Write + Send>>, bool), // bool tracks whether the next record is the first
    Jsonl(BufWriter<Box<dyn Write + Send>>),
}

impl Writer {
    pub fn json(out: Box<dyn Write + Send>) -> Self {
        Writer::Json(BufWriter::new(out), true)
    }

    pub fn jsonl(out: Box<dyn Write + Send>) -> Self {
        Writer::Jsonl(BufWriter::new(out))
    }

    pub fn write_batch(&mut self, records: &[LogRecord]) -> Result<()> {
        match self {
            Writer::Json(writer, is_first) => {
                for record in records {
                    if *is_first {
                        write!(writer, "[")?;
                        *is_first = false;
                    } else {
                        write!(writer, ",")?;
                    }
                    let serialized = serde_json::to_string_pretty(record)?;
                    write!(writer, "\n{}", serialized)?;
                }
            }
            Writer::Jsonl(writer) => {
                for record in records {
                    serde_json::to_writer(&mut *writer, record)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    pub fn finish(self) -> Result<()> {
        match self {
            Writer::Json(mut writer, is_first) => {
                if is_first {
                    write!(writer, "[")?;
                }
                writeln!(writer, "\n]")?;
                writer.flush()?;
            }
            Writer::Jsonl(mut writer) => {
                writer.flush()?;
            }
        }
        Ok(())
    }
}

pub fn create_writer(output_arg: &str) -> Result<Writer> {
    match output_arg {
        "stdout" => Ok(Writer::jsonl(Box::new(io::stdout()))),
        "json" => Ok(Writer::json(Box::new(io::stdout()))),
        path if path.ends_with(".json") => Ok(Writer::json(Box::new(create_file(path)?))),
        path if path.ends_with(".jsonl") || path.ends_with(".ndjson") => {
            Ok(Writer::jsonl(Box::new(create_file(path)?)))
        }
        _ => bail!(
            "Unknown output target: {}. Use 'stdout', 'json', or a .json/.jsonl/.ndjson path",
            output_arg
        ),
    }
}

fn create_file(path: &str) -> Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("creating output file {}", path))
}
