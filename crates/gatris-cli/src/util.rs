use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

/// A JSON file being written.
#[derive(Debug)]
pub struct Output {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl Output {
    pub fn save_json<T>(value: &T, path: PathBuf) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::open(path)?;
        output.write_json(value)
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.path.display()))?;
        writeln!(self.writer).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.path.display()
            )
        })?;
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", self.path.display()))?;
        Ok(())
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("gatris-util-{}-{name}", process::id()))
    }

    #[test]
    fn test_save_and_read_json() {
        let path = temp_path("roundtrip.json");
        Output::save_json(&vec![1, 2, 3], path.clone()).unwrap();
        let value: Vec<i32> = read_json_file("test", &path).unwrap();
        assert_eq!(value, [1, 2, 3]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file_names_kind_and_path() {
        let path = temp_path("missing.json");
        let err = read_json_file::<Vec<i32>, _>("widget", &path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("widget"), "{message}");
        assert!(message.contains("missing.json"), "{message}");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_json_file::<Vec<i32>, _>("widget", &path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse widget JSON file"));
        fs::remove_file(path).unwrap();
    }
}
