use crate::commands::{read_details, resolve};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use courier_message::{details_from_document, document_from_details, Document};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Connection details JSON file (or, with `--to details`, a document)
    pub input: PathBuf,

    /// What to produce
    #[arg(short, long, value_enum, default_value_t = Target::Document)]
    pub to: Target,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// The editable component tree
    Document,

    /// Stored connection details
    Details,
}

pub fn convert(args: ConvertArgs, cwd: &str) -> Result<()> {
    let input = resolve(cwd, &args.input);
    let json = convert_file(&input, args.to)?;

    match &args.output {
        Some(path) => {
            let path = resolve(cwd, path);
            fs::write(&path, json).with_context(|| format!("Cannot write {}", path.display()))?;
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn convert_file(input: &Path, to: Target) -> Result<String> {
    let value = match to {
        Target::Document => serde_json::to_value(document_from_details(&read_details(input)?))?,
        Target::Details => serde_json::to_value(details_from_document(&read_document(input)?))?,
    };

    Ok(serde_json::to_string_pretty(&value)?)
}

/// A document file, or connection details converted on the fly
fn read_document(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let value: Value = serde_json::from_str(&source)?;

    if value.get("root").is_some() {
        debug!(file = %path.display(), "reading document");
        return serde_json::from_value(value)
            .with_context(|| format!("{} is not a valid document", path.display()));
    }

    debug!(file = %path.display(), "reading connection details");
    Ok(document_from_details(&read_details(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_details_to_document_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let details = dir.path().join("details.json");
        fs::write(&details, json!({ "content": "hello" }).to_string()).unwrap();

        let document_json = convert_file(&details, Target::Document).unwrap();
        let document: Document = serde_json::from_str(&document_json).unwrap();
        assert_eq!(document.root.children().len(), 1);

        let document_file = dir.path().join("document.json");
        fs::write(&document_file, &document_json).unwrap();

        let back: Value = serde_json::from_str(&convert_file(&document_file, Target::Details).unwrap()).unwrap();
        assert_eq!(back["content"], "hello");
    }

    #[test]
    fn test_details_round_trip_directly() {
        let dir = tempfile::tempdir().unwrap();
        let details = dir.path().join("details.json");
        fs::write(
            &details,
            json!({ "componentsV2": [{ "type": "TEXT_DISPLAY", "content": "hi" }] }).to_string(),
        )
        .unwrap();

        let back: Value = serde_json::from_str(&convert_file(&details, Target::Details).unwrap()).unwrap();
        assert_eq!(back["componentsV2"][0]["content"], "hi");
        assert_eq!(back["content"], "");
    }
}
