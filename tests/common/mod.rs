//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, TimeZone};
use serde_json::{Value, json};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builder for test export archives
pub struct ArchiveBuilder {
    temp_dir: TempDir,
    conversations_path: String,
    conversations: Option<String>,
    files: Vec<(String, Vec<u8>)>,
    directories: Vec<String>,
}

impl ArchiveBuilder {
    /// Create a builder for an archive with a root-level conversations.json
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            conversations_path: "conversations.json".to_string(),
            conversations: None,
            files: Vec::new(),
            directories: Vec::new(),
        }
    }

    /// Store conversations.json under a different entry name
    pub fn conversations_at(mut self, entry_name: &str) -> Self {
        self.conversations_path = entry_name.to_string();
        self
    }

    /// Use raw text as the conversations.json content
    pub fn with_raw_conversations(mut self, content: &str) -> Self {
        self.conversations = Some(content.to_string());
        self
    }

    /// Add conversation records programmatically
    pub fn with_records(mut self, records: &[RecordBuilder]) -> Self {
        let array = Value::Array(records.iter().map(RecordBuilder::to_value).collect());
        self.conversations = Some(array.to_string());
        self
    }

    /// Add an arbitrary archive entry
    pub fn with_file(mut self, entry_name: &str, content: &[u8]) -> Self {
        self.files.push((entry_name.to_string(), content.to_vec()));
        self
    }

    /// Add an explicit directory entry
    pub fn with_directory(mut self, entry_name: &str) -> Self {
        self.directories.push(entry_name.to_string());
        self
    }

    /// Write the ZIP and return the fixture (consumes self)
    pub fn build(self) -> ArchiveFixture {
        let zip_path = self.temp_dir.path().join("export.zip");
        let file = File::create(&zip_path).expect("Failed to create zip file");
        let mut writer = ZipWriter::new(file);

        for dir in &self.directories {
            writer
                .add_directory(dir.as_str(), SimpleFileOptions::default())
                .expect("Failed to add directory");
        }
        if let Some(content) = &self.conversations {
            writer
                .start_file(self.conversations_path.as_str(), SimpleFileOptions::default())
                .expect("Failed to start conversations.json");
            writer.write_all(content.as_bytes()).expect("Failed to write conversations.json");
        }
        for (name, content) in &self.files {
            writer
                .start_file(name.as_str(), SimpleFileOptions::default())
                .expect("Failed to start entry");
            writer.write_all(content).expect("Failed to write entry");
        }
        writer.finish().expect("Failed to finish zip");

        let output_dir = self.temp_dir.path().join("out");
        ArchiveFixture { temp_dir: self.temp_dir, zip_path, output_dir }
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A built archive plus a scratch output directory beside it
pub struct ArchiveFixture {
    temp_dir: TempDir,
    pub zip_path: PathBuf,
    pub output_dir: PathBuf,
}

impl ArchiveFixture {
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Names of the folders created under the output directory, sorted
    pub fn output_folders(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(&self.output_dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_dir())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Parse `<output>/<folder>/conversation.json`
    pub fn read_conversation(&self, folder: &str) -> Value {
        let path = self.output_dir.join(folder).join("conversation.json");
        let text = fs::read_to_string(&path).expect("Failed to read conversation.json");
        serde_json::from_str(&text).expect("conversation.json is not valid JSON")
    }
}

/// Builder for conversation records
pub struct RecordBuilder {
    value: Value,
}

impl RecordBuilder {
    /// A record with a title and no timestamp
    pub fn new(title: &str) -> Self {
        Self { value: json!({ "title": title }) }
    }

    /// Start from an arbitrary JSON object
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// Set create_time as epoch seconds
    pub fn create_time(self, seconds: i64) -> Self {
        self.field("create_time", json!(seconds))
    }

    /// Add a message with the given text and optional content type
    pub fn message(mut self, text: &str, content_type: &str) -> Self {
        let object = self.value.as_object_mut().expect("record must be an object");
        let messages = object.entry("mapping").or_insert_with(|| json!({}));
        let id = format!("node-{}", messages.as_object().map(|m| m.len()).unwrap_or(0));
        messages[id] = json!({
            "message": {
                "content": { "content_type": content_type, "parts": [text] }
            }
        });
        self
    }

    /// Set an arbitrary top-level field
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.value[key] = value;
        self
    }

    pub fn to_value(&self) -> Value {
        self.value.clone()
    }
}

/// Folder token the tool derives for an epoch timestamp
pub fn datestamp_for(seconds: i64) -> String {
    Local.timestamp_opt(seconds, 0).unwrap().format("%m%d%y-%H%M").to_string()
}

/// Archive with a handful of realistic conversations and attachments
pub fn realistic_archive() -> ArchiveFixture {
    ArchiveBuilder::new()
        .with_records(&[
            RecordBuilder::new("Async Rust")
                .create_time(1_700_000_000)
                .message("How do I use tokio::select!?", "text")
                .message("```rust\ntokio::select! {}\n```", "code"),
            RecordBuilder::new("Plotting")
                .create_time(1_700_100_000)
                .message("Plot this csv with matplotlib, see chart.png", "text")
                .message("```python\nimport matplotlib\n```", "code")
                .field("language", json!("python")),
            RecordBuilder::new("Shell help")
                .create_time(1_700_200_000)
                .message("```bash\nls -la\n```", "text"),
        ])
        .with_directory("files/")
        .with_file("files/chart.png", b"\x89PNG fake")
        .with_file("files/unrelated.pdf", b"%PDF fake")
        .build()
}
