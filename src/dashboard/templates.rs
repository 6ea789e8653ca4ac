use askama::Template;

use crate::preview::{ColumnSummary, Preview, PreviewFile};
use crate::types::Value;

pub const PAGE_TITLE: &str = "KYVA Attendance & Engagement — Demo Viewer";

/// One entry of the file dropdown.
pub struct FileOption {
    pub key: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: &'static str,
    pub files: Vec<FileOption>,
    pub file_name: String,
    pub rows: String,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub head: Vec<Vec<Value>>,
    pub head_len: usize,
    pub summary: Vec<ColumnSummary>,
}

impl IndexTemplate {
    pub fn new(files: &[PreviewFile], preview: Preview) -> Self {
        let files = files
            .iter()
            .map(|f| FileOption {
                key: f.key.clone(),
                name: f.name.clone(),
                selected: f.key == preview.key,
            })
            .collect();
        Self {
            title: PAGE_TITLE,
            files,
            file_name: preview.file_name,
            rows: crate::curate::format_thousands(preview.rows),
            columns: preview.columns,
            column_names: preview.column_names,
            head_len: preview.head.len(),
            head: preview.head,
            summary: preview.summary,
        }
    }
}

#[derive(Template)]
#[template(path = "empty.html")]
pub struct EmptyTemplate {
    pub title: &'static str,
    pub data_dir: String,
}
