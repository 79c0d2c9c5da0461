//! Tag Command

use chrono::NaiveDate;
use serde::Serialize;

use crate::services::tagging::{generate_tags, ImageTags};

/// Simulated tags of one file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaggedFile {
    pub filename: String,
    #[serde(flatten)]
    pub tags: ImageTags,
}

pub fn tag_files(filenames: &[String], analyzed_on: NaiveDate) -> Vec<TaggedFile> {
    filenames
        .iter()
        .map(|filename| TaggedFile {
            filename: filename.clone(),
            tags: generate_tags(filename, analyzed_on),
        })
        .collect()
}
