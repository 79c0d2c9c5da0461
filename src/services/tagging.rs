//! Simulated Image Tagging
//!
//! Derives photo tags from filename hints. There is no vision model behind
//! this; it gives uploads a plausible first set of tags so lane
//! classification and the agent prompts have something to work with.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tags and scene hints produced for one image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageTags {
    pub tags: Vec<String>,
    pub objects: Vec<String>,
    pub scene_summary: String,
    pub text_in_image: Option<String>,
}

struct TagRule {
    keywords: &'static [&'static str],
    tags: &'static [&'static str],
    objects: &'static [&'static str],
    summary: &'static str,
    text_in_image: Option<&'static str>,
}

// Later matches overwrite the scene summary of earlier ones.
const RULES: &[TagRule] = &[
    TagRule {
        keywords: &["crime", "scene"],
        tags: &["crime_scene", "evidence", "investigation"],
        objects: &["floor", "wall", "debris"],
        summary: "Crime scene photograph showing area of interest",
        text_in_image: None,
    },
    TagRule {
        keywords: &["weapon", "gun", "knife"],
        tags: &["weapon", "evidence", "dangerous"],
        objects: &["weapon"],
        summary: "Weapon evidence photograph",
        text_in_image: None,
    },
    TagRule {
        keywords: &["car", "vehicle"],
        tags: &["vehicle", "transportation", "evidence"],
        objects: &["car", "license_plate"],
        summary: "Vehicle related evidence",
        text_in_image: None,
    },
    TagRule {
        keywords: &["person", "suspect", "witness"],
        tags: &["person", "human", "potential_identification"],
        objects: &["person", "face", "clothing"],
        summary: "Person of interest photograph",
        text_in_image: None,
    },
    TagRule {
        keywords: &["document", "paper", "note"],
        tags: &["document", "text", "paper"],
        objects: &["paper", "text"],
        summary: "Documentary evidence",
        text_in_image: Some("Document detected - text extraction available"),
    },
    TagRule {
        keywords: &["blood", "dna"],
        tags: &["biological_evidence", "forensic", "dna_potential"],
        objects: &[],
        summary: "Biological evidence requiring forensic analysis",
        text_in_image: None,
    },
];

fn push_unique(list: &mut Vec<String>, items: &[&str]) {
    for item in items {
        if !list.iter().any(|existing| existing == item) {
            list.push(item.to_string());
        }
    }
}

/// Tag an image from its filename, stamping the analysis date.
pub fn generate_tags(filename: &str, analyzed_on: NaiveDate) -> ImageTags {
    let name = filename.to_lowercase();
    let mut result = ImageTags {
        scene_summary: "Scene analysis pending".to_string(),
        ..ImageTags::default()
    };

    for rule in RULES {
        if rule.keywords.iter().any(|kw| name.contains(kw)) {
            push_unique(&mut result.tags, rule.tags);
            push_unique(&mut result.objects, rule.objects);
            result.scene_summary = rule.summary.to_string();
            if let Some(text) = rule.text_in_image {
                result.text_in_image = Some(text.to_string());
            }
        }
    }

    if result.tags.is_empty() {
        push_unique(&mut result.tags, &["evidence", "photo", "unclassified"]);
        push_unique(&mut result.objects, &["unknown"]);
        result.scene_summary = "Photographic evidence awaiting classification".to_string();
    }

    result
        .tags
        .push(format!("analyzed_{}", analyzed_on.format("%Y-%m-%d")));
    result
}
