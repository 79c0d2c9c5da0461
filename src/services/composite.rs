//! Composite Sketch Prompts
//!
//! Turns a witness description of a suspect into a prompt for a photorealistic
//! composite portrait. Only the prompt is produced; no image is generated.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// Fixed style directives every composite prompt starts with.
const STYLE_PARTS: &[&str] = &[
    "Photorealistic police composite sketch style portrait",
    "professional forensic artist rendering",
    "neutral gray background",
    "front-facing view",
    "detailed facial features",
    "high resolution",
    "realistic skin texture",
];

/// Mutually exclusive descriptors: the first pattern that matches wins.
const HEIGHT_RULES: &[(&str, &str)] = &[
    (r"(?i)tall|6['\s]?f|over 6", "tall stature"),
    (r"(?i)short|5['\s]?[0-5]|under 5['\s]?6", "shorter stature"),
    (r"(?i)medium|average", "average height"),
];

const BUILD_RULES: &[(&str, &str)] = &[
    (r"(?i)heavy|large|big|overweight", "heavy build"),
    (r"(?i)slim|thin|skinny|lean", "slim build"),
    (r"(?i)muscular|athletic|fit", "athletic build"),
];

/// Independent marks: every pattern that matches adds its feature.
const MARK_RULES: &[(&str, &str)] = &[
    (r"(?i)beard|goatee|mustache|facial hair", "facial hair"),
    (r"(?i)scar", "visible scar"),
    (r"(?i)tattoo", "visible tattoo"),
    (r"(?i)glasses|spectacles", "wearing glasses"),
];

const HAIR_PATTERN: &str = r"(?i)(black|brown|blonde|red|gray|grey|white|bald)\s*(hair)?";
const AGE_PATTERN: &str =
    r"(?i)\b(\d{1,2})\s*(?:years?\s*old|yo|y/o)\b|\b(young|middle[- ]aged|elderly|older)\b";
const CLOTHING_PATTERN: &str = r"(?i)\b(?:wearing|in|had on)\s+([^,.]+)";

struct CompiledRule {
    regex: Regex,
    feature: &'static str,
}

fn compile_rules(rules: &[(&str, &'static str)]) -> Vec<CompiledRule> {
    rules
        .iter()
        .filter_map(|(pattern, feature)| {
            Regex::new(pattern)
                .ok()
                .map(|regex| CompiledRule {
                    regex,
                    feature: *feature,
                })
        })
        .collect()
}

fn height_rules() -> &'static Vec<CompiledRule> {
    static RULES: OnceLock<Vec<CompiledRule>> = OnceLock::new();
    RULES.get_or_init(|| compile_rules(HEIGHT_RULES))
}

fn build_rules() -> &'static Vec<CompiledRule> {
    static RULES: OnceLock<Vec<CompiledRule>> = OnceLock::new();
    RULES.get_or_init(|| compile_rules(BUILD_RULES))
}

fn mark_rules() -> &'static Vec<CompiledRule> {
    static RULES: OnceLock<Vec<CompiledRule>> = OnceLock::new();
    RULES.get_or_init(|| compile_rules(MARK_RULES))
}

fn capture_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [HAIR_PATTERN, AGE_PATTERN, CLOTHING_PATTERN]
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

fn first_feature(rules: &[CompiledRule], text: &str) -> Option<String> {
    rules
        .iter()
        .find(|rule| rule.regex.is_match(text))
        .map(|rule| rule.feature.to_string())
}

/// A composite prompt and the features read from the description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeSketch {
    pub description: String,
    pub features: Vec<String>,
    pub prompt: String,
}

/// Features in prompt order: height, build, hair, age, marks, clothing.
pub fn extract_features(description: &str) -> Vec<String> {
    let mut features = Vec::new();
    features.extend(first_feature(height_rules(), description));
    features.extend(first_feature(build_rules(), description));

    let captures = capture_patterns();
    if let Some(hair) = captures.first().and_then(|re| re.captures(description)) {
        features.push(format!("{} hair", hair[1].to_lowercase()));
    }
    if let Some(age) = captures.get(1).and_then(|re| re.captures(description)) {
        if let Some(years) = age.get(1) {
            features.push(format!("approximately {} years old", years.as_str()));
        } else if let Some(word) = age.get(2) {
            features.push(format!("{} appearance", word.as_str().to_lowercase()));
        }
    }

    features.extend(
        mark_rules()
            .iter()
            .filter(|rule| rule.regex.is_match(description))
            .map(|rule| rule.feature.to_string()),
    );

    if let Some(clothing) = captures.get(2).and_then(|re| re.captures(description)) {
        features.push(format!("clothing: {}", clothing[1].trim()));
    }
    features
}

/// Build the composite prompt for a suspect description.
pub fn build_composite_prompt(description: &str) -> AppResult<CompositeSketch> {
    let description = description.trim();
    if description.is_empty() {
        return Err(AppError::validation("Suspect description is required"));
    }

    let features = extract_features(description);
    let mut parts: Vec<String> = STYLE_PARTS.iter().map(|p| p.to_string()).collect();
    if !features.is_empty() {
        parts.push(format!("Subject details: {}", features.join(", ")));
    }
    parts.push(format!("Based on witness description: {}", description));

    tracing::debug!(
        "[Composite] {} features read from a {}-char description",
        features.len(),
        description.len()
    );

    Ok(CompositeSketch {
        description: description.to_string(),
        features,
        prompt: format!("{}.", parts.join(". ")),
    })
}
