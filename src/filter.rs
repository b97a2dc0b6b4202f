// src/filter.rs

use crate::error::{FameError, Result};
use glob::{MatchOptions, Pattern};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

const LANGUAGE_EXTENSIONS: &str = include_str!("../configs/language_extensions.json");

/// `*` and `?` stay within one path component
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Entry of the embedded language table
#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub extensions: Vec<String>,
}

/// Keeps files whose extension is requested directly or through a language.
///
/// When both lists are given only the explicit extensions that belong to one
/// of the languages are kept. An empty resulting list disables the filter.
pub fn select_by_extensions(
    files: Vec<String>,
    extensions: &[String],
    languages: &[String],
) -> Result<Vec<String>> {
    let extensions: Vec<String> = extensions.iter().map(|ext| normalize(ext)).collect();
    let language_extensions = extensions_of_languages(languages)?;
    let wanted = merge_extensions(extensions, language_extensions);

    if wanted.is_empty() {
        return Ok(files);
    }

    let wanted: HashSet<&str> = wanted.iter().map(String::as_str).collect();
    let selected: Vec<String> = files
        .into_iter()
        .filter(|file| wanted.contains(extension(file)))
        .collect();

    debug!(extensions = ?wanted, selected = selected.len(), "selected by extension");
    Ok(selected)
}

/// Drops files matching any of `exclude`, then keeps only files matching
/// at least one of `restrict_to` (when given).
pub fn select_by_glob(
    files: Vec<String>,
    exclude: &[String],
    restrict_to: &[String],
) -> Result<Vec<String>> {
    let exclude = compile(exclude)?;
    let restrict_to = compile(restrict_to)?;

    let selected: Vec<String> = files
        .into_iter()
        .filter(|file| !matches_any(&exclude, file))
        .filter(|file| restrict_to.is_empty() || matches_any(&restrict_to, file))
        .collect();

    debug!(selected = selected.len(), "selected by glob");
    Ok(selected)
}

pub fn load_languages() -> Result<Vec<Language>> {
    serde_json::from_str(LANGUAGE_EXTENSIONS).map_err(FameError::LanguageTable)
}

fn extensions_of_languages(languages: &[String]) -> Result<Vec<String>> {
    if languages.is_empty() {
        return Ok(Vec::new());
    }

    let table: HashMap<String, Language> = load_languages()?
        .into_iter()
        .map(|lang| (lang.name.to_lowercase(), lang))
        .collect();

    let mut extensions = Vec::new();
    for lang in languages {
        match table.get(&lang.to_lowercase()) {
            Some(found) => {
                debug!(
                    language = %found.name,
                    kind = %found.kind,
                    extensions = ?found.extensions,
                    "language"
                );
                extensions.extend(found.extensions.iter().cloned());
            }
            None => warn!(language = %lang, "unknown language"),
        }
    }
    Ok(extensions)
}

fn merge_extensions(extensions: Vec<String>, language_extensions: Vec<String>) -> Vec<String> {
    if extensions.is_empty() {
        return language_extensions;
    }
    if language_extensions.is_empty() {
        return extensions;
    }

    let known: HashSet<&String> = language_extensions.iter().collect();
    extensions
        .iter()
        .filter(|ext| known.contains(ext))
        .cloned()
        .collect()
}

/// Suffix of the last path component from its last dot, `""` if none.
fn extension(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rfind('.').map_or("", |dot| &name[dot..])
}

fn normalize(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

fn compile(globs: &[String]) -> Result<Vec<Pattern>> {
    globs
        .iter()
        .map(|glob| Pattern::new(glob).map_err(FameError::from))
        .collect()
}

fn matches_any(patterns: &[Pattern], file: &str) -> bool {
    patterns
        .iter()
        .any(|pattern| pattern.matches_with(file, MATCH_OPTIONS))
}
