//! Strain summary text files
//!
//! Each strain folder carries a `<Name>_summary.txt` with a header line
//! `<Name> (RSPnnn) Summary` and "Nearest Genetic Relatives" sections
//! listing `<distance> - <Name> (RSPnnn)` lines. Strains with their own
//! summary are complete; strains that only show up as relatives are
//! incomplete.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use super::{Dataset, DatasetError};
use crate::strain::{pair_key, Category, Relationship, StrainCatalog, StrainNode, StrainSet};

const SUMMARY_SUFFIX: &str = "_summary.txt";

const RELATIVE_SECTIONS: &[&str] = &[
    "Nearest Genetic Relatives (All Samples):",
    "Nearest Genetic Relatives (Base Tree):",
];

/// A relative listed in a summary
#[derive(Debug, Clone, PartialEq)]
pub struct Relative {
    pub name: String,
    pub rsp: String,
    pub distance: f64,
}

/// The parts of a strain summary used for the tree
#[derive(Debug, Clone, PartialEq)]
pub struct StrainSummary {
    pub name: String,
    pub rsp: Option<String>,
    pub relatives: Vec<Relative>,
}

/// Find all summary files under `dir`, skipping hidden directories
pub fn discover_summaries(dir: &Path) -> Vec<PathBuf> {
    let mut summaries: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(SUMMARY_SUFFIX))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    summaries.sort();
    summaries
}

fn is_hidden(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.starts_with('.'))
}

pub(super) fn load_dir(dir: &Path) -> Result<Dataset, DatasetError> {
    let paths = discover_summaries(dir);
    if paths.is_empty() {
        return Err(DatasetError::NoSummaries(dir.to_path_buf()));
    }

    let mut summaries = Vec::with_capacity(paths.len());
    for path in &paths {
        let content = fs::read_to_string(path)?;
        let fallback = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(SUMMARY_SUFFIX))
            .unwrap_or("unknown");
        debug!("Parsing summary {:?}", path);
        summaries.push(parse_summary(&content, fallback));
    }

    Ok(assemble(summaries))
}

/// Parse one summary file. `fallback_name` is used when the header is missing.
pub fn parse_summary(content: &str, fallback_name: &str) -> StrainSummary {
    let (name, rsp) = content
        .lines()
        .find_map(parse_header)
        .unwrap_or_else(|| (fallback_name.replace('_', " "), None));

    let mut relatives = Vec::new();
    let mut in_section = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if RELATIVE_SECTIONS.contains(&trimmed) {
            in_section = true;
            continue;
        }
        if trimmed.is_empty() {
            in_section = false;
            continue;
        }
        if !in_section {
            continue;
        }

        match parse_relative(trimmed) {
            Some(relative) => relatives.push(relative),
            None => warn!("Skipping unparsable relative line in '{}': {}", name, trimmed),
        }
    }

    StrainSummary {
        name,
        rsp,
        relatives,
    }
}

/// `Blue Dream (RSP10001) Summary` → ("Blue Dream", Some("RSP10001"))
fn parse_header(line: &str) -> Option<(String, Option<String>)> {
    let rest = line.trim().strip_suffix("Summary")?.trim_end();
    if rest.is_empty() {
        return None;
    }

    match rest.rfind('(') {
        Some(open) if rest.ends_with(')') => {
            let name = rest[..open].trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), find_rsp(&rest[open..])))
        }
        _ => Some((rest.to_string(), None)),
    }
}

/// `0.123 - Haze (RSP10002)(rsp10002)`; lines without an RSP id are rejected
fn parse_relative(line: &str) -> Option<Relative> {
    let (distance, info) = line.split_once(" - ")?;
    let distance: f64 = distance.trim().parse().ok()?;
    if !distance.is_finite() || distance < 0.0 {
        return None;
    }

    let name = info.split('(').next()?.trim();
    if name.is_empty() {
        return None;
    }

    Some(Relative {
        name: name.to_string(),
        rsp: find_rsp(info)?,
        distance,
    })
}

/// First `RSP` token followed by at least one digit
fn find_rsp(text: &str) -> Option<String> {
    let mut search = text;
    while let Some(pos) = search.find("RSP") {
        let tail = &search[pos + 3..];
        let digits = tail.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 {
            return Some(format!("RSP{}", &tail[..digits]));
        }
        search = tail;
    }
    None
}

fn strain_id(name: &str) -> String {
    name.replace(' ', "_")
}

/// Merge summaries into one dataset
fn assemble(summaries: Vec<StrainSummary>) -> Dataset {
    let mut strains = StrainSet::new();

    for summary in &summaries {
        let mut node = StrainNode::new(strain_id(&summary.name))
            .with_label(summary.name.as_str())
            .with_category(Category::Complete);
        node.rsp = summary.rsp.clone();
        if !strains.insert(node) {
            warn!("Duplicate summary for '{}' ignored", summary.name);
        }
    }

    let mut relationships: Vec<Relationship> = Vec::new();
    let mut seen: HashMap<(String, String), usize> = HashMap::new();

    for summary in &summaries {
        let from = strain_id(&summary.name);
        for relative in &summary.relatives {
            let to = strain_id(&relative.name);
            if to == from {
                continue;
            }

            if !strains.contains(&to) {
                strains.insert(
                    StrainNode::new(to.as_str())
                        .with_label(relative.name.as_str())
                        .with_category(Category::Incomplete)
                        .with_rsp(relative.rsp.as_str()),
                );
            }

            let key = pair_key(&from, &to);
            if let Some(&idx) = seen.get(&key) {
                let existing = &mut relationships[idx];
                if relative.distance < existing.distance {
                    existing.distance = relative.distance;
                }
            } else {
                seen.insert(key, relationships.len());
                relationships.push(Relationship::new(from.as_str(), to, relative.distance));
            }
        }
    }

    Dataset::new(strains, relationships)
}
