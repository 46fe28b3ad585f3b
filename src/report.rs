//! Human-readable card descriptions.

use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::card::{Card, CardDump};
use crate::desfire::DesfireCard;
use crate::error::CardError;
use crate::localize::{Localizer, StringKey};
use crate::ultralight::UltralightCard;
use crate::util::{hex_dump, hex_string};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Hex dump of the contents, when there are any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Nesting depth, 0 for top level entries
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardReport {
    pub title: String,
    pub uid: String,
    pub lines: Vec<ReportLine>,
}

impl CardReport {
    /// Renders the report as indented text. Hex dumps are included when
    /// `with_data` is set.
    pub fn render_text(&self, with_data: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", self.title, self.uid);
        for line in &self.lines {
            let indent = "  ".repeat(line.depth + 1);
            let _ = writeln!(out, "{}{}: {}", indent, line.title, line.subtitle);
            if let Some(detail) = &line.detail {
                let _ = writeln!(out, "{}  {}", indent, detail);
            }
            if with_data {
                if let Some(data) = &line.data {
                    for row in data.lines() {
                        let _ = writeln!(out, "{}  {}", indent, row);
                    }
                }
            }
        }
        out
    }
}

pub fn inspect(card: &Card, localizer: &dyn Localizer) -> CardReport {
    let uid = hex_string(card.uid());
    match card {
        Card::Desfire(card) => inspect_desfire(card, uid, localizer),
        Card::Ultralight(card) => inspect_ultralight(card, uid, localizer),
    }
}

fn inspect_desfire(card: &DesfireCard, uid: String, localizer: &dyn Localizer) -> CardReport {
    let mut lines = Vec::new();
    for app in &card.applications {
        lines.push(ReportLine {
            title: app.title(localizer),
            subtitle: localizer.localize_plural(
                StringKey::DesfireAppFileCount,
                app.files.len() as u64,
                &[&app.files.len()],
            ),
            detail: None,
            data: None,
            depth: 0,
        });
        for file in &app.files {
            lines.push(ReportLine {
                title: file.title(localizer),
                subtitle: file.subtitle(localizer),
                detail: file.settings.detail(localizer),
                data: file
                    .data
                    .as_deref()
                    .filter(|data| !data.is_empty())
                    .map(hex_dump),
                depth: 1,
            });
        }
    }

    let invalid = card.invalid_file_count();
    if invalid > 0 {
        tracing::debug!(invalid, "card has files with unrecognized settings");
    }

    CardReport {
        title: localizer.localize(StringKey::DesfireCardName),
        uid,
        lines,
    }
}

fn inspect_ultralight(card: &UltralightCard, uid: String, localizer: &dyn Localizer) -> CardReport {
    let page_count = card.pages.len();
    let (title, status) = match card.identity_name(localizer) {
        Some(name) => (name, localizer.localize(StringKey::BlankMfuCardDetail)),
        None => (
            localizer.localize(StringKey::UltralightCardName),
            localizer.localize(StringKey::UltralightNotBlank),
        ),
    };

    let data: Vec<u8> = card.pages.iter().flat_map(|p| p.data.iter().copied()).collect();
    let line = ReportLine {
        title: card
            .model
            .clone()
            .unwrap_or_else(|| localizer.localize(StringKey::UltralightCardName)),
        subtitle: localizer.localize_plural(
            StringKey::UltralightPageCount,
            page_count as u64,
            &[&page_count],
        ),
        detail: Some(status),
        data: (!data.is_empty()).then(|| hex_dump(&data)),
        depth: 0,
    };

    CardReport {
        title,
        uid,
        lines: vec![line],
    }
}

/// Result of inspecting one dump file
#[derive(Debug)]
pub struct InspectOutcome {
    pub path: PathBuf,
    pub report: Result<CardReport, CardError>,
}

pub fn inspect_path(path: &Path, localizer: &dyn Localizer) -> Result<CardReport, CardError> {
    let card = CardDump::load(path)?.into_card()?;
    Ok(inspect(&card, localizer))
}

/// Inspects many dumps in parallel. Outcomes keep the order of `paths`;
/// a dump that fails to load does not affect the others.
pub fn inspect_paths(paths: &[PathBuf], localizer: &dyn Localizer) -> Vec<InspectOutcome> {
    paths
        .par_iter()
        .map(|path| {
            let report = inspect_path(path, localizer);
            if let Err(e) = &report {
                tracing::warn!(path = %path.display(), error = %e, "failed to inspect dump");
            }
            InspectOutcome {
                path: path.clone(),
                report,
            }
        })
        .collect()
}
