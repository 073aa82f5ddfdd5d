//! Parsing of `helm list` tabular output
//!
//! Helm v2 has no stable machine-readable listing. Columns are aligned with
//! a mixture of literal spaces and tabs that varies with terminal-width
//! heuristics, and the CHART column fuses chart name and version into one
//! string. This module is the only place that knows about that text shape:
//! raw listing text goes in, a typed [`ObservedRelease`] comes out. If a
//! structured output mode ever appears, this file is the swap point.

use chrono::{DateTime, Local, NaiveDateTime};
use helmdrive_core::{ObservedRelease, ReleaseStatus};
use regex::Regex;

use crate::error::{ClientError, Result};

/// Timestamp layout of the UPDATED column, e.g. `Thu Jun  9 11:09:20 2022`
const UPDATED_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Strip the spacing helm mixes into its column alignment
///
/// Leading spaces go, runs of spaces hugging tab separators collapse into a
/// single tab, trailing spaces go. Alignment spacing is presentation, never
/// data. Already-clean output passes through unchanged.
pub fn clean_listing(raw: &str) -> String {
    let leading = Regex::new(r"(?m)^[ ]+").expect("valid regex");
    let around_tabs = Regex::new(r"[ ]*\t+[ ]*").expect("valid regex");
    let trailing = Regex::new(r"(?m)[ ]+$").expect("valid regex");

    let cleaned = leading.replace_all(raw, "");
    let cleaned = around_tabs.replace_all(&cleaned, "\t");
    trailing.replace_all(&cleaned, "").into_owned()
}

/// Find the first row whose NAME column equals `name`
///
/// Rows are scanned in listing order. The header row gets no special
/// handling; it is shaped like any other six-field row and can never equal
/// a real release name. Empty cleaned output and an exhausted scan both
/// mean the release does not exist - that is a distinguished outcome, not
/// a parse failure.
pub fn find_release(raw: &str, name: &str) -> Result<ObservedRelease> {
    let cleaned = clean_listing(raw);
    tracing::debug!(output = %cleaned, "cleaned listing output");

    if cleaned.is_empty() {
        return Err(ClientError::NotExist {
            name: name.to_string(),
        });
    }

    for line in cleaned.lines() {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 6 {
            return Err(ClientError::MalformedRow {
                found: fields.len(),
                line: line.to_string(),
            });
        }
        if fields[0] == name {
            return parse_row(name, &fields);
        }
    }

    Err(ClientError::NotExist {
        name: name.to_string(),
    })
}

/// Parse one matched row into typed observed state
fn parse_row(name: &str, fields: &[&str]) -> Result<ObservedRelease> {
    let revision: u32 = fields[1]
        .parse()
        .map_err(|_| ClientError::InvalidRevision {
            name: name.to_string(),
            value: fields[1].to_string(),
        })?;

    let last_updated = parse_updated(fields[2]).ok_or_else(|| ClientError::InvalidTimestamp {
        name: name.to_string(),
        value: fields[2].to_string(),
    })?;

    let (chart_name, chart_version) =
        split_chart(fields[3]).ok_or_else(|| ClientError::InvalidChart {
            name: name.to_string(),
            value: fields[3].to_string(),
        })?;

    Ok(ObservedRelease {
        name: fields[0].to_string(),
        revision,
        last_updated,
        status: ReleaseStatus::parse(fields[4]),
        chart_name: chart_name.to_string(),
        chart_version: chart_version.to_string(),
        namespace: fields[5].to_string(),
    })
}

/// Interpret the UPDATED column in the process's local timezone
///
/// An ambiguous wall-clock time (DST fold) resolves to the earliest
/// instant; a nonexistent one (DST gap) is a parse failure.
fn parse_updated(value: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(value, UPDATED_FORMAT).ok()?;
    naive.and_local_timezone(Local).earliest()
}

/// Split helm's composite CHART column into chart name and version
///
/// The name is one or more lowercase-alphanumeric segments with internal
/// hyphens; the version is the rightmost `MAJOR.MINOR.PATCH` suffix plus
/// any trailing pre-release or build text. The greedy name group makes the
/// last name/version hyphen the split point.
pub(crate) fn split_chart(field: &str) -> Option<(&str, &str)> {
    let pattern = Regex::new(r"^([a-z]([-a-z0-9]*[a-z0-9])?)-([0-9]+\.[0-9]+\.[0-9]+.*)$")
        .expect("valid regex");
    let captures = pattern.captures(field)?;
    // Groups 1 and 3 are non-optional whenever the pattern matches.
    let name = captures.get(1)?.as_str();
    let version = captures.get(3)?.as_str();
    Some((name, version))
}
