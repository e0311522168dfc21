//! Tab-separated score records.
//!
//! # Format
//!
//! ```text
//! #node_label\t\t#score\t\t\t#class
//! <label>\t<score>\t<class>
//! ...
//! ```
//!
//! UTF-8, newline terminated, one node per line in [`ScoreMap`] order. The
//! label is the external node label when a [`NodeLabels`] table is given,
//! otherwise the raw numeric id. Scores are written with Rust's shortest
//! round-trip float formatting.
//!
//! Loading skips the header and reads the second and third
//! whitespace-separated fields of each line as `f64`; the label column is not
//! interpreted.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::attributes::AttributeTable;
use crate::error::FairnessError;
use crate::graph::NodeLabels;
use crate::scores::{Algorithm, ScoreMap};

/// Header line written at the top of every record.
pub const HEADER: &str = "#node_label\t\t#score\t\t\t#class";

/// Errors raised while writing or reading score records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("score record I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error(transparent)]
    Attribute(#[from] FairnessError),
}

/// Scores and classes read back from a record, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedScores {
    pub scores: Vec<f64>,
    pub classes: Vec<f64>,
}

/// File name used by [`save_score_results`].
#[must_use]
pub fn record_file_name(network: &str, algorithm: Algorithm) -> String {
    format!("{network}_{algorithm}_scores.txt")
}

/// Write `scores` with each node's class to `writer`.
///
/// # Errors
///
/// Returns [`RecordError::Attribute`] if a scored node has no class, or
/// [`RecordError::Io`] if writing fails.
pub fn write_score_record<W: Write>(
    writer: W,
    scores: &ScoreMap,
    attributes: &AttributeTable,
    labels: Option<&NodeLabels>,
) -> Result<(), RecordError> {
    let mut out = BufWriter::new(writer);
    writeln!(out, "{HEADER}")?;

    for (node, score) in scores.iter() {
        let class = attributes.get(node)?;
        match labels.and_then(|l| l.label(node)) {
            Some(label) => writeln!(out, "{label}\t{score}\t{class}")?,
            None => writeln!(out, "{node}\t{score}\t{class}")?,
        }
    }

    out.flush()?;
    Ok(())
}

/// Save a record as `{network}_{algorithm}_scores.txt` inside `directory`.
///
/// Returns the path written.
///
/// # Errors
///
/// See [`write_score_record`]; also fails if the file cannot be created.
#[instrument(skip(scores, attributes, labels), fields(nodes = scores.len()))]
pub fn save_score_results(
    directory: &Path,
    network: &str,
    algorithm: Algorithm,
    scores: &ScoreMap,
    attributes: &AttributeTable,
    labels: Option<&NodeLabels>,
) -> Result<PathBuf, RecordError> {
    let path = directory.join(record_file_name(network, algorithm));
    let file = File::create(&path)?;
    write_score_record(file, scores, attributes, labels)?;
    debug!(path = %path.display(), "score record saved");
    Ok(path)
}

/// Read a record from `reader`.
///
/// # Errors
///
/// Returns [`RecordError::Malformed`] for a line with fewer than three
/// fields or a non-numeric score/class, or [`RecordError::Io`].
pub fn read_score_record<R: BufRead>(reader: R) -> Result<LoadedScores, RecordError> {
    let mut loaded = LoadedScores::default();

    for (i, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let malformed = |reason: String| RecordError::Malformed { line: i + 1, reason };

        let (Some(score), Some(class)) = (fields.get(1), fields.get(2)) else {
            return Err(malformed(format!(
                "expected `label score class`, got {} field(s)",
                fields.len()
            )));
        };

        loaded.scores.push(
            score
                .parse()
                .map_err(|_| malformed(format!("score `{score}` is not a number")))?,
        );
        loaded.classes.push(
            class
                .parse()
                .map_err(|_| malformed(format!("class `{class}` is not a number")))?,
        );
    }

    Ok(loaded)
}

/// Load a record file.
///
/// # Errors
///
/// See [`read_score_record`]; also fails if the file cannot be opened.
#[instrument]
pub fn load_score_results(path: &Path) -> Result<LoadedScores, RecordError> {
    let file = File::open(path)?;
    let loaded = read_score_record(BufReader::new(file))?;
    debug!(rows = loaded.scores.len(), "score record loaded");
    Ok(loaded)
}
