// SPDX-License-Identifier: PMPL-1.0-or-later
//! Batch scanner for running the rule catalog across many documents.
//!
//! Documents are independent, so a batch fans out over the rayon thread pool
//! when the configuration allows it. Reports come back in input order.

use crate::engine::Engine;
use crate::error::Result;
use crate::report::{BatchReport, Report};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// A named HTML input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub html: String,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            html: html.into(),
        }
    }

    /// Read a document from disk, named by its path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), html))
    }
}

fn scan_one(engine: &Engine, doc: &SourceDocument) -> Result<Report> {
    Ok(engine.check_all(&doc.html)?.named(doc.name.as_str()))
}

/// Check every document with the engine's enabled rules.
pub fn scan_documents(engine: &Engine, documents: &[SourceDocument]) -> Result<BatchReport> {
    info!("Scanning {} document(s)", documents.len());

    let reports: Vec<Report> = if engine.config().parallel {
        documents
            .par_iter()
            .map(|doc| scan_one(engine, doc))
            .collect::<Result<_>>()?
    } else {
        documents
            .iter()
            .map(|doc| scan_one(engine, doc))
            .collect::<Result<_>>()?
    };

    let batch = BatchReport::new(reports);
    info!(
        "Scanned {} document(s), found {} violation(s)",
        batch.documents.len(),
        batch.violation_count()
    );
    Ok(batch)
}

/// Read and check a list of files.
pub fn scan_files(engine: &Engine, paths: &[PathBuf]) -> Result<BatchReport> {
    let documents = paths
        .iter()
        .map(|p| SourceDocument::from_path(p))
        .collect::<Result<Vec<_>>>()?;
    scan_documents(engine, &documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::error::EngineError;

    fn sample() -> Vec<SourceDocument> {
        vec![
            SourceDocument::new("a.html", r#"<img src="a.png">"#),
            SourceDocument::new("b.html", r#"<p>Fine</p>"#),
            SourceDocument::new("c.html", r#"<center>Old</center>"#),
        ]
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let parallel = Engine::default();
        let sequential = Engine::new(EngineConfig {
            parallel: false,
            ..EngineConfig::default()
        })
        .expect("engine");

        let a = scan_documents(&parallel, &sample()).expect("scan");
        let b = scan_documents(&sequential, &sample()).expect("scan");

        let names = |batch: &BatchReport| -> Vec<Option<String>> {
            batch.documents.iter().map(|r| r.document.clone()).collect()
        };
        assert_eq!(names(&a), names(&b));
        assert_eq!(a.violation_count(), b.violation_count());
        assert!(a.documents[1].is_clean());
        assert!(a.has_errors());
    }

    #[test]
    fn test_oversized_document_fails_batch() {
        let engine = Engine::new(EngineConfig {
            max_input_bytes: 12,
            ..EngineConfig::default()
        })
        .expect("engine");
        let err = scan_documents(&engine, &sample()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    #[test]
    fn test_scan_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("page.html");
        std::fs::write(&path, r#"<a href="http://example.com">x</a>"#).expect("write");

        let batch = scan_files(&Engine::default(), &[path.clone()]).expect("scan");
        assert_eq!(batch.documents[0].document.as_deref(), Some(path.display().to_string().as_str()));
        assert!(batch.documents[0].outcome("no-insecure-urls").is_some());
    }

    #[test]
    fn test_scan_missing_file() {
        let err = scan_files(&Engine::default(), &[PathBuf::from("/nonexistent/page.html")]).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
