//! End-to-end document generation: discover files, extract records from each one,
//! assemble the merged document.

use crate::assembler::{DocumentAssembler, FileRecords, SwaggerDocument};
use crate::comment_block::extract_comment_block;
use crate::meta::DocumentMeta;
use crate::models::{parse_model, DeclarationSyntax, Model};
use crate::routes::{parse_route, RecordContext, Route};
use crate::scanner::FileScanner;
use crate::source::{SourceFile, SourceReader};
use crate::symbols::locate_symbols;
use crate::tags::{lex_tags, TagTable};
use anyhow::Result;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;

/// Lexical settings for annotation extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Single-line comment prefix, stripped from block lines
    pub comment_prefix: String,
    /// Keyword opening the type declaration after a `@model` block
    pub declaration_keyword: String,
    /// Source file extensions to scan, without the dot
    pub extensions: Vec<String>,
    /// Substring locating route blocks
    pub route_marker: String,
    /// Substring locating model blocks
    pub model_marker: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            comment_prefix: "// ".to_string(),
            declaration_keyword: "type ".to_string(),
            extensions: vec!["go".to_string()],
            route_marker: "@route".to_string(),
            model_marker: "@model ".to_string(),
        }
    }
}

impl GeneratorConfig {
    fn declaration_syntax(&self) -> DeclarationSyntax<'_> {
        DeclarationSyntax {
            keyword: &self.declaration_keyword,
            comment_prefix: &self.comment_prefix,
        }
    }
}

/// Builds the document for the source tree at `root`.
///
/// Metadata comes from `root/swagger-meta.json` when present. Malformed annotations are
/// logged and skipped; only failures to enumerate or read files are errors.
pub fn build_document(root: &Path, config: &GeneratorConfig) -> Result<SwaggerDocument> {
    let meta = DocumentMeta::load(root)?;
    build_document_with_meta(root, config, meta)
}

/// Like [`build_document`], with metadata supplied by the caller.
pub fn build_document_with_meta(
    root: &Path,
    config: &GeneratorConfig,
    meta: DocumentMeta,
) -> Result<SwaggerDocument> {
    info!("Building swagger document from path {}", root.display());

    let scanner = FileScanner::new(root.to_path_buf(), config.extensions.clone());
    let scan_result = scanner.scan()?;
    info!(
        "Found {} source files ({} entries skipped with warnings)",
        scan_result.source_files.len(),
        scan_result.warnings.len()
    );

    let sources = SourceReader::read_files(&scan_result.source_files)?;
    let records = extract_all(&sources, config);

    let route_count: usize = records.iter().map(|r| r.routes.len()).sum();
    let model_count: usize = records.iter().map(|r| r.models.len()).sum();
    info!("Extracted {} routes and {} models", route_count, model_count);

    Ok(DocumentAssembler::new(meta).assemble(&records))
}

/// Extracts records from every source in parallel.
///
/// The result is in the same order as `sources`, whatever order the files finish in.
pub fn extract_all(sources: &[SourceFile], config: &GeneratorConfig) -> Vec<FileRecords> {
    sources
        .par_iter()
        .map(|source| extract_file(source, config))
        .collect()
}

/// Extracts all routes and models from one file.
pub fn extract_file(source: &SourceFile, config: &GeneratorConfig) -> FileRecords {
    FileRecords {
        source_file: source.path.clone(),
        routes: extract_routes(source, config),
        models: extract_models(source, config),
    }
}

/// Runs `parse` once per distinct comment block containing `marker`.
fn for_each_block<T>(
    source: &SourceFile,
    marker: &str,
    comment_prefix: &str,
    mut parse: impl FnMut(&TagTable, RecordContext<'_>) -> crate::error::Result<T>,
    kind: &str,
) -> Vec<T> {
    let symbols = match locate_symbols(&source.lines, marker) {
        Ok(symbols) => symbols,
        Err(e) => {
            debug!("Skipping {} for {}s: {}", source.path.display(), kind, e);
            return Vec::new();
        }
    };

    let mut seen_blocks = HashSet::new();
    let mut records = Vec::new();

    for symbol in symbols {
        let block = extract_comment_block(&source.lines, symbol.line_number, comment_prefix);
        if !seen_blocks.insert(block.start_line) {
            continue;
        }

        let table = lex_tags(&block.lines);
        let context = RecordContext {
            source_file: &source.path,
            line_number: block.next_line(),
        };
        debug!(
            "{}: {} block with {} directives {:?}",
            context.location(),
            kind,
            table.len(),
            table.keys().map(|tag| tag.as_str()).collect::<Vec<_>>()
        );

        match parse(&table, context) {
            Ok(record) => records.push(record),
            Err(e) => warn!("{}: skipping {}: {}", context.location(), kind, e),
        }
    }

    records
}

fn extract_routes(source: &SourceFile, config: &GeneratorConfig) -> Vec<Route> {
    for_each_block(
        source,
        &config.route_marker,
        &config.comment_prefix,
        parse_route,
        "route",
    )
}

fn extract_models(source: &SourceFile, config: &GeneratorConfig) -> Vec<Model> {
    let syntax = config.declaration_syntax();
    for_each_block(
        source,
        &config.model_marker,
        &config.comment_prefix,
        |table, context| parse_model(table, &source.lines, context, syntax),
        "model",
    )
}
