//! Subcommand implementations.
//!
//! Each command loads its inputs through `dpp-ingest`, runs the engine crates
//! and returns a result for `summary` to print. Files are only written here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use dpp_ingest::{CsvTable, load_mapping, load_schema_fields, read_csv};
use dpp_map::{MapperOptions, MappingState, analyze_all_with_limit, score_match};
use dpp_model::{ColumnTypeInfo, strip_indices};
use dpp_output::{ContextConfig, generate_with};
use dpp_validate::{Issue, ValidationInput, has_errors, validate_mapping};

use crate::types::{GenerateResult, MapResult, MappedColumn, ValidateResult};

/// Input files and mapper settings shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    pub csv: PathBuf,
    pub schema: PathBuf,
    /// Saved mapping; the auto-mapper seeds one when absent.
    pub mapping: Option<PathBuf>,
    pub cutoff: Option<f64>,
}

/// Record generation settings.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub sectors: Vec<String>,
    pub context_base: Option<String>,
    pub fail_on_issues: bool,
    pub output: Option<PathBuf>,
}

/// Loaded inputs with the mapping resolved.
#[derive(Debug)]
pub struct Workspace {
    pub table: CsvTable,
    pub state: MappingState,
    pub column_types: BTreeMap<String, ColumnTypeInfo>,
}

impl Workspace {
    /// Loads the CSV and field list, then seeds or loads the mapping.
    pub fn load(options: &InputOptions) -> Result<Self> {
        let table = read_csv(&options.csv).context("read CSV input")?;
        let fields = load_schema_fields(&options.schema).context("load schema fields")?;
        info!(
            headers = table.headers.len(),
            rows = table.len(),
            fields = fields.len(),
            "inputs loaded"
        );

        let mut mapper = MapperOptions::default();
        if let Some(cutoff) = options.cutoff {
            mapper = mapper.with_cutoff(cutoff);
        }
        let mut state = MappingState::new(table.headers.clone(), fields).with_options(mapper);
        match &options.mapping {
            Some(path) => {
                let saved = load_mapping(path).context("load saved mapping")?;
                let stale = saved
                    .keys()
                    .filter(|header| !table.headers.contains(header))
                    .count();
                if stale > 0 {
                    warn!(stale, "saved mapping names headers missing from the CSV");
                }
                state.load(&saved);
            }
            None => state.auto_map(),
        }

        let column_types =
            analyze_all_with_limit(&table.rows, &table.headers, mapper.sample_limit);
        Ok(Self {
            table,
            state,
            column_types,
        })
    }

    /// Runs every validation check over the current mapping.
    pub fn issues(&self) -> Vec<Issue> {
        let input = ValidationInput::new(self.state.mapping(), self.state.fields())
            .with_column_types(&self.column_types)
            .with_rows(&self.table.rows);
        validate_mapping(&input)
    }
}

pub fn run_map(options: &InputOptions, output: Option<&Path>) -> Result<MapResult> {
    let span = info_span!("map", csv = %options.csv.display());
    let _guard = span.enter();
    let workspace = Workspace::load(options)?;

    let columns = workspace
        .state
        .headers()
        .iter()
        .map(|header| {
            let path = workspace
                .state
                .mapping()
                .get(header)
                .cloned()
                .unwrap_or_default();
            let score = score_match(header, &strip_indices(&path));
            MappedColumn {
                header: header.clone(),
                column_type: workspace
                    .column_types
                    .get(header)
                    .copied()
                    .unwrap_or_else(ColumnTypeInfo::empty),
                path,
                score,
            }
        })
        .collect();

    if let Some(path) = output {
        write_json(path, workspace.state.mapping()).context("write mapping")?;
        info!(output = %path.display(), "mapping written");
    }

    Ok(MapResult {
        columns,
        summary: workspace.state.summary(),
        output: output.map(Path::to_path_buf),
    })
}

pub fn run_validate(options: &InputOptions) -> Result<ValidateResult> {
    let span = info_span!("validate", csv = %options.csv.display());
    let _guard = span.enter();
    let workspace = Workspace::load(options)?;
    let issues = workspace.issues();
    info!(issues = issues.len(), "validation complete");
    Ok(ValidateResult {
        has_errors: has_errors(&issues),
        summary: workspace.state.summary(),
        issues,
    })
}

pub fn run_generate(options: &InputOptions, generate: &GenerateOptions) -> Result<GenerateResult> {
    let span = info_span!("generate", csv = %options.csv.display());
    let _guard = span.enter();
    let workspace = Workspace::load(options)?;
    let issues = workspace.issues();

    if generate.fail_on_issues && has_errors(&issues) {
        warn!(
            issues = issues.len(),
            "validation errors found, records not generated"
        );
        return Ok(GenerateResult {
            records: Vec::new(),
            issues,
            output: None,
            blocked: true,
        });
    }

    if has_errors(&issues) {
        warn!(
            issues = issues.len(),
            "generating records despite validation errors"
        );
    }

    let context = generate
        .context_base
        .as_deref()
        .map_or_else(ContextConfig::default, ContextConfig::new);
    let records = generate_with(
        &workspace.table.rows,
        workspace.state.mapping(),
        &generate.sectors,
        &context,
    );
    debug!(records = records.len(), "records generated");

    if let Some(path) = &generate.output {
        write_json(path, &Value::Array(records.clone())).context("write records")?;
        info!(output = %path.display(), records = records.len(), "records written");
    }

    Ok(GenerateResult {
        records,
        issues,
        output: generate.output.clone(),
        blocked: false,
    })
}

/// Writes `value` as pretty JSON, creating parent directories.
fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
