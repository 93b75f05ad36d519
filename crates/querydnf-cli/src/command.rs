use crate::error::CliError;
use querydnf_core::{
    config::TransformConfig,
    obs::{TransformTraceEvent, TransformTraceSink},
    predicate::{
        CustomParameter, DnfTransformer, FieldPresence, QueryPredicate, Row, eval as eval_row,
        fingerprint, is_dnf,
    },
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    io::{self, Read},
    path::Path,
};

///
/// RowFile
///
/// JSON row accepted by `querydnf eval`.
///

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RowFile {
    #[serde(default)]
    fields: BTreeMap<String, Value>,
    #[serde(default)]
    custom: BTreeSet<String>,
}

impl Row for RowFile {
    fn field(&self, name: &str) -> FieldPresence {
        self.fields
            .get(name)
            .map_or(FieldPresence::Missing, |value| {
                FieldPresence::Present(value.clone())
            })
    }

    fn custom(&self, parameter: &CustomParameter) -> bool {
        self.custom.contains(&parameter.name)
    }
}

///
/// StderrTraceSink
///

struct StderrTraceSink;

impl TransformTraceSink for StderrTraceSink {
    fn on_event(&self, event: TransformTraceEvent) {
        match event {
            TransformTraceEvent::Start { fingerprint, nodes } => {
                eprintln!("trace: start fingerprint={fingerprint} nodes={nodes}");
            }
            TransformTraceEvent::Distribute { factors, disjuncts } => {
                eprintln!("trace: distribute factors={factors} disjuncts={disjuncts}");
            }
            TransformTraceEvent::Finish {
                fingerprint,
                disjuncts,
            } => {
                eprintln!("trace: finish fingerprint={fingerprint} disjuncts={disjuncts}");
            }
        }
    }
}

#[derive(Serialize)]
struct FingerprintedOutput<'a> {
    fingerprint: String,
    predicate: &'a QueryPredicate,
}

pub(crate) fn transform(
    input: Option<&Path>,
    config: Option<&Path>,
    with_fingerprint: bool,
    trace: bool,
) -> Result<String, CliError> {
    let predicate: QueryPredicate = serde_json::from_str(&read_input(input)?)?;
    let config = match config {
        Some(path) => TransformConfig::from_toml_str(&read_file(path)?)?,
        None => TransformConfig::default(),
    };

    let sink = StderrTraceSink;
    let mut transformer = DnfTransformer::new(config);
    if trace {
        transformer = transformer.with_trace(&sink);
    }
    let output = transformer.transform(&predicate)?;

    let rendered = if with_fingerprint {
        serde_json::to_string_pretty(&FingerprintedOutput {
            fingerprint: fingerprint(&output).to_string(),
            predicate: &output,
        })?
    } else {
        serde_json::to_string_pretty(&output)?
    };

    Ok(rendered)
}

pub(crate) fn check(input: Option<&Path>) -> Result<String, CliError> {
    let predicate: QueryPredicate = serde_json::from_str(&read_input(input)?)?;

    Ok(serde_json::json!({ "dnf": is_dnf(&predicate) }).to_string())
}

pub(crate) fn eval(input: Option<&Path>, row: &Path) -> Result<String, CliError> {
    let predicate: QueryPredicate = serde_json::from_str(&read_input(input)?)?;
    let row: RowFile = serde_json::from_str(&read_file(row)?)?;

    Ok(serde_json::json!({ "matches": eval_row(&row, &predicate) }).to_string())
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(CliError::Stdin)?;
            Ok(buf)
        }
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
