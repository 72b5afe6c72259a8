//! Subcommand implementations

use std::error::Error;
use std::fs;
use std::path::Path;

use curation_core::{
    derive_keys, BatchReconciliation, ProjectReconciliation, ReconcileConfig, ReconcileError,
};
use curation_domain::{Column, StudyStub};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::decisions::{apply_case_decisions, apply_cluster_decisions, CaseDecision, ClusterDecision};

type CommandResult = Result<(), Box<dyn Error>>;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;
    Ok(value)
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> CommandResult {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn describe(stub: &StudyStub) -> String {
    let title = if stub.title.trim().is_empty() {
        "(untitled)"
    } else {
        stub.title.trim()
    };
    format!("[{}] {}", stub.id, title)
}

pub fn keys(stubs: &Path) -> CommandResult {
    let stubs: Vec<StudyStub> = read_json(stubs)?;

    for stub in &stubs {
        let keys: Vec<String> = derive_keys(stub).iter().map(ToString::to_string).collect();
        println!("{}\t{}", stub.id, keys.join("\t"));
    }

    Ok(())
}

pub fn scan(batch: &Path, config: &ReconcileConfig) -> CommandResult {
    let batch: Vec<StudyStub> = read_json(batch)?;
    let session = BatchReconciliation::new(batch, config);

    for (index, cluster) in session.clusters().iter().enumerate() {
        println!("cluster {}:", index);
        for (member, resolved) in cluster.iter().enumerate() {
            println!("  {}: {}", member, describe(&resolved.stub));
        }
    }

    tracing::info!(
        stubs = session.batch().len(),
        clusters = session.clusters().len(),
        "Scanned import batch"
    );
    Ok(())
}

pub fn dedupe(
    batch: &Path,
    decisions: &Path,
    output: Option<&Path>,
    config: &ReconcileConfig,
) -> CommandResult {
    let batch: Vec<StudyStub> = read_json(batch)?;
    let decisions: Vec<ClusterDecision> = read_json(decisions)?;

    let session = apply_cluster_decisions(BatchReconciliation::new(batch, config), &decisions)?;
    let committed = session.commit()?;

    write_json(&committed, output)
}

pub fn match_cases(batch: &Path, columns: &Path, config: &ReconcileConfig) -> CommandResult {
    let batch: Vec<StudyStub> = read_json(batch)?;
    let columns: Vec<Column> = read_json(columns)?;
    let session = ProjectReconciliation::new(batch, columns, config);

    for (index, case) in session.cases().iter().enumerate() {
        println!(
            "case {}: imported #{} {}",
            index,
            case.imported.batch_index,
            describe(&case.imported.stub)
        );
        for (member, candidate) in case.project_duplicates.iter().enumerate() {
            println!(
                "  {}: {} (column {} \"{}\", position {}, {})",
                member,
                describe(&candidate.stub),
                candidate.column_index,
                candidate.column_name,
                candidate.study_index,
                candidate.resolution
            );
        }
    }

    tracing::info!(cases = session.cases().len(), "Matched import batch against project");
    Ok(())
}

pub fn merge(
    batch: &Path,
    columns: &Path,
    decisions: &Path,
    output: Option<&Path>,
    config: &ReconcileConfig,
) -> CommandResult {
    let batch: Vec<StudyStub> = read_json(batch)?;
    let columns: Vec<Column> = read_json(columns)?;
    let decisions: Vec<CaseDecision> = read_json(decisions)?;

    let session = apply_case_decisions(ProjectReconciliation::new(batch, columns, config), &decisions)?;
    if !session.is_complete() {
        let unresolved = session.unresolved_count();
        tracing::warn!(unresolved, "Decisions leave stubs unresolved; nothing written");
        return Err(ReconcileError::IncompleteResolution { unresolved }.into());
    }

    let outcome = session.commit()?;
    write_json(&outcome, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curation_core::MergeOutcome;

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_merge_writes_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let batch = write(dir.path(), "batch.json", r#"[{"id":"i1","title":"Foo","doi":"10.1/x"}]"#);
        let columns = write(
            dir.path(),
            "columns.json",
            r#"[
                {"id":"c0","name":"Identification","stubStudies":[]},
                {"id":"c1","name":"Included","stubStudies":[{"id":"p1","title":"Foo","doi":"10.1/x"}]}
            ]"#,
        );
        let decisions = write(dir.path(), "decisions.json", r#"[{"case":0,"resolution":"not-duplicate"}]"#);
        let output = dir.path().join("out.json");

        merge(&batch, &columns, &decisions, Some(&output), &ReconcileConfig::default()).unwrap();

        let outcome: MergeOutcome = read_json(&output).unwrap();
        assert_eq!(outcome.demoted, 1);
        let intake: Vec<&str> = outcome.columns[0]
            .stub_studies
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(intake, vec!["i1", "p1"]);
        assert!(outcome.columns[1].is_empty());
    }

    #[test]
    fn test_merge_refuses_incomplete_decisions() {
        let dir = tempfile::tempdir().unwrap();
        let batch = write(dir.path(), "batch.json", r#"[{"id":"i1","title":"Foo"}]"#);
        let columns = write(
            dir.path(),
            "columns.json",
            r#"[{"id":"c0","name":"Identification","stubStudies":[{"id":"p1","title":"foo"}]}]"#,
        );
        let decisions = write(dir.path(), "decisions.json", "[]");
        let output = dir.path().join("out.json");

        let result = merge(&batch, &columns, &decisions, Some(&output), &ReconcileConfig::default());
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_dedupe_writes_batch() {
        let dir = tempfile::tempdir().unwrap();
        let batch = write(
            dir.path(),
            "batch.json",
            r#"[{"id":"a","title":"Foo","doi":"10.1/x"},{"id":"b","title":"Foo Bar","doi":"10.1/x"}]"#,
        );
        let decisions = write(
            dir.path(),
            "decisions.json",
            r#"[{"cluster":0,"stub":0,"resolution":"not-duplicate"},{"cluster":0,"stub":1,"resolution":"duplicate"}]"#,
        );
        let output = dir.path().join("out.json");

        dedupe(&batch, &decisions, Some(&output), &ReconcileConfig::default()).unwrap();

        let stubs: Vec<StudyStub> = read_json(&output).unwrap();
        assert!(!stubs[0].is_excluded());
        assert!(stubs[1].is_excluded());
    }

    #[test]
    fn test_read_json_reports_path() {
        let err = read_json::<Vec<StudyStub>>(Path::new("/nonexistent/batch.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/batch.json"));
    }
}
