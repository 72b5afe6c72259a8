//! Merging a resolved import batch into project columns

use std::collections::HashMap;

use curation_domain::{Column, StudyStub};
use serde::{Deserialize, Serialize};

use super::project::{DuplicateCase, ProjectCandidate};
use super::Resolution;
use crate::error::ReconcileError;
use crate::intake::prepend_in_place;

/// Result of committing a project reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    /// Import batch with resolved exclusion tags
    pub import_batch: Vec<StudyStub>,
    /// Full column collection to persist in one write
    pub columns: Vec<Column>,
    /// Promoted stubs pulled back to intake as duplicates
    pub demoted: usize,
    /// References that no longer matched the columns and were left alone
    pub skipped: usize,
}

pub(crate) fn merge_into_columns(
    import_batch: &[StudyStub],
    cases: &[DuplicateCase],
    live: &[Column],
) -> Result<MergeOutcome, ReconcileError> {
    if live.is_empty() {
        return Err(ReconcileError::MissingIntakeColumn);
    }

    let mut batch = import_batch.to_vec();
    let mut columns = live.to_vec();
    let mut skipped = 0;

    // Last decision per (column, position) wins; order is first-seen
    let mut order: Vec<(usize, usize)> = Vec::new();
    let mut decisions: HashMap<(usize, usize), &ProjectCandidate> = HashMap::new();

    for case in cases {
        let imported = &case.imported;
        match batch.get_mut(imported.batch_index) {
            Some(slot) if slot.has_id() && slot.id == imported.stub.id => {
                slot.exclusion_tag = imported.stub.exclusion_tag.clone();
            }
            _ => {
                skipped += 1;
                tracing::debug!(
                    batch_index = imported.batch_index,
                    id = %imported.stub.id,
                    "imported stub no longer in batch"
                );
            }
        }

        for candidate in &case.project_duplicates {
            if candidate.resolution == Resolution::Excluded {
                continue;
            }

            let position = (candidate.column_index, candidate.study_index);
            let current = live
                .get(candidate.column_index)
                .map(|column| column.holds_at(candidate.study_index, &candidate.stub.id))
                .unwrap_or(false);

            if !current {
                skipped += 1;
                tracing::debug!(
                    column_index = candidate.column_index,
                    study_index = candidate.study_index,
                    id = %candidate.stub.id,
                    "stale column reference"
                );
                continue;
            }

            if decisions.insert(position, candidate).is_none() {
                order.push(position);
            }
        }
    }

    let mut demoted: Vec<StudyStub> = Vec::new();
    let mut removals: Vec<(usize, usize)> = Vec::new();

    for position in &order {
        let candidate = decisions[position];
        let (column_index, study_index) = *position;

        if column_index > 0 && candidate.resolution == Resolution::Duplicate {
            removals.push(*position);
            demoted.push(candidate.stub.clone());
        } else if let Some(slot) = columns
            .get_mut(column_index)
            .and_then(|column| column.stub_studies.get_mut(study_index))
        {
            slot.exclusion_tag = candidate.stub.exclusion_tag.clone();
        }
    }

    // Highest positions first so earlier indices stay valid
    removals.sort_unstable_by(|a, b| b.cmp(a));
    for (column_index, study_index) in removals {
        columns[column_index].stub_studies.remove(study_index);
    }

    for stub in &demoted {
        prepend_in_place(&mut columns, std::slice::from_ref(stub))?;
    }
    prepend_in_place(&mut columns, &batch)?;

    tracing::info!(
        imported = batch.len(),
        cases = cases.len(),
        demoted = demoted.len(),
        skipped,
        "merged import batch into project columns"
    );

    Ok(MergeOutcome {
        import_batch: batch,
        columns,
        demoted: demoted.len(),
        skipped,
    })
}
