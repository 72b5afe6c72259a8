//! Reconciling an import batch against a project's columns

use curation_domain::{Column, StudyStub, Tag};
use serde::{Deserialize, Serialize};

use super::merge::{merge_into_columns, MergeOutcome};
use super::Resolution;
use crate::config::ReconcileConfig;
use crate::deduplication::{derive_keys, group_by_duplicate_key};
use crate::error::ReconcileError;

/// An imported stub under review, with its position in the import batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedCandidate {
    pub batch_index: usize,
    pub stub: StudyStub,
    pub resolution: Resolution,
}

/// A project stub annotated with where it sat when the columns were read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCandidate {
    pub column_index: usize,
    pub study_index: usize,
    pub column_name: String,
    pub stub: StudyStub,
    pub resolution: Resolution,
}

impl AsRef<StudyStub> for ProjectCandidate {
    fn as_ref(&self) -> &StudyStub {
        &self.stub
    }
}

/// One imported stub against the project stubs sharing its key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCase {
    pub imported: ImportedCandidate,
    pub project_duplicates: Vec<ProjectCandidate>,
}

/// A member of a [`DuplicateCase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseMember {
    Imported,
    Project(usize),
}

impl DuplicateCase {
    /// Resolved once the imported stub and every project duplicate are settled
    pub fn is_resolved(&self) -> bool {
        self.unresolved_count() == 0
    }

    pub fn unresolved_count(&self) -> usize {
        let imported = usize::from(!self.imported.resolution.is_settled());
        let project = self
            .project_duplicates
            .iter()
            .filter(|candidate| !candidate.resolution.is_settled())
            .count();
        imported + project
    }

    pub fn resolution_of(&self, member: CaseMember) -> Option<Resolution> {
        match member {
            CaseMember::Imported => Some(self.imported.resolution),
            CaseMember::Project(index) => self
                .project_duplicates
                .get(index)
                .map(|candidate| candidate.resolution),
        }
    }

    /// Set one member's resolution; returns whether anything changed
    fn set(&mut self, member: CaseMember, resolution: Resolution, duplicate_tag: &Tag) -> bool {
        match member {
            CaseMember::Imported => {
                self.imported.resolution = resolution;
                resolution.apply(&mut self.imported.stub, duplicate_tag);
                true
            }
            CaseMember::Project(index) => match self.project_duplicates.get_mut(index) {
                Some(candidate) if candidate.resolution.is_toggleable() => {
                    candidate.resolution = resolution;
                    resolution.apply(&mut candidate.stub, duplicate_tag);
                    true
                }
                Some(candidate) => {
                    tracing::debug!(id = %candidate.stub.id, "project stub is read-only");
                    false
                }
                None => {
                    tracing::debug!(index, "ignoring resolve for unknown project duplicate");
                    false
                }
            },
        }
    }

    /// Mark every still-unresolved member other than `kept` as duplicate
    fn auto_resolve(&mut self, kept: CaseMember, duplicate_tag: &Tag) {
        if kept != CaseMember::Imported && self.imported.resolution == Resolution::Unresolved {
            self.imported.resolution = Resolution::Duplicate;
            Resolution::Duplicate.apply(&mut self.imported.stub, duplicate_tag);
        }

        for (index, candidate) in self.project_duplicates.iter_mut().enumerate() {
            if kept != CaseMember::Project(index) && candidate.resolution == Resolution::Unresolved {
                candidate.resolution = Resolution::Duplicate;
                Resolution::Duplicate.apply(&mut candidate.stub, duplicate_tag);
            }
        }
    }
}

/// Flatten columns into annotated project stubs
///
/// Each stub records its column, its position within that column and a
/// resolution inferred from its exclusion tag.
pub fn flatten_columns(columns: &[Column], duplicate_tag_id: &str) -> Vec<ProjectCandidate> {
    columns
        .iter()
        .enumerate()
        .flat_map(|(column_index, column)| {
            column
                .stub_studies
                .iter()
                .enumerate()
                .map(move |(study_index, stub)| ProjectCandidate {
                    column_index,
                    study_index,
                    column_name: column.name.clone(),
                    stub: stub.clone(),
                    resolution: Resolution::infer(stub, duplicate_tag_id),
                })
        })
        .collect()
}

/// Pair imported stubs with the project stubs they probably duplicate
///
/// Imported stubs that are already excluded are skipped. Each remaining stub
/// is looked up by DOI, then PMID, then title; the first key found in the
/// project wins, so a stub yields at most one case.
pub fn find_project_duplicates(
    import_batch: &[StudyStub],
    columns: &[Column],
    duplicate_tag_id: &str,
) -> Vec<DuplicateCase> {
    let project = flatten_columns(columns, duplicate_tag_id);
    let groups = group_by_duplicate_key(&project);

    import_batch
        .iter()
        .enumerate()
        .filter(|(_, stub)| !stub.is_excluded())
        .filter_map(|(batch_index, stub)| {
            let matches = derive_keys(stub)
                .into_iter()
                .find_map(|key| groups.get(&key))?;

            Some(DuplicateCase {
                imported: ImportedCandidate {
                    batch_index,
                    stub: stub.clone(),
                    resolution: Resolution::Unresolved,
                },
                project_duplicates: matches.to_vec(),
            })
        })
        .collect()
}

/// Reviewer session for an import batch against the project's columns
///
/// Holds the columns as read when the session started; [`commit`] merges
/// onto that snapshot and [`commit_against`] onto a fresher copy.
///
/// [`commit`]: ProjectReconciliation::commit
/// [`commit_against`]: ProjectReconciliation::commit_against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectReconciliation {
    import_batch: Vec<StudyStub>,
    columns: Vec<Column>,
    cases: Vec<DuplicateCase>,
    duplicate_tag: Tag,
}

impl ProjectReconciliation {
    pub fn new(import_batch: Vec<StudyStub>, columns: Vec<Column>, config: &ReconcileConfig) -> Self {
        let cases = find_project_duplicates(&import_batch, &columns, &config.duplicate_tag.id);

        tracing::debug!(
            imported = import_batch.len(),
            cases = cases.len(),
            "matched import batch against project"
        );

        Self {
            import_batch,
            columns,
            cases,
            duplicate_tag: config.duplicate_tag.clone(),
        }
    }

    pub fn import_batch(&self) -> &[StudyStub] {
        &self.import_batch
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn cases(&self) -> &[DuplicateCase] {
        &self.cases
    }

    /// Resolve one member of a case
    ///
    /// Keeping a member marks every other unresolved member of the same case
    /// as duplicate. Unknown indices and read-only project stubs leave the
    /// session unchanged.
    pub fn resolve(
        &self,
        case_index: usize,
        member: CaseMember,
        resolution: Resolution,
    ) -> Result<Self, ReconcileError> {
        if !resolution.is_assignable() {
            return Err(ReconcileError::InvalidResolution(resolution));
        }

        let mut next = self.clone();
        if case_index >= next.cases.len() {
            tracing::debug!(case_index, "ignoring resolve for unknown case");
            return Ok(next);
        }

        let case = &mut next.cases[case_index];

        if case.set(member, resolution, &next.duplicate_tag) && resolution == Resolution::Keep {
            case.auto_resolve(member, &next.duplicate_tag);
            tracing::debug!(case_index, ?member, "auto-resolved remaining case members");
        }

        Ok(next)
    }

    pub fn unresolved_count(&self) -> usize {
        self.cases.iter().map(DuplicateCase::unresolved_count).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.cases.iter().all(DuplicateCase::is_resolved)
    }

    /// Merge onto the columns captured when the session started
    pub fn commit(&self) -> Result<MergeOutcome, ReconcileError> {
        self.commit_against(&self.columns)
    }

    /// Merge onto `live` columns
    ///
    /// Project duplicates whose recorded position no longer holds the same
    /// stub are skipped.
    pub fn commit_against(&self, live: &[Column]) -> Result<MergeOutcome, ReconcileError> {
        let unresolved = self.unresolved_count();
        if unresolved > 0 {
            return Err(ReconcileError::IncompleteResolution { unresolved });
        }

        merge_into_columns(&self.import_batch, &self.cases, live)
    }
}
