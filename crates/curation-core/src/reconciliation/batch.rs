//! Duplicate resolution within a single import batch

use std::collections::HashMap;

use curation_domain::{StudyStub, Tag};
use serde::{Deserialize, Serialize};

use super::Resolution;
use crate::config::ReconcileConfig;
use crate::deduplication::group_by_duplicate_key;
use crate::error::ReconcileError;

/// A stub paired with the reviewer's resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedStub {
    pub stub: StudyStub,
    pub resolution: Resolution,
}

impl ResolvedStub {
    pub fn unresolved(stub: StudyStub) -> Self {
        Self {
            stub,
            resolution: Resolution::Unresolved,
        }
    }
}

impl AsRef<StudyStub> for ResolvedStub {
    fn as_ref(&self) -> &StudyStub {
        &self.stub
    }
}

/// Duplicate clusters (two or more stubs sharing a key) within a batch
pub fn find_intra_batch_duplicates(stubs: &[StudyStub]) -> Vec<Vec<StudyStub>> {
    group_by_duplicate_key(stubs).clusters()
}

/// Reviewer session for duplicates inside one import batch
///
/// Every member of every cluster starts `Unresolved`. The batch can be
/// committed once all of them are resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReconciliation {
    batch: Vec<StudyStub>,
    clusters: Vec<Vec<ResolvedStub>>,
    duplicate_tag: Tag,
    require_keeper: bool,
}

impl BatchReconciliation {
    pub fn new(batch: Vec<StudyStub>, config: &ReconcileConfig) -> Self {
        let clusters: Vec<Vec<ResolvedStub>> = find_intra_batch_duplicates(&batch)
            .into_iter()
            .map(|cluster| cluster.into_iter().map(ResolvedStub::unresolved).collect())
            .collect();

        tracing::debug!(
            stubs = batch.len(),
            clusters = clusters.len(),
            "found duplicate clusters in import batch"
        );

        Self {
            batch,
            clusters,
            duplicate_tag: config.duplicate_tag.clone(),
            require_keeper: config.require_keeper,
        }
    }

    pub fn batch(&self) -> &[StudyStub] {
        &self.batch
    }

    pub fn clusters(&self) -> &[Vec<ResolvedStub>] {
        &self.clusters
    }

    pub fn has_duplicates(&self) -> bool {
        !self.clusters.is_empty()
    }

    /// Resolve one member of a cluster
    ///
    /// Indices that do not exist leave the session unchanged.
    pub fn resolve(
        &self,
        cluster_index: usize,
        stub_index: usize,
        resolution: Resolution,
    ) -> Result<Self, ReconcileError> {
        if !resolution.is_assignable() {
            return Err(ReconcileError::InvalidResolution(resolution));
        }

        let mut next = self.clone();
        match next
            .clusters
            .get_mut(cluster_index)
            .and_then(|cluster| cluster.get_mut(stub_index))
        {
            Some(member) => {
                member.resolution = resolution;
                resolution.apply(&mut member.stub, &next.duplicate_tag);
            }
            None => {
                tracing::debug!(cluster_index, stub_index, "ignoring resolve for unknown stub");
            }
        }

        Ok(next)
    }

    pub fn unresolved_count(&self) -> usize {
        self.clusters
            .iter()
            .flatten()
            .filter(|member| !member.resolution.is_settled())
            .count()
    }

    /// First cluster in which no stub was kept, when a keeper is required
    fn keeperless_cluster(&self) -> Option<usize> {
        if !self.require_keeper {
            return None;
        }

        self.clusters.iter().position(|cluster| {
            cluster
                .iter()
                .all(|member| member.resolution == Resolution::Duplicate)
        })
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved_count() == 0 && self.keeperless_cluster().is_none()
    }

    /// Copy each resolved exclusion tag back onto the batch
    ///
    /// Stubs are matched by id; stubs outside every cluster pass through
    /// unchanged. A stub in several clusters takes the tag from the last one.
    pub fn commit(&self) -> Result<Vec<StudyStub>, ReconcileError> {
        let unresolved = self.unresolved_count();
        if unresolved > 0 {
            return Err(ReconcileError::IncompleteResolution { unresolved });
        }
        if let Some(cluster) = self.keeperless_cluster() {
            return Err(ReconcileError::NoStubKept { cluster });
        }

        let mut batch = self.batch.clone();
        let mut decided: HashMap<&str, Resolution> = HashMap::new();

        for member in self.clusters.iter().flatten() {
            if !member.stub.has_id() {
                tracing::debug!(title = %member.stub.title, "skipping stub without id");
                continue;
            }
            if let Some(earlier) = decided.insert(member.stub.id.as_str(), member.resolution) {
                if earlier != member.resolution {
                    tracing::debug!(
                        id = %member.stub.id,
                        %earlier,
                        later = %member.resolution,
                        "later cluster overrides earlier decision"
                    );
                }
            }
            if let Some(target) = batch.iter_mut().find(|s| s.id == member.stub.id) {
                target.exclusion_tag = member.stub.exclusion_tag.clone();
            }
        }

        let excluded = batch
            .iter()
            .filter(|stub| stub.is_excluded_by(&self.duplicate_tag.id))
            .count();

        tracing::info!(
            stubs = batch.len(),
            duplicates = excluded,
            "committed import batch resolution"
        );

        Ok(batch)
    }
}
