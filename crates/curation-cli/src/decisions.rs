//! Reviewer decision files

use curation_core::{
    BatchReconciliation, CaseMember, ProjectReconciliation, ReconcileError, Resolution,
};
use serde::Deserialize;

/// Decision for one member of an intra-batch cluster
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClusterDecision {
    pub cluster: usize,
    pub stub: usize,
    pub resolution: Resolution,
}

/// Decision for one member of a project duplicate case
///
/// Without `project` the decision targets the imported stub.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaseDecision {
    pub case: usize,
    #[serde(default)]
    pub project: Option<usize>,
    pub resolution: Resolution,
}

impl CaseDecision {
    pub fn member(&self) -> CaseMember {
        match self.project {
            Some(index) => CaseMember::Project(index),
            None => CaseMember::Imported,
        }
    }
}

/// Apply decisions in file order
pub fn apply_cluster_decisions(
    session: BatchReconciliation,
    decisions: &[ClusterDecision],
) -> Result<BatchReconciliation, ReconcileError> {
    decisions.iter().try_fold(session, |session, decision| {
        session.resolve(decision.cluster, decision.stub, decision.resolution)
    })
}

/// Apply decisions in file order
pub fn apply_case_decisions(
    session: ProjectReconciliation,
    decisions: &[CaseDecision],
) -> Result<ProjectReconciliation, ReconcileError> {
    decisions.iter().try_fold(session, |session, decision| {
        session.resolve(decision.case, decision.member(), decision.resolution)
    })
}
