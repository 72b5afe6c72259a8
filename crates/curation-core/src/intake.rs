//! Intake of new stubs into a project's first column

use curation_domain::{Column, StudyStub};

use crate::error::ReconcileError;

/// Prepend `stubs` to column 0, keeping their order
///
/// Used when a batch needs no project-level reconciliation.
pub fn prepend_to_intake(
    columns: &[Column],
    stubs: &[StudyStub],
) -> Result<Vec<Column>, ReconcileError> {
    let mut columns = columns.to_vec();
    prepend_in_place(&mut columns, stubs)?;
    Ok(columns)
}

pub(crate) fn prepend_in_place(
    columns: &mut [Column],
    stubs: &[StudyStub],
) -> Result<(), ReconcileError> {
    let intake = columns
        .first_mut()
        .ok_or(ReconcileError::MissingIntakeColumn)?;
    intake.stub_studies.splice(0..0, stubs.iter().cloned());
    Ok(())
}
