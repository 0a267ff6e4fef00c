use serde::Serialize;

use super::vaf::{adjusted_total, compute_vaf};
use crate::error::ValidationError;
use crate::model::{FunctionPointEntry, FunctionType, GeneralCharacteristic, ProjectId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeContribution {
    pub function_type: FunctionType,
    pub count: usize,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTotals {
    pub unadjusted: u32,
    pub vaf: f64,
    pub adjusted: f64,
    /// One row per function type in canonical order, zero rows included.
    pub breakdown: Vec<TypeContribution>,
}

/// Sum of points over the entries belonging to `project_id`.
pub fn unadjusted_total(entries: &[FunctionPointEntry], project_id: &ProjectId) -> u32 {
    entries
        .iter()
        .filter(|e| e.project_id() == project_id)
        .map(|e| e.points())
        .sum()
}

pub fn type_breakdown(
    entries: &[FunctionPointEntry],
    project_id: &ProjectId,
) -> Vec<TypeContribution> {
    FunctionType::ALL
        .iter()
        .map(|&function_type| {
            let (count, points) = entries
                .iter()
                .filter(|e| e.project_id() == project_id && e.function_type() == function_type)
                .fold((0usize, 0u32), |(n, p), e| (n + 1, p + e.points()));
            TypeContribution {
                function_type,
                count,
                points,
            }
        })
        .collect()
}

pub fn project_totals(
    entries: &[FunctionPointEntry],
    project_id: &ProjectId,
    characteristics: &[GeneralCharacteristic],
) -> Result<ProjectTotals, ValidationError> {
    let vaf = compute_vaf(characteristics)?;
    let unadjusted = unadjusted_total(entries, project_id);
    Ok(ProjectTotals {
        unadjusted,
        vaf,
        adjusted: adjusted_total(unadjusted, vaf),
        breakdown: type_breakdown(entries, project_id),
    })
}
