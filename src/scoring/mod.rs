pub mod engine;
pub mod validation;
pub mod vaf;
pub mod weights;

pub use engine::{project_totals, type_breakdown, unadjusted_total, ProjectTotals, TypeContribution};
pub use validation::validate_workspace;
pub use vaf::{adjusted_total, compute_vaf, total_degree_of_influence, MAX_VAF, MIN_VAF};
pub use weights::weight_for;
