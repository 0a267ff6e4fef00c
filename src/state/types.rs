use crate::error::ValidationError;
use crate::model::{
    default_characteristics, Complexity, FunctionPointEntry, FunctionType, GeneralCharacteristic,
    Project, ProjectId,
};
use crate::scoring::{compute_vaf, project_totals, ProjectTotals};

/// Everything the calculator knows during a session.
///
/// Projects and entries only grow; characteristics always hold exactly
/// fourteen ratings in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub(super) projects: Vec<Project>,
    pub(super) entries: Vec<FunctionPointEntry>,
    pub(super) characteristics: Vec<GeneralCharacteristic>,
    pub(super) selected: Option<ProjectId>,
}

/// User input for a new entry; the owning project is the selected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub function_type: FunctionType,
    pub complexity: Complexity,
    pub name: String,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self {
            function_type: FunctionType::InternalLogicalFile,
            complexity: Complexity::Low,
            name: String::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Empty workspace with seeded characteristic ratings.
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            entries: Vec::new(),
            characteristics: default_characteristics(),
            selected: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn entries(&self) -> &[FunctionPointEntry] {
        &self.entries
    }

    pub fn characteristics(&self) -> &[GeneralCharacteristic] {
        &self.characteristics
    }

    pub fn selected_id(&self) -> Option<&ProjectId> {
        self.selected.as_ref()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected.as_ref().and_then(|id| self.project(id))
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn entries_for<'a>(
        &'a self,
        id: &'a ProjectId,
    ) -> impl Iterator<Item = &'a FunctionPointEntry> + 'a {
        self.entries.iter().filter(move |e| e.project_id() == id)
    }

    pub fn vaf(&self) -> Result<f64, ValidationError> {
        compute_vaf(&self.characteristics)
    }

    pub fn totals_for(&self, id: &ProjectId) -> Result<ProjectTotals, ValidationError> {
        project_totals(&self.entries, id, &self.characteristics)
    }
}
