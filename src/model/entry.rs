use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::{Complexity, FunctionType};
use crate::error::ValidationError;
use crate::scoring::weight_for;

/// Stable project identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ValidationError::EmptyProjectId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ProjectId::new(value)
    }
}

impl From<u64> for ProjectId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
}

impl Project {
    pub fn new(id: ProjectId, name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        Ok(Self {
            id,
            name: name.to_string(),
        })
    }
}

/// One measured function of a project. Points are derived from the weight
/// table when the entry is built and the entry never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionPointEntry {
    #[serde(rename = "type")]
    function_type: FunctionType,
    name: String,
    complexity: Complexity,
    points: u32,
    project_id: ProjectId,
}

impl FunctionPointEntry {
    pub fn new(
        function_type: FunctionType,
        name: &str,
        complexity: Complexity,
        project_id: ProjectId,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            function_type,
            name: name.to_string(),
            complexity,
            points: weight_for(function_type, complexity),
            project_id,
        })
    }

    pub fn function_type(&self) -> FunctionType {
        self.function_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }
}
