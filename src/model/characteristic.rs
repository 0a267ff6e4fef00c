use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Highest rating a characteristic may carry.
pub const MAX_DEGREE: u8 = 5;

/// Number of general system characteristics; the set is fixed.
pub const CHARACTERISTIC_COUNT: usize = 14;

/// The fourteen general system characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacteristicKind {
    DataCommunications,
    DistributedProcessing,
    Performance,
    HeavilyUsedConfiguration,
    TransactionRate,
    OnlineDataEntry,
    EndUserEfficiency,
    OnlineUpdate,
    ComplexProcessing,
    Reusability,
    InstallationEase,
    OperationalEase,
    MultipleSites,
    FacilitateChange,
}

impl CharacteristicKind {
    pub const ALL: [CharacteristicKind; CHARACTERISTIC_COUNT] = [
        CharacteristicKind::DataCommunications,
        CharacteristicKind::DistributedProcessing,
        CharacteristicKind::Performance,
        CharacteristicKind::HeavilyUsedConfiguration,
        CharacteristicKind::TransactionRate,
        CharacteristicKind::OnlineDataEntry,
        CharacteristicKind::EndUserEfficiency,
        CharacteristicKind::OnlineUpdate,
        CharacteristicKind::ComplexProcessing,
        CharacteristicKind::Reusability,
        CharacteristicKind::InstallationEase,
        CharacteristicKind::OperationalEase,
        CharacteristicKind::MultipleSites,
        CharacteristicKind::FacilitateChange,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CharacteristicKind::DataCommunications => "Data Communications",
            CharacteristicKind::DistributedProcessing => "Distributed Processing",
            CharacteristicKind::Performance => "Performance",
            CharacteristicKind::HeavilyUsedConfiguration => "Heavily Used Configuration",
            CharacteristicKind::TransactionRate => "Transaction Rate",
            CharacteristicKind::OnlineDataEntry => "Online Data Entry",
            CharacteristicKind::EndUserEfficiency => "End-User Efficiency",
            CharacteristicKind::OnlineUpdate => "Online Update",
            CharacteristicKind::ComplexProcessing => "Complex Processing",
            CharacteristicKind::Reusability => "Reusability",
            CharacteristicKind::InstallationEase => "Installation Ease",
            CharacteristicKind::OperationalEase => "Operational Ease",
            CharacteristicKind::MultipleSites => "Multiple Sites",
            CharacteristicKind::FacilitateChange => "Facilitate Change",
        }
    }

    /// snake_case key used in workspace files.
    pub fn key(&self) -> &'static str {
        match self {
            CharacteristicKind::DataCommunications => "data_communications",
            CharacteristicKind::DistributedProcessing => "distributed_processing",
            CharacteristicKind::Performance => "performance",
            CharacteristicKind::HeavilyUsedConfiguration => "heavily_used_configuration",
            CharacteristicKind::TransactionRate => "transaction_rate",
            CharacteristicKind::OnlineDataEntry => "online_data_entry",
            CharacteristicKind::EndUserEfficiency => "end_user_efficiency",
            CharacteristicKind::OnlineUpdate => "online_update",
            CharacteristicKind::ComplexProcessing => "complex_processing",
            CharacteristicKind::Reusability => "reusability",
            CharacteristicKind::InstallationEase => "installation_ease",
            CharacteristicKind::OperationalEase => "operational_ease",
            CharacteristicKind::MultipleSites => "multiple_sites",
            CharacteristicKind::FacilitateChange => "facilitate_change",
        }
    }

    /// Position in the canonical order.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|k| k == self).unwrap_or(0)
    }

    /// Seeded rating for a fresh workspace.
    pub fn default_degree(&self) -> u8 {
        match self {
            CharacteristicKind::DataCommunications => 3,
            CharacteristicKind::DistributedProcessing => 2,
            CharacteristicKind::Performance => 1,
            CharacteristicKind::HeavilyUsedConfiguration => 1,
            CharacteristicKind::TransactionRate => 2,
            CharacteristicKind::OnlineDataEntry => 3,
            CharacteristicKind::EndUserEfficiency => 2,
            CharacteristicKind::OnlineUpdate => 2,
            CharacteristicKind::ComplexProcessing => 1,
            CharacteristicKind::Reusability => 2,
            CharacteristicKind::InstallationEase => 1,
            CharacteristicKind::OperationalEase => 2,
            CharacteristicKind::MultipleSites => 1,
            CharacteristicKind::FacilitateChange => 2,
        }
    }
}

impl fmt::Display for CharacteristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CharacteristicKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.key() == wanted)
            .ok_or_else(|| ValidationError::UnknownCharacteristic(s.trim().to_string()))
    }
}

/// One rated general system characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralCharacteristic {
    pub kind: CharacteristicKind,
    pub degree_of_influence: u8,
}

impl GeneralCharacteristic {
    /// Strict constructor for data arriving from files or the CLI.
    pub fn new(kind: CharacteristicKind, degree: i64) -> Result<Self, ValidationError> {
        if !(0..=MAX_DEGREE as i64).contains(&degree) {
            return Err(ValidationError::DegreeOutOfRange {
                characteristic: kind.key().to_string(),
                value: degree,
            });
        }
        Ok(Self {
            kind,
            degree_of_influence: degree as u8,
        })
    }

    /// Clamp an interactive edit into [0, 5].
    pub fn clamped(kind: CharacteristicKind, raw: i64) -> Self {
        Self {
            kind,
            degree_of_influence: raw.clamp(0, MAX_DEGREE as i64) as u8,
        }
    }
}

/// The fourteen characteristics at their seeded ratings (sum 25).
pub fn default_characteristics() -> Vec<GeneralCharacteristic> {
    CharacteristicKind::ALL
        .iter()
        .map(|&kind| GeneralCharacteristic {
            kind,
            degree_of_influence: kind.default_degree(),
        })
        .collect()
}
