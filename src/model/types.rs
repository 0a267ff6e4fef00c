use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Logical function category counted by the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FunctionType {
    #[serde(rename = "ILF", alias = "ALI")]
    InternalLogicalFile,
    #[serde(rename = "EIF", alias = "AIE")]
    ExternalInterfaceFile,
    #[serde(rename = "EI", alias = "EE")]
    ExternalInput,
    #[serde(rename = "EO", alias = "SE")]
    ExternalOutput,
    #[serde(rename = "EQ", alias = "CE")]
    ExternalQuery,
}

impl FunctionType {
    /// Canonical order, as printed in the weight table and breakdowns.
    pub const ALL: [FunctionType; 5] = [
        FunctionType::InternalLogicalFile,
        FunctionType::ExternalInterfaceFile,
        FunctionType::ExternalInput,
        FunctionType::ExternalOutput,
        FunctionType::ExternalQuery,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FunctionType::InternalLogicalFile => "ILF",
            FunctionType::ExternalInterfaceFile => "EIF",
            FunctionType::ExternalInput => "EI",
            FunctionType::ExternalOutput => "EO",
            FunctionType::ExternalQuery => "EQ",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FunctionType::InternalLogicalFile => "Internal Logical File",
            FunctionType::ExternalInterfaceFile => "External Interface File",
            FunctionType::ExternalInput => "External Input",
            FunctionType::ExternalOutput => "External Output",
            FunctionType::ExternalQuery => "External Query",
        }
    }

    /// Next variant in canonical order, wrapping around (used by form cycling).
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FunctionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "ilf" | "ali" | "internallogicalfile" => Ok(FunctionType::InternalLogicalFile),
            "eif" | "aie" | "externalinterfacefile" => Ok(FunctionType::ExternalInterfaceFile),
            "ei" | "ee" | "externalinput" => Ok(FunctionType::ExternalInput),
            "eo" | "se" | "externaloutput" => Ok(FunctionType::ExternalOutput),
            "eq" | "ce" | "externalquery" => Ok(FunctionType::ExternalQuery),
            _ => Err(ValidationError::InvalidFunctionType(s.trim().to_string())),
        }
    }
}

/// Complexity tier assigned to a counted function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[serde(alias = "baixa")]
    Low,
    #[serde(alias = "media")]
    Medium,
    #[serde(alias = "alta")]
    High,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Low, Complexity::Medium, Complexity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Complexity::Low => Complexity::Medium,
            Complexity::Medium => Complexity::High,
            Complexity::High => Complexity::Low,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Complexity::Low => Complexity::High,
            Complexity::Medium => Complexity::Low,
            Complexity::High => Complexity::Medium,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "l" | "baixa" => Ok(Complexity::Low),
            "medium" | "m" | "media" | "média" => Ok(Complexity::Medium),
            "high" | "h" | "alta" => Ok(Complexity::High),
            _ => Err(ValidationError::InvalidComplexity(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_function_type_codes() {
        assert_eq!("ILF".parse::<FunctionType>().unwrap(), FunctionType::InternalLogicalFile);
        assert_eq!("eif".parse::<FunctionType>().unwrap(), FunctionType::ExternalInterfaceFile);
        assert_eq!(" EI ".parse::<FunctionType>().unwrap(), FunctionType::ExternalInput);
        assert_eq!("EO".parse::<FunctionType>().unwrap(), FunctionType::ExternalOutput);
        assert_eq!("eq".parse::<FunctionType>().unwrap(), FunctionType::ExternalQuery);
    }

    #[test]
    fn test_parse_function_type_apf_codes() {
        assert_eq!("ALI".parse::<FunctionType>().unwrap(), FunctionType::InternalLogicalFile);
        assert_eq!("AIE".parse::<FunctionType>().unwrap(), FunctionType::ExternalInterfaceFile);
        assert_eq!("EE".parse::<FunctionType>().unwrap(), FunctionType::ExternalInput);
        assert_eq!("SE".parse::<FunctionType>().unwrap(), FunctionType::ExternalOutput);
        assert_eq!("CE".parse::<FunctionType>().unwrap(), FunctionType::ExternalQuery);
    }

    #[test]
    fn test_parse_function_type_full_names() {
        assert_eq!(
            "external_interface_file".parse::<FunctionType>().unwrap(),
            FunctionType::ExternalInterfaceFile
        );
        assert_eq!(
            "Internal Logical File".parse::<FunctionType>().unwrap(),
            FunctionType::InternalLogicalFile
        );
    }

    #[test]
    fn test_parse_function_type_unknown() {
        let err = "XYZ".parse::<FunctionType>().unwrap_err();
        assert_eq!(err, ValidationError::InvalidFunctionType("XYZ".to_string()));
    }

    #[test]
    fn test_parse_complexity() {
        assert_eq!("low".parse::<Complexity>().unwrap(), Complexity::Low);
        assert_eq!("Medium".parse::<Complexity>().unwrap(), Complexity::Medium);
        assert_eq!("HIGH".parse::<Complexity>().unwrap(), Complexity::High);
        assert_eq!("baixa".parse::<Complexity>().unwrap(), Complexity::Low);
        assert_eq!("media".parse::<Complexity>().unwrap(), Complexity::Medium);
        assert_eq!("alta".parse::<Complexity>().unwrap(), Complexity::High);
        assert!("extreme".parse::<Complexity>().is_err());
    }

    #[test]
    fn test_function_type_cycle_wraps() {
        assert_eq!(FunctionType::ExternalQuery.next(), FunctionType::InternalLogicalFile);
        assert_eq!(FunctionType::InternalLogicalFile.previous(), FunctionType::ExternalQuery);
        let mut t = FunctionType::InternalLogicalFile;
        for _ in 0..FunctionType::ALL.len() {
            t = t.next();
        }
        assert_eq!(t, FunctionType::InternalLogicalFile);
    }

    #[test]
    fn test_complexity_cycle_wraps() {
        assert_eq!(Complexity::High.next(), Complexity::Low);
        assert_eq!(Complexity::Low.previous(), Complexity::High);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&FunctionType::ExternalOutput).unwrap();
        assert_eq!(json, "\"EO\"");
        let parsed: FunctionType = serde_saphyr::from_str("SE").unwrap();
        assert_eq!(parsed, FunctionType::ExternalOutput);
        let parsed: Complexity = serde_saphyr::from_str("alta").unwrap();
        assert_eq!(parsed, Complexity::High);
    }
}
