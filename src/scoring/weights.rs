use crate::model::{Complexity, FunctionType};

/// Weight of a function of the given type and complexity.
///
/// | Type | Low | Medium | High |
/// |------|-----|--------|------|
/// | ILF  | 7   | 10     | 15   |
/// | EIF  | 5   | 7      | 10   |
/// | EI   | 3   | 4      | 6    |
/// | EO   | 4   | 5      | 7    |
/// | EQ   | 3   | 4      | 6    |
pub fn weight_for(function_type: FunctionType, complexity: Complexity) -> u32 {
    use Complexity::*;
    use FunctionType::*;

    match (function_type, complexity) {
        (InternalLogicalFile, Low) => 7,
        (InternalLogicalFile, Medium) => 10,
        (InternalLogicalFile, High) => 15,
        (ExternalInterfaceFile, Low) => 5,
        (ExternalInterfaceFile, Medium) => 7,
        (ExternalInterfaceFile, High) => 10,
        (ExternalInput, Low) => 3,
        (ExternalInput, Medium) => 4,
        (ExternalInput, High) => 6,
        (ExternalOutput, Low) => 4,
        (ExternalOutput, Medium) => 5,
        (ExternalOutput, High) => 7,
        (ExternalQuery, Low) => 3,
        (ExternalQuery, Medium) => 4,
        (ExternalQuery, High) => 6,
    }
}
