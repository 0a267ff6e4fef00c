pub mod characteristic;
pub mod entry;
pub mod types;

pub use characteristic::{
    default_characteristics, CharacteristicKind, GeneralCharacteristic, CHARACTERISTIC_COUNT,
    MAX_DEGREE,
};
pub use entry::{FunctionPointEntry, Project, ProjectId};
pub use types::{Complexity, FunctionType};
