pub mod reducers;
pub mod types;

pub use reducers::{
    add_entry, add_entry_to, add_project, cycle_project, next_project_id, select_project,
    set_characteristic,
};
pub use types::{AppState, EntryDraft};
