mod persistent_state;
pub mod state_record;

pub use persistent_state::PersistentStateStore;
pub use state_record::{STATE_RECORD_SIZE, StateRecord, VALID_MARKER};
