//! Field and adaptive state types.
//!
//! Both sides are immutable snapshots. Constructors validate and normalize,
//! the bridge produces successors, and nothing here performs I/O apart from
//! the JSON encoding in [`PersistedState`].

mod adaptive;
mod field;
mod persist;


pub use self::adaptive::{
    AdaptationRecord, AdaptiveState, CouplingDescriptor, TensorSummary,
    DEFAULT_COUPLING_STRENGTH, FIELD_TO_ADAPTIVE,
};
pub use self::field::FieldState;
pub use self::persist::{ComplexRows, PersistedState};
