//! Statistical analyzers over the matched pairs.
//!
//! Two independent passes: [`equivalence`] answers "is the geometric mean
//! ratio provably inside the acceptance band", [`agreement`] characterizes
//! how the two protocols track each other. Both read the same immutable
//! pair slice and share nothing, so their order does not matter.

pub mod agreement;
pub mod equivalence;
pub mod stats;


pub use agreement::{analyze_agreement, AgreementOutcome, AgreementResult};
pub use equivalence::{analyze_equivalence, EquivalenceResult};

/// Fewest matched pairs any analyzer accepts; one pair has no variance.
pub const MIN_PAIRS: usize = 2;
