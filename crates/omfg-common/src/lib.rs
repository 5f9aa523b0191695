//! Common types shared across the OMFG chart pipeline.
//!
//! Holds the static domain tables (variable numbers, columns, vertical
//! coordinate types, OPS subtypes), the [`Cycle`] time type and the
//! workspace error type.

pub mod catalog;
pub mod column;
pub mod cycle;
pub mod error;
pub mod subtype;
pub mod varno;
pub mod vertco;

pub use catalog::{Catalog, UNKNOWN};
pub use column::Column;
pub use cycle::{Cycle, CycleRange, CYCLE_FORMAT, CYCLE_STEP_HOURS, MAX_CYCLE_YEAR};
pub use error::{OmfgError, OmfgResult};
pub use subtype::Subtype;
pub use varno::{ByKind, Formula, Varno, VarnoType};
pub use vertco::VertcoType;
