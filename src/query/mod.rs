//! Non-persistent geometric queries.

pub use self::cut::{CutDiagnostics, CutError, CutResult, MissedIntersection, WindingMismatch};

pub mod cut;
