mod classify;
mod fields;
mod record;

pub use classify::{Entity, NormalizeReport, Normalizer, SkippedRecord};
pub use record::RawPlacemark;
