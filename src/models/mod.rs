// Data model: uploaded resume files, parsed records, the professor ->
// specialties aggregate, and the ranking handed to presentation layers.

mod ranking;
mod resume;

pub use ranking::Ranking;
pub use resume::{ResumeFile, ResumeRecord, SpecialtyMap};
