// Application layer: wires config, sources and the mapper into one run.

pub mod report;
pub mod session;

pub use report::{render_json, TextReport};
pub use session::{AnalysisReport, AnalysisSession, PathwayStep};
