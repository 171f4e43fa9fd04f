pub mod chart;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod stats;
pub mod student;
