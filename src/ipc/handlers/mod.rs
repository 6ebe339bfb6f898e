pub mod core;
pub mod dataset;
pub mod report;
pub mod stats;
pub mod tutor;
