pub mod input;
pub mod logging;
pub mod measures;
pub mod model;
pub mod pathways;
pub mod pipeline;
pub mod report;
