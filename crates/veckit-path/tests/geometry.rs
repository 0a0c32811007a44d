#[path = "geometry/pipeline.rs"]
mod pipeline;
#[path = "geometry/scenarios.rs"]
mod scenarios;
#[path = "geometry/serialization.rs"]
mod serialization;
