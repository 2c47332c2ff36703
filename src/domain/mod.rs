// Domain layer - Samples, light state and render targets
pub mod chart;
pub mod light;
pub mod page;
pub mod sample;
