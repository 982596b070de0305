pub mod bootstrap;
pub mod pipeline;
pub mod plugins;
