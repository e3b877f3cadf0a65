//! Resilient asset acquisition: ordered fetch strategies plus a
//! synthesized fallback asset.

pub mod fallback;
pub mod pipeline;
pub mod strategy;

pub use fallback::FallbackGenerator;
pub use pipeline::{acquire_asset, Acquisition, AcquisitionPipeline};
pub use strategy::{
    default_strategies, quality_format, AuthContext, FetchRequest, FetchStrategy,
};
