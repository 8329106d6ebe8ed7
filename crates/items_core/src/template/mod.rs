mod error;
mod logical;
mod synth;

pub use error::{Result, SynthError};
pub use logical::logical_id;
pub use synth::{synthesize, Template, ASSET_BUCKET_PARAMETER, TEMPLATE_FORMAT_VERSION};
