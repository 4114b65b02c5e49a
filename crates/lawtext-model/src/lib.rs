pub mod law_record;
pub mod dataset_manifest;

pub use law_record::*;
pub use dataset_manifest::*;
