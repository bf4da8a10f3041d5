mod challenge;
mod record;

pub use challenge::*;
pub use record::*;
