mod analysis;
mod routing;

pub use analysis::*;
pub use routing::*;
