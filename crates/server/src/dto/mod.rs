mod analysis;
mod itinerary;

pub use analysis::*;
pub use itinerary::*;
