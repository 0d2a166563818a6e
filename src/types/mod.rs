pub mod errors;
pub mod ids;
pub mod position;
pub mod report;

pub use errors::*;
pub use ids::*;
pub use position::*;
pub use report::*;
