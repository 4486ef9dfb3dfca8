mod algorithm;
mod config;
mod enumeration;
mod howson;
mod polytope;
mod pure;
mod sequence;
mod solution;
mod subdivision;
mod zerosum;

pub use algorithm::*;
pub use config::*;
pub use enumeration::*;
pub use howson::*;
pub use polytope::*;
pub use pure::*;
pub use sequence::*;
pub use solution::*;
pub use subdivision::*;
pub use zerosum::*;
