mod basis;
mod cancel;
mod lcp;
mod pivoting;
mod revised;
mod simplex;
mod tableau;
mod visited;

pub use basis::*;
pub use cancel::*;
pub use lcp::*;
pub use pivoting::*;
pub use revised::*;
pub use simplex::*;
pub use tableau::*;
pub use visited::*;
