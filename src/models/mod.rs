pub mod commit;
pub mod pull_request;
pub mod audit;

pub use commit::*;
pub use pull_request::*;
pub use audit::*;
