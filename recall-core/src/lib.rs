pub mod errors;
pub mod locks;
pub mod models;
pub mod queue;
pub mod session;
pub mod sm2;
pub mod stats;
pub mod store;

pub use errors::*;
pub use locks::*;
pub use models::*;
pub use queue::*;
pub use session::*;
pub use sm2::*;
pub use stats::*;
pub use store::*;
