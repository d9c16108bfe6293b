pub mod dom;
pub mod enhancer;
pub mod errors;
pub mod models;

pub use dom::*;
pub use enhancer::*;
pub use errors::*;
pub use models::*;
