//! Domain models for the pet health engine.

mod assessment;
mod lifestyle;
mod pet;
mod records;
mod risk;

pub use assessment::*;
pub use lifestyle::*;
pub use pet::*;
pub use records::*;
pub use risk::*;
