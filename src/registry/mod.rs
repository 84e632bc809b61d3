//! Product registry.
//!
//! # Data Flow
//! ```text
//! handler (decoded path id / body)
//!     → product.rs (ProductId parse, ProductPayload validation rule)
//!     → store.rs (lookup / insert / update / delete under the lock)
//!     → Result<_, RegistryError> back to the handler
//! ```
//!
//! # Design Decisions
//! - One mutex around the whole sequence; operations are short and synchronous
//! - Ids are assigned by the registry, never by the caller
//! - Lookup precedes validation on update

pub mod error;
pub mod product;
pub mod store;

pub use error::{RegistryError, RegistryResult};
pub use product::{Product, ProductId, ProductPayload};
pub use store::{IdStrategy, ProductRegistry, SEED_PRODUCTS};
