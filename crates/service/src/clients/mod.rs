//! Client records: domain types and the repository seam used by the HTTP layer.

pub mod domain;
pub mod repository;

pub use domain::{Client, ClientInput, ClientPatch, NewClient};
pub use repository::ClientRepository;
