mod container;
pub mod controller;
mod router;

pub use container::{Container, ContainerConfig};
pub use router::router;
