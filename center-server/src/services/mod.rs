//! Domain services
//!
//! Business rules over the repository layer: existence checks, delete
//! guards, cascades and response assembly. Handlers stay thin wrappers
//! around these functions.

pub mod attendance;
pub mod groups;
pub mod payments;
pub mod students;
pub mod teachers;
