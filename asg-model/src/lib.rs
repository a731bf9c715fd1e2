//! Auto Scaling group instance model
//!
//! Value types for the instances an Auto Scaling group reports, plus
//! unmarshalling from the two shapes the service responses come in:
//!
//! - **Instance**: snapshot of one EC2 instance inside a group
//! - **LaunchTemplateSpecification**: launch template reference held by an instance
//! - **LifecycleState**: closed set of lifecycle labels an instance moves through
//! - **xml / GroupInstances**: Query-protocol XML and AWS CLI JSON readers
//!
//! # Example
//!
//! ```
//! use asg_model::{Instance, LifecycleState};
//!
//! let instance = Instance::new()
//!     .with_instance_id("i-1234567890abcdef0")
//!     .with_lifecycle_state(LifecycleState::InService)
//!     .with_protected_from_scale_in(true);
//!
//! assert_eq!(instance.lifecycle_state(), Some("InService"));
//! ```

pub mod error;
pub mod group;
pub mod hash;
pub mod instance;
pub mod launch_template;
pub mod lifecycle;
pub mod xml;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use group::{GroupInstances, parse_describe_groups_json};
pub use instance::Instance;
pub use launch_template::LaunchTemplateSpecification;
pub use lifecycle::LifecycleState;
