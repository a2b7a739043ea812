//! Parameters of the ownership check.

use serde::Deserialize;

mod gen_params;

pub use gen_params::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Team owning the workload.
    /// +required
    pub owner: Option<String>,
}
