//! Parameters of the environment check.

use serde::Deserialize;

mod gen_params;

pub use gen_params::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    /// The environment the workload is deployed to.
    /// +required
    /// +enum=dev
    /// +enum=staging
    /// +enum=prod
    /// +example=prod
    pub env: String,

    /// Namespaces to skip, matched literally.
    /// +noregex
    pub excluded_namespaces: Vec<String>,

    /// Upper bound on replicas.
    pub max_replicas: Option<i64>,

    /// Support tier of the owning team.
    /// +enum=gold
    /// +enum=silver
    pub tier: Option<String>,
}
