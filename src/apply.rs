//! Declarative apply configurations for server-side apply.
//!
//! An apply configuration is a partial object: only the fields the caller
//! wants to own are set, and the apiserver merges it against the live object,
//! tracking ownership per field manager. Unlike the resource types in
//! [`v1`](crate::v1), type information is mandatory here because the apiserver
//! rejects apply patches without `apiVersion`/`kind`.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::TypeMeta;
use serde::{Deserialize, Serialize};

use crate::v1::{self, BuildConfigSpec, BuildConfigStatus};

/// Partial declarative representation of a
/// [`BuildConfig`](crate::BuildConfig), for use with
/// [`BuildConfigs::apply`](crate::BuildConfigs::apply) and
/// [`BuildConfigs::apply_status`](crate::BuildConfigs::apply_status).
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BuildConfigApplyConfiguration {
    /// Type information, always serialized.
    #[serde(flatten)]
    pub types: TypeMeta,

    /// Object metadata; at minimum the target name.
    pub metadata: ObjectMeta,

    /// Spec fields this manager wants to own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<BuildConfigSpec>,

    /// Status fields this manager wants to own (only honored by
    /// `apply_status`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BuildConfigStatus>,
}

impl BuildConfigApplyConfiguration {
    /// Start a configuration targeting the named `BuildConfig`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            types: v1::type_meta("BuildConfig"),
            metadata: ObjectMeta {
                name: Some(name.into()),
                ..Default::default()
            },
            spec: None,
            status: None,
        }
    }

    /// Target a specific namespace (otherwise taken from the client handle).
    #[must_use]
    pub fn within(mut self, namespace: &str) -> Self {
        self.metadata.namespace = Some(namespace.into());
        self
    }

    /// Claim the given spec fields.
    #[must_use]
    pub fn spec(mut self, spec: BuildConfigSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Claim the given status fields.
    #[must_use]
    pub fn status(mut self, status: BuildConfigStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::v1::BuildRunPolicy;
    use serde_json::json;

    #[test]
    fn carries_type_meta_and_only_set_fields() {
        let ac = BuildConfigApplyConfiguration::new("app1")
            .within("ns1")
            .spec(BuildConfigSpec {
                run_policy: Some(BuildRunPolicy::Serial),
                ..Default::default()
            });
        let v = serde_json::to_value(&ac).unwrap();
        assert_eq!(
            v,
            json!({
                "apiVersion": "build.openshift.io/v1",
                "kind": "BuildConfig",
                "metadata": { "name": "app1", "namespace": "ns1" },
                "spec": { "runPolicy": "Serial" }
            })
        );
    }
}
