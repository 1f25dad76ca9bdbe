//! The `Build` resource and the `instantiate` request body.

use std::borrow::Cow;

use k8s_openapi::{
    api::core::v1::{EnvVar, ObjectReference},
    apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time},
    NamespaceResourceScope,
};
use kube::core::{Resource, TypeMeta};
use serde::{Deserialize, Serialize};

use super::common::{BuildTriggerCause, CommonSpec, SourceRevision};

/// A single run of a [`BuildConfig`](super::BuildConfig) template.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Build {
    /// The type fields, not always present.
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// Standard object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Snapshot of the build parameters this run executes with.
    #[serde(default)]
    pub spec: BuildSpec,

    /// Server-maintained progress of the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BuildStatus>,
}

impl Resource for Build {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        "Build".into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        super::GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        super::VERSION.into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "builds".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// Desired state of a [`Build`], frozen at instantiation time.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpec {
    /// Build parameters copied from the originating template.
    #[serde(flatten)]
    pub common: CommonSpec,

    /// Causes that led to this build being created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_by: Option<Vec<BuildTriggerCause>>,
}

/// Lifecycle phase of a [`Build`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BuildPhase {
    /// Accepted but not yet scheduled.
    New,
    /// Scheduled, pod not yet running.
    Pending,
    /// Build pod is executing.
    Running,
    /// Finished successfully.
    Complete,
    /// Finished with a build failure.
    Failed,
    /// Could not run due to an infrastructure error.
    Error,
    /// Cancelled by a user before completion.
    Cancelled,
}

/// Server-maintained state of a [`Build`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStatus {
    /// Current lifecycle phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<BuildPhase>,

    /// Set when cancellation has been requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<bool>,

    /// Machine-readable reason for the current phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable detail for the current phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// When the build pod started running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<Time>,

    /// When the build reached a terminal phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_timestamp: Option<Time>,

    /// Wall-clock duration of the build in nanoseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,

    /// Full reference of the pushed output image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_docker_image_reference: Option<String>,

    /// The `BuildConfig` this build was instantiated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ObjectReference>,
}

/// Request body for the `instantiate` sub-resource action.
///
/// Everything beyond the name is optional; set fields override the template
/// values from the parent [`BuildConfig`](super::BuildConfig) for this one run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    /// The type fields, not always present.
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// Metadata naming the parent `BuildConfig`.
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Source revision to build instead of the template default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<SourceRevision>,

    /// Image whose change triggered the request, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_by_image: Option<ObjectReference>,

    /// Image stream tag the triggering image resolves from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ObjectReference>,

    /// Extra build environment for this run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,

    /// Causes recorded on the resulting build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_by: Option<Vec<BuildTriggerCause>>,

    /// Docker strategy overrides for this run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_strategy_options: Option<DockerStrategyOptions>,

    /// Source strategy overrides for this run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_strategy_options: Option<SourceStrategyOptions>,
}

impl BuildRequest {
    /// Construct a request targeting the named `BuildConfig`.
    #[must_use]
    pub fn new(build_config_name: &str) -> Self {
        Self {
            types: Some(super::type_meta("BuildRequest")),
            metadata: ObjectMeta {
                name: Some(build_config_name.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Per-run overrides for the docker strategy.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerStrategyOptions {
    /// `ARG` values passed to the Dockerfile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_args: Option<Vec<EnvVar>>,

    /// Disables the layer cache for this run when true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_cache: Option<bool>,
}

/// Per-run overrides for the source strategy.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStrategyOptions {
    /// Forces or disables incremental builds for this run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental: Option<bool>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn build_request_names_parent_and_kind() {
        let br = BuildRequest::new("app1");
        let v = serde_json::to_value(&br).unwrap();
        assert_eq!(v["kind"], "BuildRequest");
        assert_eq!(v["apiVersion"], "build.openshift.io/v1");
        assert_eq!(v["metadata"]["name"], "app1");
        // untouched options stay off the wire
        assert!(v.get("env").is_none());
        assert!(v.get("revision").is_none());
    }

    #[test]
    fn build_url_path() {
        assert_eq!(
            Build::url_path(&(), Some("ns1")),
            "/apis/build.openshift.io/v1/namespaces/ns1/builds"
        );
    }
}
