//! Schema types for the `build.openshift.io/v1` API group.
//!
//! These mirror the wire format served by the OpenShift apiserver
//! (camelCase keys, absent optionals omitted). Only [`BuildConfig`] and
//! [`Build`] are persisted resources; [`BuildRequest`] is the request body
//! for the `instantiate` sub-resource action.

use kube::core::TypeMeta;

mod build;
mod build_config;
mod common;

pub use build::{
    Build, BuildPhase, BuildRequest, BuildSpec, BuildStatus, DockerStrategyOptions,
    SourceStrategyOptions,
};
pub use build_config::{
    BuildConfig, BuildConfigSpec, BuildConfigStatus, BuildRunPolicy, BuildTriggerPolicy,
    BuildTriggerType, ImageChangeTrigger, ImageChangeTriggerStatus, ImageStreamTagReference,
    SecretLocalReference, WebHookTrigger,
};
pub use common::{
    BuildOutput, BuildSource, BuildStrategy, BuildTriggerCause, CommonSpec, DockerBuildStrategy,
    GitBuildSource, GitSourceRevision, ImageChangeCause, SourceBuildStrategy, SourceControlUser,
    SourceRevision,
};

/// API group of every type in this module.
pub const GROUP: &str = "build.openshift.io";
/// API version of every type in this module.
pub const VERSION: &str = "v1";
/// Group/version string as it appears in `apiVersion` fields.
pub const API_VERSION: &str = "build.openshift.io/v1";

pub(crate) fn type_meta(kind: &str) -> TypeMeta {
    TypeMeta {
        api_version: API_VERSION.into(),
        kind: kind.into(),
    }
}
