//! The `BuildConfig` resource: a template from which builds are instantiated.

use std::borrow::Cow;

use k8s_openapi::{
    api::core::v1::ObjectReference,
    apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time},
    NamespaceResourceScope,
};
use kube::core::{Resource, TypeMeta};
use serde::{Deserialize, Serialize};

use super::common::CommonSpec;

/// A template for builds within a namespace.
///
/// Creating a `BuildConfig` does not run a build by itself; builds are stamped
/// out either through the configured [`triggers`](BuildConfigSpec::triggers)
/// or explicitly via the `instantiate` sub-resource
/// ([`BuildConfigs::instantiate`](crate::BuildConfigs::instantiate)).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BuildConfig {
    /// The type fields, not always present.
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// Standard object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Desired build template.
    #[serde(default)]
    pub spec: BuildConfigSpec,

    /// Server-maintained status, absent until first persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BuildConfigStatus>,
}

impl BuildConfig {
    /// Construct a named `BuildConfig` with type information filled in.
    #[must_use]
    pub fn new(name: &str, spec: BuildConfigSpec) -> Self {
        Self {
            types: Some(super::type_meta("BuildConfig")),
            metadata: ObjectMeta {
                name: Some(name.into()),
                ..Default::default()
            },
            spec,
            status: None,
        }
    }
}

impl Resource for BuildConfig {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        "BuildConfig".into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        super::GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        super::VERSION.into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "buildconfigs".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// Desired state of a [`BuildConfig`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfigSpec {
    /// Conditions under which a new build is started automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<BuildTriggerPolicy>>,

    /// Scheduling of builds created from this template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_policy: Option<BuildRunPolicy>,

    /// Build parameters shared with the resulting [`Build`](super::Build) specs.
    #[serde(flatten)]
    pub common: CommonSpec,

    /// Number of completed builds retained before pruning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_builds_history_limit: Option<i32>,

    /// Number of failed builds retained before pruning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_builds_history_limit: Option<i32>,
}

/// How builds created from one [`BuildConfig`] are scheduled relative to
/// each other.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BuildRunPolicy {
    /// Builds run independently and may overlap.
    Parallel,
    /// Builds run one at a time, in creation order.
    Serial,
    /// Only the newest pending build runs; older pending builds are cancelled.
    SerialLatestOnly,
}

/// One automatic-start rule on a [`BuildConfig`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTriggerPolicy {
    /// Which of the trigger fields is active.
    #[serde(rename = "type")]
    pub type_: BuildTriggerType,

    /// GitHub webhook trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<WebHookTrigger>,

    /// Generic webhook trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic: Option<WebHookTrigger>,

    /// GitLab webhook trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitlab: Option<WebHookTrigger>,

    /// Bitbucket webhook trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitbucket: Option<WebHookTrigger>,

    /// Image change trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_change: Option<ImageChangeTrigger>,
}

/// Discriminator for [`BuildTriggerPolicy`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BuildTriggerType {
    /// Triggered by a GitHub webhook call.
    GitHub,
    /// Triggered by a generic webhook call.
    Generic,
    /// Triggered by a GitLab webhook call.
    GitLab,
    /// Triggered by a Bitbucket webhook call.
    Bitbucket,
    /// Triggered when a watched image changes.
    ImageChange,
    /// Triggered when the build configuration itself changes.
    ConfigChange,
}

/// Webhook that starts builds when invoked with the matching secret.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebHookTrigger {
    /// Legacy inline secret; superseded by `secret_reference`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Allows the webhook payload to set build environment when true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_env: Option<bool>,

    /// Secret in the same namespace authorizing the webhook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_reference: Option<SecretLocalReference>,
}

/// Reference to a secret in the same namespace.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretLocalReference {
    /// Name of the referenced secret.
    pub name: String,
}

/// Starts a build when a watched image stream tag changes.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageChangeTrigger {
    /// Image identifier the trigger last fired for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered_image_id: Option<String>,

    /// Watched image; defaults to the strategy `from` image when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ObjectReference>,

    /// Suspends the trigger without removing it when true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
}

/// Server-maintained state of a [`BuildConfig`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfigStatus {
    /// Sequence number of the most recently instantiated build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_version: Option<i64>,

    /// Per-trigger bookkeeping for image change triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_change_triggers: Option<Vec<ImageChangeTriggerStatus>>,
}

/// Status record for one image change trigger.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageChangeTriggerStatus {
    /// Image identifier the trigger last fired for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered_image_id: Option<String>,

    /// Image stream tag being watched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ImageStreamTagReference>,

    /// When the trigger last fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_trigger_time: Option<Time>,
}

/// Reference to an image stream tag, possibly in another namespace.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStreamTagReference {
    /// Namespace of the image stream; defaults to the build's namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// `name:tag` of the image stream tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_path_is_group_scoped_and_namespaced() {
        assert_eq!(
            BuildConfig::url_path(&(), Some("myproject")),
            "/apis/build.openshift.io/v1/namespaces/myproject/buildconfigs"
        );
    }

    #[test]
    fn deserializes_apiserver_shape() {
        let bc: BuildConfig = serde_json::from_value(json!({
            "apiVersion": "build.openshift.io/v1",
            "kind": "BuildConfig",
            "metadata": { "name": "app1", "namespace": "ns1", "resourceVersion": "12" },
            "spec": {
                "runPolicy": "Serial",
                "triggers": [
                    { "type": "GitHub", "github": { "secretReference": { "name": "hook" } } },
                    { "type": "ConfigChange" }
                ],
                "source": {
                    "type": "Git",
                    "git": { "uri": "https://example.com/app.git", "ref": "main" }
                },
                "strategy": {
                    "type": "Docker",
                    "dockerStrategy": { "dockerfilePath": "Dockerfile" }
                },
                "output": {
                    "to": { "kind": "ImageStreamTag", "name": "app1:latest" }
                }
            },
            "status": { "lastVersion": 4 }
        }))
        .unwrap();

        assert_eq!(bc.metadata.name.as_deref(), Some("app1"));
        assert_eq!(bc.spec.run_policy, Some(BuildRunPolicy::Serial));
        let triggers = bc.spec.triggers.as_ref().unwrap();
        assert_eq!(triggers[0].type_, BuildTriggerType::GitHub);
        assert_eq!(triggers[1].type_, BuildTriggerType::ConfigChange);
        let git = bc.spec.common.source.as_ref().unwrap().git.as_ref().unwrap();
        assert_eq!(git.ref_.as_deref(), Some("main"));
        assert_eq!(bc.status.unwrap().last_version, Some(4));
    }

    #[test]
    fn serializes_without_absent_optionals() {
        let bc = BuildConfig::new("app1", BuildConfigSpec::default());
        let v = serde_json::to_value(&bc).unwrap();
        assert_eq!(v["apiVersion"], "build.openshift.io/v1");
        assert_eq!(v["kind"], "BuildConfig");
        assert_eq!(v["spec"], json!({}));
        assert!(v.get("status").is_none());
    }
}
