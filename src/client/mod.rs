//! The typed namespaced client handle for `buildconfigs`.

use std::fmt::Debug;

use either::Either;
use futures::Stream;
use kube::{
    api::{Api, DeleteParams, ListParams, ObjectList, Patch, PatchParams, PostParams, WatchEvent},
    core::{
        params::{GetParams, WatchParams},
        response::Status,
    },
    Client, Error, Result,
};
use serde::Serialize;

use crate::{
    apply::BuildConfigApplyConfiguration,
    v1::{Build, BuildConfig, BuildRequest},
};

/// A namespaced handle over the `buildconfigs` resource.
///
/// The handle's only state is its immutable (namespace, resource path)
/// binding, so it is cheap to clone and safe to share between concurrent
/// callers. Every method is a single stateless request/response exchange;
/// cancellation is by dropping the returned future, and all failures surface
/// as [`kube::Error`] without local retries.
///
/// Everything except [`instantiate`](BuildConfigs::instantiate) delegates to
/// the generic [`Api`] machinery.
#[derive(Clone)]
pub struct BuildConfigs {
    api: Api<BuildConfig>,
    namespace: Option<String>,
}

impl Debug for BuildConfigs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildConfigs")
            .field("namespace", &self.namespace)
            .finish()
    }
}

/// Constructors
impl BuildConfigs {
    /// Build configs within the given namespace.
    pub fn namespaced(client: Client, ns: &str) -> Self {
        Self {
            api: Api::namespaced(client, ns),
            namespace: Some(ns.to_string()),
        }
    }

    /// Build configs within the client's default namespace.
    ///
    /// The namespace comes from the kubeconfig context, or the service
    /// account's namespace when running in-cluster.
    pub fn default_namespaced(client: Client) -> Self {
        Self {
            api: Api::default_namespaced(client),
            namespace: None,
        }
    }

    /// The namespace this handle is bound to, unless bound to the client
    /// default.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Access the underlying generic [`Api`] for operations not covered by
    /// the typed surface.
    pub fn api(&self) -> &Api<BuildConfig> {
        &self.api
    }
}

/// CRUD operations
impl BuildConfigs {
    /// Create a build config.
    pub async fn create(&self, pp: &PostParams, bc: &BuildConfig) -> Result<BuildConfig> {
        self.api.create(pp, bc).await
    }

    /// Replace a build config entirely.
    ///
    /// `metadata.resourceVersion` must be set in `bc` for the apiserver to
    /// accept the update; a stale version yields a conflict error.
    pub async fn replace(&self, name: &str, pp: &PostParams, bc: &BuildConfig) -> Result<BuildConfig> {
        self.api.replace(name, pp, bc).await
    }

    /// Replace the status sub-resource of a build config.
    pub async fn replace_status(
        &self,
        name: &str,
        pp: &PostParams,
        bc: &BuildConfig,
    ) -> Result<BuildConfig> {
        let data = serde_json::to_vec(bc).map_err(Error::SerdeError)?;
        self.api.replace_status(name, pp, data).await
    }

    /// Get a named build config, failing when it does not exist.
    pub async fn get(&self, name: &str) -> Result<BuildConfig> {
        self.api.get(name).await
    }

    /// Get a named build config at an explicit resource version.
    pub async fn get_with(&self, name: &str, gp: &GetParams) -> Result<BuildConfig> {
        self.api.get_with(name, gp).await
    }

    /// Get a named build config, or `None` when it does not exist.
    pub async fn get_opt(&self, name: &str) -> Result<Option<BuildConfig>> {
        self.api.get_opt(name).await
    }

    /// List build configs matching the given filters.
    ///
    /// The returned list carries the continuation token in its `metadata`
    /// when the server truncated the result.
    pub async fn list(&self, lp: &ListParams) -> Result<ObjectList<BuildConfig>> {
        self.api.list(lp).await
    }

    /// Delete a named build config.
    ///
    /// `Left` means the deletion has started; `Right` is the server's
    /// confirmation that the object is gone.
    pub async fn delete(&self, name: &str, dp: &DeleteParams) -> Result<Either<BuildConfig, Status>> {
        self.api.delete(name, dp).await
    }

    /// Delete every build config matching the given filters.
    pub async fn delete_collection(
        &self,
        dp: &DeleteParams,
        lp: &ListParams,
    ) -> Result<Either<ObjectList<BuildConfig>, Status>> {
        self.api.delete_collection(dp, lp).await
    }

    /// Watch build configs from the given resource version.
    ///
    /// The stream is lazy and non-restartable; when it closes the caller
    /// re-issues the watch from the last seen resource version.
    pub async fn watch(
        &self,
        wp: &WatchParams,
        version: &str,
    ) -> Result<impl Stream<Item = Result<WatchEvent<BuildConfig>>>> {
        self.api.watch(wp, version).await
    }

    /// Patch a named build config.
    ///
    /// The patch type (merge, strategic merge, json, apply) is carried by
    /// [`Patch`]; the payload is forwarded untouched.
    pub async fn patch<P: Serialize + Debug>(
        &self,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<BuildConfig> {
        self.api.patch(name, pp, patch).await
    }

    /// Patch the status sub-resource of a named build config.
    pub async fn patch_status<P: Serialize + Debug>(
        &self,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<BuildConfig> {
        self.api.patch_status(name, pp, patch).await
    }

    /// Server-side apply a declarative configuration.
    ///
    /// `pp` must carry a field manager
    /// ([`PatchParams::apply`](kube::api::PatchParams::apply)); the server
    /// merges the configuration against the live object and returns the
    /// result. Ownership conflicts surface as api errors unless forced.
    pub async fn apply(
        &self,
        name: &str,
        pp: &PatchParams,
        config: &BuildConfigApplyConfiguration,
    ) -> Result<BuildConfig> {
        self.api.patch(name, pp, &Patch::Apply(config)).await
    }

    /// Server-side apply a declarative configuration to the status
    /// sub-resource.
    pub async fn apply_status(
        &self,
        name: &str,
        pp: &PatchParams,
        config: &BuildConfigApplyConfiguration,
    ) -> Result<BuildConfig> {
        self.api.patch_status(name, pp, &Patch::Apply(config)).await
    }

    /// Instantiate a [`Build`] from the named build config.
    ///
    /// Issues a POST to `buildconfigs/{name}/instantiate` with the request as
    /// the body and returns the server's representation of the created build.
    /// Fails with a not-found api error when the parent does not exist.
    pub async fn instantiate(
        &self,
        name: &str,
        pp: &PostParams,
        request: &BuildRequest,
    ) -> Result<Build> {
        let data = serde_json::to_vec(request).map_err(Error::SerdeError)?;
        tracing::debug!(%name, "instantiating build from buildconfig");
        self.api.create_subresource("instantiate", name, pp, data).await
    }
}

/// Entry point for obtaining [`BuildConfigs`] handles from a [`Client`].
pub trait BuildConfigsExt {
    /// Build configs within the given namespace.
    fn build_configs(&self, namespace: &str) -> BuildConfigs;

    /// Build configs within the client's default namespace.
    fn default_build_configs(&self) -> BuildConfigs;
}

impl BuildConfigsExt for Client {
    fn build_configs(&self, namespace: &str) -> BuildConfigs {
        BuildConfigs::namespaced(self.clone(), namespace)
    }

    fn default_build_configs(&self) -> BuildConfigs {
        BuildConfigs::default_namespaced(self.clone())
    }
}

#[test]
fn instantiate_path() {
    use kube::core::{Request, Resource};
    let url = BuildConfig::url_path(&(), Some("ns1"));
    let req = Request::new(url)
        .create_subresource("instantiate", "app1", &PostParams::default(), vec![])
        .unwrap();
    assert_eq!(
        req.uri(),
        "/apis/build.openshift.io/v1/namespaces/ns1/buildconfigs/app1/instantiate?"
    );
    assert_eq!(req.method(), http::Method::POST);
}
