//! Typed client for the OpenShift [`build.openshift.io/v1`] API group.
//!
//! This crate layers a typed [`BuildConfigs`] handle over [`kube`]'s generic
//! [`Api`](kube::Api) machinery. All transport, auth, and codec concerns are
//! delegated to [`kube`]; this crate only binds the `buildconfigs` resource
//! (schema types, canonical url paths, and the `instantiate` sub-resource
//! action that triggers a [`Build`] from a [`BuildConfig`]).
//!
//! ```no_run
//! use kube::{api::PostParams, Client};
//! use openshift_build_client::{BuildConfigsExt, BuildRequest};
//!
//! # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::try_default().await?;
//! let buildconfigs = client.build_configs("my-project");
//!
//! let bc = buildconfigs.get("app1").await?;
//! println!("run policy: {:?}", bc.spec.run_policy);
//!
//! let build = buildconfigs
//!     .instantiate("app1", &PostParams::default(), &BuildRequest::new("app1"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`build.openshift.io/v1`]: https://docs.openshift.com/container-platform/latest/rest_api/workloads_apis/buildconfig-build-openshift-io-v1.html

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod apply;
pub mod client;
pub mod v1;

pub use apply::BuildConfigApplyConfiguration;
pub use client::{BuildConfigs, BuildConfigsExt};
pub use v1::{Build, BuildConfig, BuildConfigSpec, BuildConfigStatus, BuildRequest};

pub use kube::{Client, Error, Result};
