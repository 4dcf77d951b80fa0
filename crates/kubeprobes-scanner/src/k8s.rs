//! Kubernetes cluster access.
//!
//! This module provides the [`PodSource`] trait and the [`KubePodSource`]
//! implementation that resolves a kubeconfig and lists pods through the
//! Kubernetes API.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::{debug, info};

use crate::types::{ClusterOptions, NamespaceScope};
use crate::{Result, ScanError};

/// The `PodSource` trait defines how the scanner obtains pods.
#[async_trait]
pub trait PodSource: Send + Sync {
    /// List every pod in `scope`, in the order the cluster returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the list call fails.
    async fn list_pods(&self, scope: &NamespaceScope) -> Result<Vec<Pod>>;
}

/// Pod source backed by a Kubernetes API client.
pub struct KubePodSource {
    client: Client,
    options: ClusterOptions,
}

impl KubePodSource {
    /// Connect to the cluster described by `options`.
    ///
    /// With an explicit kubeconfig path that file is read and the context
    /// override applied. Without one, a context override loads the default
    /// kubeconfig; otherwise the configuration is inferred from the
    /// environment (kubeconfig, then in-cluster).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the client
    /// cannot be created.
    pub async fn connect(options: ClusterOptions) -> Result<Self> {
        let config = Self::load_config(&options).await?;
        info!(cluster_url = %config.cluster_url, "Resolved cluster configuration");

        let client = Client::try_from(config)?;
        Ok(Self::with_client(client, options))
    }

    /// Create a pod source with a pre-configured client.
    #[must_use]
    pub fn with_client(client: Client, options: ClusterOptions) -> Self {
        Self { client, options }
    }

    /// Resolve the client configuration without connecting.
    ///
    /// # Errors
    ///
    /// Returns an error if the kubeconfig cannot be read or the context does not exist.
    pub async fn load_config(options: &ClusterOptions) -> Result<Config> {
        let kube_options = KubeConfigOptions {
            context: options.context.clone(),
            ..Default::default()
        };

        let config = match (&options.kubeconfig, &options.context) {
            (Some(path), _) => {
                debug!(path = %path, context = ?options.context, "Loading explicit kubeconfig");
                let kubeconfig = Kubeconfig::read_from(path)?;
                Config::from_custom_kubeconfig(kubeconfig, &kube_options).await?
            }
            (None, Some(context)) => {
                debug!(context = %context, "Loading default kubeconfig with context override");
                Config::from_kubeconfig(&kube_options).await?
            }
            (None, None) => {
                debug!("Inferring cluster configuration");
                Config::infer().await?
            }
        };

        Ok(config)
    }

    fn pods_api(&self, scope: &NamespaceScope) -> Api<Pod> {
        match scope {
            NamespaceScope::Namespace(name) => Api::namespaced(self.client.clone(), name),
            NamespaceScope::All => Api::all(self.client.clone()),
        }
    }
}

#[async_trait]
impl PodSource for KubePodSource {
    async fn list_pods(&self, scope: &NamespaceScope) -> Result<Vec<Pod>> {
        let pods = self.pods_api(scope);
        let params = ListParams::default();

        let pod_list = match self.options.timeout {
            Some(timeout) => tokio::time::timeout(timeout, pods.list(&params))
                .await
                .map_err(|_| ScanError::Timeout(timeout.as_secs()))??,
            None => pods.list(&params).await?,
        };

        debug!(scope = %scope, count = pod_list.items.len(), "Listed pods");
        Ok(pod_list.items)
    }
}

/// In-memory pod sources for testing without a real Kubernetes cluster.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// A pod source that serves a fixed pod list, or a fixed failure.
    #[derive(Default)]
    pub struct StaticPodSource {
        pods: Vec<Pod>,
        failure: Option<String>,
        calls: Mutex<Vec<NamespaceScope>>,
    }

    impl StaticPodSource {
        /// Create a source serving `pods`.
        #[must_use]
        pub fn new(pods: Vec<Pod>) -> Self {
            Self {
                pods,
                ..Self::default()
            }
        }

        /// Create a source whose list call always fails with `message`.
        #[must_use]
        pub fn failing(message: impl Into<String>) -> Self {
            Self {
                failure: Some(message.into()),
                ..Self::default()
            }
        }

        /// Number of list calls made so far.
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        /// Scopes requested so far, in call order.
        #[must_use]
        pub fn requested_scopes(&self) -> Vec<NamespaceScope> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl PodSource for StaticPodSource {
        async fn list_pods(&self, scope: &NamespaceScope) -> Result<Vec<Pod>> {
            self.calls.lock().push(scope.clone());

            if let Some(message) = &self.failure {
                return Err(ScanError::KubeApi(kube::Error::Service(message.clone().into())));
            }

            Ok(match scope {
                NamespaceScope::All => self.pods.clone(),
                NamespaceScope::Namespace(name) => self
                    .pods
                    .iter()
                    .filter(|p| p.metadata.namespace.as_deref() == Some(name.as_str()))
                    .cloned()
                    .collect(),
            })
        }
    }
}
