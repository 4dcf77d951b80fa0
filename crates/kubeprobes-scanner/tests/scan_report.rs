//! End-to-end scan and report tests against an in-memory pod list.
//!
//! Pods are decoded from the same JSON shape the API server returns, so the
//! probe fields go through the real `k8s-openapi` deserializers.

use k8s_openapi::api::core::v1::Pod;
use kubeprobes_scanner::{
    NamespaceScope, OutputFormat, ProbeFilter, ProbeKind, ProbeScanner, Reporter, ScanError,
    ScanOptions, ScanResult, StaticPodSource,
};
use serde_json::json;

fn pod_list() -> Vec<Pod> {
    let raw = json!([
        {
            "metadata": { "name": "api-7f9c", "namespace": "shop" },
            "spec": {
                "containers": [
                    {
                        "name": "api",
                        "image": "shop/api:1.4",
                        "livenessProbe": { "httpGet": { "path": "/healthz", "port": 8080 } },
                        "readinessProbe": { "httpGet": { "path": "/ready", "port": 8080 } },
                        "startupProbe": { "tcpSocket": { "port": 8080 } }
                    },
                    {
                        "name": "envoy",
                        "image": "envoyproxy/envoy:v1.30",
                        "readinessProbe": { "httpGet": { "path": "/ready", "port": 9901 } }
                    }
                ]
            }
        },
        {
            "metadata": { "name": "worker-0", "namespace": "shop" },
            "spec": {
                "initContainers": [{ "name": "migrate", "image": "shop/migrate:1.4" }],
                "containers": [{ "name": "worker", "image": "shop/worker:1.4" }]
            }
        },
        {
            "metadata": { "name": "coredns-5d78", "namespace": "kube-system" },
            "spec": {
                "containers": [
                    {
                        "name": "coredns",
                        "image": "coredns/coredns:1.11",
                        "livenessProbe": { "httpGet": { "path": "/health", "port": 8080 } },
                        "readinessProbe": { "httpGet": { "path": "/ready", "port": 8181 } }
                    }
                ]
            }
        }
    ]);
    serde_json::from_value(raw).expect("valid pod fixtures")
}

async fn scan(options: ScanOptions) -> ScanResult {
    ProbeScanner::new(StaticPodSource::new(pod_list()), options)
        .scan()
        .await
        .expect("scan succeeds")
}

#[tokio::test]
async fn namespace_scan_reports_missing_probes() {
    let options = ScanOptions::from_flags("shop", false, "", false, false).unwrap();
    let result = scan(options).await;

    let found: Vec<_> = result
        .issues
        .iter()
        .map(|i| format!("{}/{}:{}", i.pod_name, i.container_name, i.probe_type))
        .collect();
    assert_eq!(
        found,
        vec![
            "api-7f9c/envoy:liveness",
            "api-7f9c/envoy:startup",
            "worker-0/worker:liveness",
            "worker-0/worker:readiness",
            "worker-0/worker:startup",
        ]
    );
    assert_eq!(result.summary, "Found 5 probe issues in shop");
    assert_eq!(result.exit_code, 0);
    assert!(result.into_outcome().is_ok());
}

#[tokio::test]
async fn all_namespaces_startup_only() {
    let options = ScanOptions::from_flags("default", true, "startup", false, true).unwrap();
    assert_eq!(options.scope, NamespaceScope::All);
    assert_eq!(options.filter, ProbeFilter::Only(ProbeKind::Startup));

    let result = scan(options).await;
    assert_eq!(result.issues.len(), 3);
    assert_eq!(result.issues[2].namespace, "kube-system");
    assert_eq!(result.namespace, "all namespaces");
    assert_eq!(result.exit_code, 1);

    let text = Reporter::new(OutputFormat::Text).render(&result).unwrap();
    assert!(text.contains("[WARNING] kube-system/coredns-5d78 (container: coredns) missing startup probe"));
    assert!(text.ends_with("Issues found. Exiting with status code 1.\n"));

    assert!(matches!(
        result.into_outcome(),
        Err(ScanError::IssuesFound { count: 3 })
    ));
}

#[tokio::test]
async fn empty_namespace_is_clean() {
    let options = ScanOptions::from_flags("staging", false, "", true, true).unwrap();
    let result = scan(options).await;

    assert!(result.issues.is_empty());
    assert_eq!(result.exit_code, 0);
    assert_eq!(
        Reporter::new(OutputFormat::Text).render(&result).unwrap(),
        "No pods found in staging\n"
    );
}

#[tokio::test]
async fn structured_output_parses_back() {
    let options = ScanOptions::from_flags("shop", false, "", true, true).unwrap();
    let result = scan(options).await;

    let json = Reporter::new(OutputFormat::Json).render(&result).unwrap();
    assert_eq!(serde_json::from_str::<ScanResult>(&json).unwrap(), result);

    let yaml = Reporter::new(OutputFormat::Yaml).render(&result).unwrap();
    assert_eq!(serde_yaml::from_str::<ScanResult>(&yaml).unwrap(), result);
}
