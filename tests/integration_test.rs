//! Integration tests for docker-subnet-pool
//!
//! Fabricated runtime commands stand in for docker, so no real container
//! runtime is needed. Each fake is a small shell script that receives the
//! usual `network inspect <name>` arguments and prints canned output.

use docker_subnet_pool::docker::{network_subnets, run_json};
use docker_subnet_pool::models::NetworkInspect;
use docker_subnet_pool::{derive_address_pools, PoolError};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

const INSPECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Write an executable shell script standing in for the runtime command.
///
/// The script lives in its own temp dir, removed when the guard drops.
fn fake_runtime(body: &str) -> (TempDir, String) {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("creating temp dir");
    let path = dir.path().join("fake-runtime");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("writing fake runtime script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("marking fake runtime executable");

    let path = path.to_str().expect("temp path is not UTF-8").to_string();
    (dir, path)
}

#[tokio::test]
async fn test_delayed_writer_does_not_hang() {
    // The JSON document arrives in two chunks with a pause in between; the
    // decode must wait for the tail and still complete.
    let script = r#"printf '[{"IPAM":{"Config":[{"Subnet":"172.18.0.0/16"}]}}'; sleep 1; printf ']'"#;

    let networks = timeout(
        INSPECT_TIMEOUT,
        run_json::<Vec<NetworkInspect>>("sh", &["-c", script]),
    )
    .await
    .expect("inspect timed out instead of draining the stream")
    .expect("decode failed");

    assert_eq!(networks.len(), 1);
    assert_eq!(networks[0].ipam.config[0].subnet, "172.18.0.0/16");
}

#[tokio::test]
async fn test_output_larger_than_pipe_buffer_is_drained() {
    // ~120KB of output, well past the usual 64KB pipe buffer. Without a
    // reader running concurrently with the process-wait this hangs forever.
    let (_dir, runtime) = fake_runtime(
        r#"printf '['
i=0
while [ $i -lt 40000 ]; do
    printf '{},'
    i=$((i+1))
done
printf '{}]'"#,
    );

    let err = timeout(INSPECT_TIMEOUT, network_subnets(Some(runtime.as_str()), "kind"))
        .await
        .expect("inspect timed out instead of draining the stream")
        .unwrap_err();

    assert!(
        matches!(err, PoolError::Cardinality { count: 40001, .. }),
        "expected Cardinality with count 40001, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_cardinality_zero_networks() {
    let (_dir, runtime) = fake_runtime("echo '[]'");
    let err = network_subnets(Some(runtime.as_str()), "kind")
        .await
        .unwrap_err();

    assert!(
        matches!(err, PoolError::Cardinality { ref name, count: 0 } if name == "kind"),
        "expected Cardinality with count 0, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_cardinality_two_networks() {
    let (_dir, runtime) = fake_runtime("echo '[{},{}]'");
    let err = network_subnets(Some(runtime.as_str()), "kind")
        .await
        .unwrap_err();

    assert!(
        matches!(err, PoolError::Cardinality { count: 2, .. }),
        "expected Cardinality with count 2, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_network_without_subnets() {
    let (_dir, runtime) = fake_runtime(r#"echo '[{"Name":"kind"}]'"#);
    let subnets = network_subnets(Some(runtime.as_str()), "kind")
        .await
        .expect("inspect failed");
    assert!(subnets.is_empty());
}

#[tokio::test]
async fn test_malformed_output() {
    let (_dir, runtime) = fake_runtime("echo 'not json at all'");
    let err = network_subnets(Some(runtime.as_str()), "kind")
        .await
        .unwrap_err();

    assert!(
        matches!(err, PoolError::Decode { .. }),
        "expected Decode, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_process_exit_failure() {
    // Status takes precedence over the (also failing) decode of the empty
    // output.
    let (_dir, runtime) = fake_runtime("exit 3");
    let err = network_subnets(Some(runtime.as_str()), "kind")
        .await
        .unwrap_err();

    assert!(
        matches!(err, PoolError::ProcessFailed { .. }),
        "expected ProcessFailed, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_process_spawn_failure() {
    let err = network_subnets(Some("/definitely/not/a/real/runtime-6f2a"), "kind")
        .await
        .unwrap_err();

    assert!(
        matches!(err, PoolError::Process { .. }),
        "expected Process, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_derive_pools_end_to_end() {
    let (_dir, runtime) = fake_runtime(
        r#"cat <<'EOF'
[
    {
        "Name": "kind",
        "Driver": "bridge",
        "IPAM": {
            "Driver": "default",
            "Config": [
                {"Subnet": "172.18.0.0/16", "Gateway": "172.18.0.1"},
                {"Subnet": "fc00:f853:ccd:e793::/64"}
            ]
        }
    }
]
EOF"#,
    );

    let pools = derive_address_pools(Some(runtime.as_str()), "kind")
        .await
        .expect("deriving pools failed");

    let pools: Vec<String> = pools.iter().map(|p| p.to_string()).collect();
    assert_eq!(pools, vec!["172.18.128.0/24", "fc00:f853:ccd:e793:8000::/96"]);
}

#[tokio::test]
async fn test_derive_pools_non_normalized_subnet() {
    // A subnet string with host bits set is masked to its network before
    // bisection, so the pool stays in the parent's upper half.
    let (_dir, runtime) =
        fake_runtime(r#"echo '[{"IPAM":{"Config":[{"Subnet":"172.18.0.1/16"}]}}]'"#);

    let pools = derive_address_pools(Some(runtime.as_str()), "kind")
        .await
        .expect("deriving pools failed");

    let pools: Vec<String> = pools.iter().map(|p| p.to_string()).collect();
    assert_eq!(pools, vec!["172.18.128.0/24"]);
}

#[tokio::test]
async fn test_derive_pools_bad_subnet_fails_fast() {
    let (_dir, runtime) =
        fake_runtime(r#"echo '[{"IPAM":{"Config":[{"Subnet":"not-a-cidr"}]}}]'"#);

    let err = derive_address_pools(Some(runtime.as_str()), "kind")
        .await
        .unwrap_err();

    assert!(
        matches!(err, PoolError::InvalidCidr { ref input, .. } if input == "not-a-cidr"),
        "expected InvalidCidr, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_derive_pools_exhausted_parent() {
    let (_dir, runtime) =
        fake_runtime(r#"echo '[{"IPAM":{"Config":[{"Subnet":"127.0.0.1/32"}]}}]'"#);

    let err = derive_address_pools(Some(runtime.as_str()), "kind")
        .await
        .unwrap_err();

    assert!(
        matches!(err, PoolError::AddressSpaceExhausted { .. }),
        "expected AddressSpaceExhausted, got {:?}",
        err
    );
}
