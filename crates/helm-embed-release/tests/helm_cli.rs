#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use color_eyre::eyre;
use helm_embed_release::{EnvSettings, Error, HelmCli, fetch_chart_values};
use indoc::indoc;
use test_util::prelude::*;

const FAKE_HELM: &str = indoc! {r#"
    #!/bin/sh
    # usage: helm status <name> --namespace <ns> --output json
    if [ "$1" != "status" ]; then
        echo "Error: unknown command $1" >&2
        exit 2
    fi
    case "$2" in
        consul)
            printf '{"name":"consul","namespace":"%s","version":2,"info":{"status":"deployed"},"config":{"global":{"name":"consul"}}}\n' "$4"
            ;;
        unreachable)
            echo "Error: Kubernetes cluster unreachable: context was not found for specified context: kind-dc9" >&2
            exit 1
            ;;
        *)
            echo "Error: release: not found" >&2
            exit 1
            ;;
    esac
"#};

fn install_fake_helm(dir: &Path) -> eyre::Result<std::path::PathBuf> {
    let path = dir.join("helm");
    std::fs::write(&path, FAKE_HELM)?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

// All cases run in one test so no other thread forks while the script is open.
#[test]
fn queries_release_through_helm_binary() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let dir = tempfile::tempdir()?;
    let helm = install_fake_helm(dir.path())?;
    let settings = EnvSettings::default().with_helm_binary(&helm);

    let values = fetch_chart_values("ns1", "consul", &settings, &HelmCli::new())?;
    let keys: Vec<String> = values.keys().cloned().collect();
    assert_that!(keys, elements_are![eq("global")]);
    assert_eq!(values["global"]["name"], serde_json::json!("consul"));

    let err = fetch_chart_values("ns1", "vault", &settings, &HelmCli::new()).unwrap_err();
    assert!(err.is_release_not_found(), "unexpected error: {err:?}");

    let err = fetch_chart_values("ns1", "unreachable", &settings, &HelmCli::new()).unwrap_err();
    assert!(!err.is_release_not_found(), "unexpected error: {err:?}");
    let Error::Status(status) = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_that!(status.to_string(), contains_substring("cluster unreachable"));

    let err = fetch_chart_values(
        "ns1",
        "consul",
        &EnvSettings::default(),
        &HelmCli::new().with_binary(dir.path().join("missing-helm")),
    )
    .unwrap_err();
    assert!(!err.is_release_not_found(), "unexpected error: {err:?}");
    Ok(())
}
