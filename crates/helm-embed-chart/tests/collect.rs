use color_eyre::eyre;
use helm_embed_chart::{ChartSource, DirEntry, Error, SourceError, collect_chart_files};
use indoc::indoc;
use test_util::prelude::*;
use vfs::VfsPath;

fn demo_tree() -> eyre::Result<VfsPath> {
    let root = VfsPath::new(vfs::MemoryFS::new());
    write(&root.join("charts/demo/Chart.yaml")?, "name: demo")?;
    write(&root.join("charts/demo/values.yaml")?, "replicas: 1")?;
    write(&root.join("charts/demo/templates/svc.yaml")?, "kind: Service")?;
    root.join("charts/demo/templates/sub")?.create_dir_all()?;
    Ok(root)
}

#[test]
fn collects_demo_chart_in_loader_order() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let root = demo_tree()?;

    let files = collect_chart_files(&root, "charts/demo")?;
    assert_that!(
        files,
        elements_are![
            buffered("Chart.yaml", "name: demo"),
            buffered("values.yaml", "replicas: 1"),
            buffered("templates/svc.yaml", "kind: Service"),
        ]
    );
    Ok(())
}

#[test]
fn names_are_relative_regardless_of_nesting() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let root = VfsPath::new(vfs::MemoryFS::new());
    let chart_dir = "a/b/c/d/consul";
    write(&root.join(format!("{chart_dir}/Chart.yaml"))?, "name: consul\n")?;
    write(&root.join(format!("{chart_dir}/values.yaml"))?, "global: {}\n")?;
    root.join(format!("{chart_dir}/templates"))?.create_dir_all()?;

    for dir in [chart_dir, "./a/b/c/d/consul/", "a/b/x/../c/d/consul"] {
        let files = collect_chart_files(&root, dir)?;
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Chart.yaml", "values.yaml"], "chart dir {dir:?}");
    }
    Ok(())
}

#[test]
fn chart_at_tree_root() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let root = VfsPath::new(vfs::MemoryFS::new());
    write(&root.join("Chart.yaml")?, "name: root\n")?;
    write(&root.join("values.yaml")?, "{}\n")?;
    write(&root.join("templates/cm.yaml")?, "kind: ConfigMap\n")?;

    let files = collect_chart_files(&root, "")?;
    assert_that!(
        files,
        elements_are![named("Chart.yaml"), named("values.yaml"), named("templates/cm.yaml")]
    );
    Ok(())
}

#[test]
fn missing_values_yaml_is_not_found() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let root = VfsPath::new(vfs::MemoryFS::new());
    write(&root.join("charts/demo/Chart.yaml")?, "name: demo")?;
    write(&root.join("charts/demo/templates/svc.yaml")?, "kind: Service")?;

    let err = collect_chart_files(&root, "charts/demo").unwrap_err();
    assert!(err.is_not_found());
    assert!(
        matches!(&err, Error::MissingFile { path, .. } if path == "charts/demo/values.yaml"),
        "unexpected error: {err:?}"
    );
    assert_that!(err.to_string(), contains_substring("values.yaml"));
    Ok(())
}

#[test]
fn missing_chart_yaml_fails_before_values() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let root = VfsPath::new(vfs::MemoryFS::new());
    write(&root.join("demo/values.yaml")?, "a: 1")?;
    root.join("demo/templates")?.create_dir_all()?;

    let err = collect_chart_files(&root, "demo").unwrap_err();
    assert!(
        matches!(&err, Error::MissingFile { path, .. } if path == "demo/Chart.yaml"),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[test]
fn missing_templates_dir_is_an_error() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let root = VfsPath::new(vfs::MemoryFS::new());
    write(&root.join("demo/Chart.yaml")?, "name: demo")?;
    write(&root.join("demo/values.yaml")?, "a: 1")?;

    let err = collect_chart_files(&root, "demo").unwrap_err();
    assert!(err.is_not_found());
    assert!(
        matches!(&err, Error::MissingTemplates { path, .. } if path == "demo/templates"),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[test]
fn templates_as_file_is_an_error() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let root = VfsPath::new(vfs::MemoryFS::new());
    write(&root.join("demo/Chart.yaml")?, "name: demo")?;
    write(&root.join("demo/values.yaml")?, "a: 1")?;
    write(&root.join("demo/templates")?, "not a directory")?;

    let err = collect_chart_files(&root, "demo").unwrap_err();
    assert!(matches!(err, Error::MissingTemplates { .. }), "unexpected error: {err:?}");
    Ok(())
}

#[test]
fn skips_template_subdirectories() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let root = VfsPath::new(vfs::MemoryFS::new());
    write(&root.join("demo/Chart.yaml")?, "name: demo")?;
    write(&root.join("demo/values.yaml")?, "a: 1")?;
    write(&root.join("demo/templates/deploy.yaml")?, "kind: Deployment")?;
    write(&root.join("demo/templates/_helpers.tpl")?, "{{/* helpers */}}")?;
    write(&root.join("demo/templates/NOTES.txt")?, "thanks")?;
    write(&root.join("demo/templates/tests/pod.yaml")?, "kind: Pod")?;
    write(&root.join("demo/templates/nested/deeper/cm.yaml")?, "kind: ConfigMap")?;

    let files = collect_chart_files(&root, "demo")?;
    assert_that!(files, len(eq(5)));
    assert_that!(
        files[2..],
        unordered_elements_are![
            named("templates/deploy.yaml"),
            named("templates/_helpers.tpl"),
            named("templates/NOTES.txt"),
        ]
    );
    assert!(files.iter().all(|f| !f.name.contains("tests/") && !f.name.contains("nested/")));
    Ok(())
}

#[test]
fn inserted_template_round_trips() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let root = demo_tree()?;
    let content = indoc! {r#"
        apiVersion: v1
        kind: ConfigMap
        data:
          key: "value"
    "#};
    write(&root.join("charts/demo/templates/x.yaml")?, content)?;

    let files = collect_chart_files(&root, "charts/demo")?;
    let matching: Vec<_> = files.iter().filter(|f| f.name == "templates/x.yaml").collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].data, content.as_bytes());
    Ok(())
}

#[test]
fn collection_is_idempotent() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let root = demo_tree()?;
    write(&root.join("charts/demo/templates/a.yaml")?, "a")?;
    write(&root.join("charts/demo/templates/b.yaml")?, "b")?;

    let first = collect_chart_files(&root, "charts/demo")?;
    let second = collect_chart_files(&root, "charts/demo")?;
    sim_assert_eq!(first, second);
    Ok(())
}

#[test]
fn collects_fixture_chart_from_disk() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let root = test_util::testdata_vfs();

    let files = collect_chart_files(&root, "charts/demo")?;
    assert_that!(files, len(eq(4)));
    assert_that!(files[0], named("Chart.yaml"));
    assert_that!(files[1], named("values.yaml"));
    assert_that!(
        files[2..],
        unordered_elements_are![named("templates/service.yaml"), named("templates/_helpers.tpl")]
    );
    Ok(())
}

/// Yields templates in a fixed, non-lexicographic order.
struct ScriptedSource {
    templates: Vec<&'static str>,
}

impl ChartSource for ScriptedSource {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        if path.ends_with("broken.yaml") {
            return Err(SourceError::Io {
                path: path.to_string(),
                source: std::io::Error::other("disk on fire"),
            });
        }
        Ok(path.as_bytes().to_vec())
    }

    fn read_dir(&self, _path: &str) -> Result<Vec<DirEntry>, SourceError> {
        Ok(self
            .templates
            .iter()
            .map(|name| DirEntry {
                name: (*name).to_string(),
                is_dir: false,
            })
            .collect())
    }
}

#[test]
fn keeps_source_listing_order() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let source = ScriptedSource {
        templates: vec!["zeta.yaml", "alpha.yaml", "mid.yaml"],
    };

    let files = collect_chart_files(&source, "chart")?;
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Chart.yaml",
            "values.yaml",
            "templates/zeta.yaml",
            "templates/alpha.yaml",
            "templates/mid.yaml"
        ]
    );
    assert_eq!(files[2].data, b"chart/templates/zeta.yaml");
    Ok(())
}

#[test]
fn read_failures_are_propagated() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let source = ScriptedSource {
        templates: vec!["ok.yaml", "broken.yaml", "later.yaml"],
    };

    let err = collect_chart_files(&source, "chart").unwrap_err();
    assert!(!err.is_not_found());
    assert!(
        matches!(&err, Error::Read { path, .. } if path == "chart/templates/broken.yaml"),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[test]
fn entries_escaping_the_chart_fail_relativization() -> eyre::Result<()> {
    test_util::Builder::default().build();
    let source = ScriptedSource {
        templates: vec!["../.."],
    };

    let err = collect_chart_files(&source, "charts/demo").unwrap_err();
    assert!(matches!(err, Error::Relativize { .. }), "unexpected error: {err:?}");
    Ok(())
}
