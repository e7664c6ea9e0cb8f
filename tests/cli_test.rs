use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("penguin-analyzer").unwrap()
}

#[test]
fn test_run_creates_all_outputs() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("출력 경로:"))
        .stdout(predicate::str::contains("penguins_analysis.md"))
        .stdout(predicate::str::contains("완료"));

    let out = dir.path().join("analysis_output");
    assert!(out.join("penguins_analysis.md").exists());
    assert!(out.join("crosstab_species_island.csv").exists());
    assert!(out.join("pivot_bodymass_species_sex.csv").exists());

    let images: Vec<_> = std::fs::read_dir(out.join("images"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(images.len(), 12);
    for image in images {
        assert_eq!(image.extension().unwrap(), "png");
        assert!(std::fs::metadata(&image).unwrap().len() > 0);
    }
}

#[test]
fn test_stdout_lists_all_image_paths() {
    let dir = TempDir::new().unwrap();

    let assert = cmd().current_dir(dir.path()).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("생성된 이미지들:"));
    assert_eq!(stdout.matches(".png").count(), 12);
}

#[test]
fn test_report_image_references_resolve() {
    let dir = TempDir::new().unwrap();
    cmd().current_dir(dir.path()).assert().success();

    let out = dir.path().join("analysis_output");
    let report = std::fs::read_to_string(out.join("penguins_analysis.md")).unwrap();

    assert_eq!(report.matches("![](images/").count(), 12);
    for line in report.lines().filter(|l| l.starts_with("![](")) {
        let rel = line
            .trim_start_matches("![](")
            .trim_end_matches(')');
        // References are relative to the report's directory
        assert!(out.join(rel).exists(), "missing {rel}");
    }
}

#[test]
fn test_rerun_overwrites_consistently() {
    let dir = TempDir::new().unwrap();
    cmd().current_dir(dir.path()).assert().success();
    let out = dir.path().join("analysis_output");
    let first = std::fs::read_to_string(out.join("crosstab_species_island.csv")).unwrap();

    cmd().current_dir(dir.path()).assert().success();
    let second = std::fs::read_to_string(out.join("crosstab_species_island.csv")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_rejects_unknown_flag() {
    cmd().arg("--input").assert().failure();
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("penguin-analyzer"));
}
