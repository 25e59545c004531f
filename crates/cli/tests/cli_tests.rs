//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

const BLOG_URL: &str = "https://example.com/en/blog/2023/shipping-faster/";

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("blogshift")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input() {
    cmd()
        .args([&get_fixture_path("blog_post.html"), "--url", BLOG_URL])
        .assert()
        .success()
        .stdout(predicate::str::contains("Related Posts"))
        .stdout(predicate::str::contains("faster-tests"));
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("blog_post.html")).unwrap();
    cmd()
        .args(["-", "--url", BLOG_URL])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Metadata"));
}

#[test]
fn test_cli_html_format() {
    cmd()
        .args(["-f", "html", "--url", BLOG_URL, &get_fixture_path("blog_post.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<div class=\"blogPostMain\">"))
        .stdout(predicate::str::contains("<table"))
        .stdout(predicate::str::contains("searchOverlay").not());
}

#[test]
fn test_cli_json_format() {
    let output = cmd()
        .args(["-f", "json", "--url", BLOG_URL, &get_fixture_path("blog_post.html")])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "shipping-faster");
    assert_eq!(json["path"], "blog/2023");
    assert_eq!(json["metadata"]["Publication Date"], "2023-05-04");
}

#[test]
fn test_cli_frontmatter() {
    cmd()
        .args(["--frontmatter", "--url", BLOG_URL, &get_fixture_path("blog_post.html")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("+++"))
        .stdout(predicate::str::contains("publication_date = \"2023-05-04\""));
}

#[test]
fn test_cli_blog_v2_profile() {
    cmd()
        .args([
            "-p",
            "blog-v2",
            "-f",
            "html",
            "--url",
            "https://example.com/en/blog/2024/block-documents",
            &get_fixture_path("blog_post_v2.html"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("TOC"))
        .stdout(predicate::str::contains("Callout (left)"))
        .stdout(predicate::str::contains("card-blocks.png"));
}

#[test]
fn test_cli_output_dir() {
    let temp_dir = TempDir::new().unwrap();

    cmd()
        .args(["--url", BLOG_URL, "-o"])
        .arg(temp_dir.path())
        .arg(get_fixture_path("blog_post.html"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = temp_dir.path().join("blog/2023/shipping-faster.md");
    let content = std::fs::read_to_string(written).unwrap();
    assert!(content.contains("Related Posts"));
}

#[test]
fn test_cli_profile_from_config_dir() {
    let config_dir = TempDir::new().unwrap();
    std::fs::write(config_dir.path().join("example.com.txt"), "main: .blogPostContent\nembeds: no\n").unwrap();

    cmd()
        .args(["-f", "html", "--url", BLOG_URL, "--config-dir"])
        .arg(config_dir.path())
        .arg(get_fixture_path("blog_post.html"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<div class=\"blogPostContent\">"))
        .stdout(predicate::str::contains("Related Posts").not());
}

#[test]
fn test_cli_requires_url_for_files() {
    cmd()
        .arg(get_fixture_path("blog_post.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url is required"));
}

#[test]
fn test_cli_unknown_profile() {
    cmd()
        .args(["-p", "nope", "--url", BLOG_URL, &get_fixture_path("blog_post.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load profile 'nope'"));
}

#[test]
fn test_cli_missing_main_content() {
    cmd()
        .args(["-", "--url", BLOG_URL])
        .write_stdin("<html><body><p>No blog here</p></body></html>")
        .assert()
        .failure()
        .stderr(predicate::str::contains(".blogPostMain"));
}

#[test]
fn test_cli_file_not_found() {
    cmd()
        .args(["--url", BLOG_URL, "/nonexistent/file.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(["-f", "pdf", "--url", BLOG_URL, &get_fixture_path("blog_post.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("blog pages"))
        .stdout(predicate::str::contains("--profile"));
}
