//! End-to-end tests for the `hypervel-modules` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hypervel-modules"))
        .args(args)
        .current_dir(cwd)
        // Keep the user's own config and stubs out of the run
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_make_module_exit_codes() {
    let temp_dir = TempDir::new().unwrap();

    let first = run(temp_dir.path(), &["make-module", "Posts"]);
    assert_eq!(first.status.code(), Some(0), "stderr: {}", stderr(&first));
    assert!(stdout(&first).contains("composer dump-autoload"));
    assert!(temp_dir.path().join("modules/Posts/src/Models/Post.php").is_file());

    let second = run(temp_dir.path(), &["make-module", "Posts"]);
    assert_eq!(second.status.code(), Some(1));
    assert!(stderr(&second).contains("already exists"));
}

#[test]
fn test_sub_generator_without_module() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(temp_dir.path(), &["make-module-model", "Blog", "Tag"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("make-module Blog"));
    assert!(!temp_dir.path().join("modules").exists());
}

#[test]
fn test_model_cascade_from_cli() {
    let temp_dir = TempDir::new().unwrap();
    assert!(run(temp_dir.path(), &["make-module", "Blog"]).status.success());

    let output = run(
        temp_dir.path(),
        &["make-module-model", "Blog", "Tags", "--migration", "--factory"],
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let root = temp_dir.path().join("modules/Blog/src");
    assert!(root.join("Models/Tag.php").is_file());
    assert!(root.join("Database/Factories/TagFactory.php").is_file());

    let migrations: Vec<String> = fs::read_dir(root.join("Database/Migrations"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(migrations.len(), 1);
    assert!(migrations[0].ends_with("_create_tags_table.php"));
}

#[test]
fn test_base_path_and_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app");
    fs::create_dir_all(&app).unwrap();

    let config = temp_dir.path().join("modules.toml");
    fs::write(
        &config,
        "namespace = \"Acme\\\\Modules\"\n\n[paths]\nmodules_dir = \"packages\"\n",
    )
    .unwrap();

    let output = run(
        temp_dir.path(),
        &[
            "make-module",
            "Shop",
            "--base-path",
            app.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let provider =
        fs::read_to_string(app.join("packages/Shop/src/Providers/ShopServiceProvider.php"))
            .unwrap();
    assert!(provider.contains(r"namespace Acme\Modules\Shop\Providers;"));
}

#[test]
fn test_missing_template_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("hypervel-modules.toml"),
        "[templates]\nembedded = false\n",
    )
    .unwrap();

    let output = run(temp_dir.path(), &["make-module", "Posts"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("template not found"));
    assert!(!temp_dir.path().join("modules/Posts").exists());
}

#[test]
fn test_publish_then_list() {
    let temp_dir = TempDir::new().unwrap();
    let stub_dir = temp_dir.path().join("my-stubs");

    let publish = run(
        temp_dir.path(),
        &["stubs", "publish", "--dir", stub_dir.to_str().unwrap()],
    );
    assert!(publish.status.success(), "stderr: {}", stderr(&publish));
    assert!(stub_dir.join("model.stub").is_file());

    let list = run(temp_dir.path(), &["stubs", "list"]);
    assert!(list.status.success());
    assert!(stdout(&list).contains("controller-resource"));
    assert!(stdout(&list).contains("built-in"));
}
