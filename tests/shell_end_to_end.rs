// tests/shell_end_to_end.rs
#![cfg(unix)]

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use runscript::cancel::TaskCancelFlag;
use runscript::engine::RunScriptPlugin;
use runscript::exec::ShellCommandExecutor;
use runscript::fs::{FileSystem, RealFileSystem};
use runscript::types::ResultStatus;
use runscript::upload::LocalDirUploader;

use runscript_test_utils::builders::{ConfigurationBuilder, DocumentBuilder, test_settings};
use runscript_test_utils::{init_tracing, with_timeout};

fn real_plugin(tmp: &TempDir) -> RunScriptPlugin<ShellCommandExecutor, LocalDirUploader> {
    let settings = test_settings();
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let uploader = Arc::new(LocalDirUploader::new(
        Arc::clone(&fs),
        tmp.path().join("store"),
        &settings,
    ));
    RunScriptPlugin::new(settings, ShellCommandExecutor::new(), uploader, fs)
}

#[tokio::test]
async fn test_real_shell_runs_documents_and_uploads_output() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let plugin = real_plugin(&tmp);

    let properties = json!([
        DocumentBuilder::new("doc-a")
            .command("echo hello")
            .command("echo oops 1>&2")
            .build(),
        DocumentBuilder::new("doc-b").command("exit 3").build(),
    ]);
    let config = ConfigurationBuilder::new(properties)
        .orchestration_dir(tmp.path().join("orch"))
        .build();

    let result = with_timeout(plugin.execute(&config, &TaskCancelFlag::new())).await;

    let a = &result.documents[0].output;
    assert_eq!(a.stdout, "hello\n");
    assert_eq!(a.stderr, "oops\n");
    assert_eq!(a.status, ResultStatus::Success);

    let b = &result.documents[1].output;
    assert_eq!(b.status, ResultStatus::Failed);
    assert_eq!(b.exit_code, 3);

    assert_eq!(result.status(), ResultStatus::Failed);
    assert_eq!(result.exit_code(), 1);
    assert!(result.upload_failures.is_empty());

    let uploaded = tmp.path().join("store/bucket/key/doc-a/stdout");
    assert_eq!(std::fs::read_to_string(uploaded).unwrap(), "hello\n");
    let script = tmp.path().join("orch/doc-a/_script.sh");
    assert_eq!(
        std::fs::read_to_string(script).unwrap(),
        "echo hello\necho oops 1>&2\n"
    );
}

#[tokio::test]
async fn test_real_shell_honours_working_directory() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let workdir = tmp.path().join("work");
    std::fs::create_dir_all(&workdir).unwrap();
    std::fs::write(workdir.join("marker.txt"), "found it").unwrap();
    let plugin = real_plugin(&tmp);

    let properties = DocumentBuilder::new("doc-a")
        .command("cat marker.txt")
        .working_dir(&workdir.to_string_lossy())
        .build();
    let config = ConfigurationBuilder::new(properties)
        .orchestration_dir(tmp.path().join("orch"))
        .bucket("")
        .build();

    let result = with_timeout(plugin.execute(&config, &TaskCancelFlag::new())).await;

    assert_eq!(result.status(), ResultStatus::Success);
    assert_eq!(result.documents[0].output.stdout, "found it");
    assert!(!tmp.path().join("store").exists());
}

#[tokio::test]
async fn test_canceled_flag_skips_real_execution() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    let plugin = real_plugin(&tmp);

    let properties = DocumentBuilder::new("doc-a").command("echo never").build();
    let config = ConfigurationBuilder::new(properties)
        .orchestration_dir(tmp.path().join("orch"))
        .build();
    let cancel = TaskCancelFlag::new();
    cancel.cancel();

    let result = plugin.execute(&config, &cancel).await;

    assert_eq!(result.status(), ResultStatus::Failed);
    assert!(!tmp.path().join("orch/doc-a").exists());
}
