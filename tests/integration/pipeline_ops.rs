use super::test_helpers::*;
use assert_fs::prelude::*;
use desilencer::context::RunContext;
use desilencer::pipeline::{self, create_directory, remove_directory};
use desilencer::storage::ObjectStore;
use predicates::prelude::*;
use std::fs;

#[test]
fn working_directories_are_created_idempotently() {
    let root = assert_fs::TempDir::new().unwrap();
    let ctx = RunContext::new("0.04sec", root.path());

    create_directory(&ctx.download_dir()).unwrap();
    create_directory(&ctx.download_dir()).unwrap();
    create_directory(&ctx.edited_dir()).unwrap();

    root.child("foredit").assert(predicate::path::is_dir());
    root.child("edited").assert(predicate::path::is_dir());
}

#[test]
fn cleanup_removes_populated_directories_and_tolerates_absence() {
    let root = assert_fs::TempDir::new().unwrap();
    let ctx = RunContext::new("0.04sec", root.path());

    let edited = ctx.edited_dir();
    fs::create_dir_all(&edited).unwrap();
    fs::write(edited.join("WithoutSilence-speech.mp3"), b"trimmed").unwrap();
    fs::write(edited.join("speech.mp3"), b"reencoded").unwrap();

    remove_directory(&edited).unwrap();
    // the download dir was never created; removal must still succeed
    remove_directory(&ctx.download_dir()).unwrap();

    root.child("edited").assert(predicate::path::missing());
    root.child("foredit").assert(predicate::path::missing());
}

// Requires a reachable MinIO with the bucket from MINIO_BUCKET (or
// `autoeditor`) plus auto-editor and ffmpeg on PATH. Seed the bucket with a
// single root-level `speech.mp3` before running.
#[tokio::test]
#[ignore = "needs a live MinIO endpoint and auto-editor/ffmpeg installed"]
async fn end_to_end_processes_single_mp3() {
    let env = TestEnv::new();
    let store = ObjectStore::new(&env.endpoint, &env.access_key, &env.secret_key, &env.bucket)
        .expect("Failed to build storage client");
    let ctx = RunContext::new("0.04sec", &env.workspace);

    let processed = pipeline::run(&ctx, &store)
        .await
        .expect("Failed to process bucket");

    let name = processed.expect("bucket should hold one root-level mp3");

    // local working state is gone
    assert!(!env.workspace.join("foredit").exists());
    assert!(!env.workspace.join("edited").exists());

    // original is gone, processed copy exists under the output prefix
    let keys: Vec<String> = store
        .list_objects()
        .await
        .expect("Failed to list bucket")
        .into_iter()
        .map(|entry| entry.key)
        .collect();
    assert!(!keys.contains(&name));
    assert!(keys.contains(&format!("files-without-silence/{name}")));
}
