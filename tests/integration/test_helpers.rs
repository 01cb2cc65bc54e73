use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    pub temp_dir: TempDir,
    pub workspace: PathBuf,
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
}

impl TestEnv {
    pub fn new() -> Self {
        // Load .env file if exists
        dotenv::dotenv().ok();

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let workspace = temp_dir.path().to_path_buf();

        let host = env::var("MINIO_URL").unwrap_or("localhost".to_string());
        let port = env::var("MINIO_PORT").unwrap_or("9000".to_string());

        Self {
            temp_dir,
            workspace,
            endpoint: format!("http://{}:{}", host, port),
            access_key: env::var("MINIO_ROOT_USER").unwrap_or("minioadmin".to_string()),
            secret_key: env::var("MINIO_ROOT_PASSWORD").unwrap_or("minioadmin".to_string()),
            bucket: env::var("MINIO_BUCKET").unwrap_or("autoeditor".to_string()),
        }
    }
}
