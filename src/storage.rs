use quick_xml::de::from_str;
use reqwest::Client as ReqwestClient;
use reqwest::StatusCode;
use rusty_s3::{Bucket, Credentials, S3Action, UrlStyle};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const SIGN_TTL: Duration = Duration::from_secs(3600);

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{action} request failed: {source}")]
    Transport {
        action: &'static str,
        source: reqwest::Error,
    },
    #[error("{action} returned status {status}")]
    BadStatus {
        action: &'static str,
        status: StatusCode,
    },
    #[error("could not parse bucket listing: {0}")]
    Listing(#[from] quick_xml::DeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ListObjectsV2 XML response, only the fields we read.
#[derive(Debug, Deserialize)]
struct ListObjectsResponse {
    #[serde(rename = "Contents", default)]
    contents: Vec<ObjectEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ObjectEntry {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Size")]
    pub size: Option<u64>,
}

/// Connection handle to the s3 compatible storage, shared by every remote
/// operation of a run.
pub struct ObjectStore {
    bucket: Bucket,
    client: ReqwestClient,
    credentials: Credentials,
}

impl ObjectStore {
    pub fn new(
        endpoint: &str,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
    ) -> crate::Result<Self> {
        let base_url = endpoint.trim_end_matches('/');
        let url = url::Url::parse(base_url)?;

        let bucket = Bucket::new(
            url,
            UrlStyle::Path,
            bucket.to_string(),
            "us-east-1".to_string(),
        )?;

        let credentials = Credentials::new(access_key.to_string(), secret_key.to_string());

        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            bucket,
            client,
            credentials,
        })
    }

    pub fn bucket_name(&self) -> &str {
        self.bucket.name()
    }

    /// Lists the bucket in backend order. The listing is not recursive from
    /// our point of view: nested keys come back too but are filtered out by
    /// the selection step.
    pub async fn list_objects(&self) -> Result<Vec<ObjectEntry>, StorageError> {
        let action = self.bucket.list_objects_v2(Some(&self.credentials));
        let url = action.sign(SIGN_TTL);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| StorageError::Transport {
                action: "list",
                source,
            })?;
        if !response.status().is_success() {
            return Err(StorageError::BadStatus {
                action: "list",
                status: response.status(),
            });
        }

        let content = response
            .text()
            .await
            .map_err(|source| StorageError::Transport {
                action: "list",
                source,
            })?;
        let listing: ListObjectsResponse = from_str(&content)?;
        Ok(listing.contents)
    }

    /// The key of the first root-level `.mp3` object in listing order, or
    /// `None` when the bucket holds no candidate.
    pub async fn find_first_mp3(&self) -> Result<Option<String>, StorageError> {
        let entries = self.list_objects().await?;
        Ok(first_root_mp3(&entries).map(|entry| entry.key.clone()))
    }

    /// Downloads one object to `dest`, creating the parent directory first.
    pub async fn download(&self, key: &str, dest: &Path) -> Result<(), StorageError> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let action = self.bucket.get_object(Some(&self.credentials), key);
        let url = action.sign(SIGN_TTL);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| StorageError::Transport {
                action: "download",
                source,
            })?;
        if !response.status().is_success() {
            return Err(StorageError::BadStatus {
                action: "download",
                status: response.status(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| StorageError::Transport {
                action: "download",
                source,
            })?;
        std::fs::write(dest, &bytes)?;
        log::debug!("downloaded {} to {}", key, dest.display());
        Ok(())
    }

    /// Uploads `src` to `dest_key`, creating or overwriting the object.
    pub async fn upload(
        &self,
        dest_key: &str,
        src: &Path,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let content_type = content_type_for(src, content_type);
        log::debug!(
            "uploading {} to bucket {} as {}",
            dest_key,
            self.bucket.name(),
            content_type
        );

        let body = std::fs::read(src)?;
        let action = self.bucket.put_object(Some(&self.credentials), dest_key);
        let url = action.sign(SIGN_TTL);

        let response = self
            .client
            .put(url)
            .header("Content-Type", content_type)
            .body(body)
            .send()
            .await
            .map_err(|source| StorageError::Transport {
                action: "upload",
                source,
            })?;
        if !response.status().is_success() {
            return Err(StorageError::BadStatus {
                action: "upload",
                status: response.status(),
            });
        }

        log::debug!("upload of {} finished", src.display());
        Ok(())
    }

    pub async fn remove_object(&self, key: &str) -> Result<(), StorageError> {
        let action = self.bucket.delete_object(Some(&self.credentials), key);
        let url = action.sign(SIGN_TTL);

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|source| StorageError::Transport {
                action: "delete",
                source,
            })?;
        if !response.status().is_success() {
            return Err(StorageError::BadStatus {
                action: "delete",
                status: response.status(),
            });
        }
        Ok(())
    }
}

/// First entry in listing order that sits at the bucket root and carries a
/// `.mp3` suffix, compared case-insensitively.
pub fn first_root_mp3(entries: &[ObjectEntry]) -> Option<&ObjectEntry> {
    entries.iter().find(|entry| is_root_mp3_key(&entry.key))
}

fn is_root_mp3_key(key: &str) -> bool {
    !key.contains('/')
        && Path::new(key)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}

// A .txt source always goes up as text/plain, anything else keeps the
// caller-supplied content type.
fn content_type_for<'a>(src: &Path, fallback: &'a str) -> &'a str {
    if src.extension().is_some_and(|ext| ext == "txt") {
        "text/plain"
    } else {
        fallback
    }
}
