use crate::context::RunContext;
use crate::editor;
use crate::storage::ObjectStore;
use std::fs;
use std::io;
use std::path::Path;

const OUTPUT_PREFIX: &str = "files-without-silence";
const TRIMMED_PREFIX: &str = "WithoutSilence-";

/// One full pass over the bucket: select, download, trim, re-encode, upload,
/// clean up. Returns the processed filename, or `None` when the bucket held
/// no candidate and nothing was done.
pub async fn run(ctx: &RunContext, store: &ObjectStore) -> crate::Result<Option<String>> {
    log::info!("...START -> {}", ctx.run_id);

    let Some(key) = store.find_first_mp3().await? else {
        log::info!("no MP3 file found in bucket {}", store.bucket_name());
        log::info!("...FINISHED...");
        return Ok(None);
    };

    let filename = base_filename(&key);
    log::debug!("selected {} for processing", key);

    let download_dir = ctx.download_dir();
    create_directory(&download_dir)?;
    let downloaded = download_dir.join(&filename);
    store.download(&key, &downloaded).await?;

    let edited_dir = ctx.edited_dir();
    create_directory(&edited_dir)?;

    let trimmed = edited_dir.join(format!("{TRIMMED_PREFIX}{filename}"));
    editor::remove_silence(&downloaded, &ctx.margin, &trimmed)?;
    log::debug!("edited: {}", filename);

    let reencoded = edited_dir.join(&filename);
    editor::reencode_to_mp3(&trimmed, &reencoded)?;

    store
        .upload(
            &format!("{OUTPUT_PREFIX}/{filename}"),
            &reencoded,
            "audio/mpeg",
        )
        .await?;

    // Local state goes first; the original object is only removed once the
    // upload has gone through.
    remove_directory(&edited_dir)?;
    remove_directory(&download_dir)?;

    store.remove_object(&key).await?;
    log::debug!("original object removed from bucket: {}", key);

    log::info!("...FINISHED...");
    Ok(Some(filename))
}

/// Create-if-absent; a pre-existing directory is not an error.
pub fn create_directory(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)?;
    log::debug!("directory {} ready", path.display());
    Ok(())
}

/// Recursive delete that tolerates the directory already being gone.
pub fn remove_directory(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Last path segment of a key, with backslashes normalised first.
pub fn base_filename(key: &str) -> String {
    let normalized = key.replace('\\', "/");
    normalized
        .rsplit('/')
        .next()
        .unwrap_or(&normalized)
        .to_string()
}
