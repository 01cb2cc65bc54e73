use clap::Parser;
use desilencer::config::Config;
use desilencer::context::RunContext;
use desilencer::storage::{ObjectStore, StorageError};
use desilencer::{Result, cli, pipeline};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = cli::Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(bucket) = args.bucket {
        config.bucket = bucket;
    }
    if let Some(margin) = args.margin {
        config.margin = margin;
    }
    if let Some(work_root) = args.work_root {
        config.work_root = work_root;
    }

    let store = ObjectStore::new(
        &config.endpoint,
        &config.access_key,
        &config.secret_key,
        &config.bucket,
    )?;
    let ctx = RunContext::new(&config.margin, &config.work_root);

    match pipeline::run(&ctx, &store).await {
        Ok(Some(filename)) => println!("Processed {}", filename),
        Ok(None) => println!("No MP3 file found in bucket {}", config.bucket),
        Err(err) => {
            // Storage failures are the one family handled here; anything
            // else propagates as an uncaught fatal error.
            if let Some(storage_err) = err.downcast_ref::<StorageError>() {
                log::error!("storage error during run {}: {}", ctx.run_id, storage_err);
                std::process::exit(1);
            }
            return Err(err);
        }
    }

    Ok(())
}
