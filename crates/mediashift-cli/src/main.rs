//! mediashift: move a local media folder into an S3-compatible bucket.
//!
//! Every file whose base name matches a row in `public.files` is uploaded under its
//! path relative to `--folderPath`, and the row's `url` and `formats` are rewritten
//! to point at the bucket. Per-file failures are logged; only setup failures exit
//! non-zero.

use anyhow::Context;
use clap::Parser;
use mediashift_cli::{init_tracing, Args};
use mediashift_core::PublicUrlBuilder;
use mediashift_db::FileRepository;
use mediashift_services::Migrator;
use mediashift_storage::create_storage;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Args::parse().into_config();
    config.validate().context("Invalid configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    let storage =
        create_storage(&config.storage).context("Failed to create object storage client")?;

    let repository = FileRepository::connect(&config.database)
        .await
        .context("Failed to open database")?;

    let urls = PublicUrlBuilder::new(&config.storage.endpoint, &config.storage.bucket);
    let migrator = Migrator::new(storage, Arc::new(repository), urls)
        .with_concurrency(config.concurrency);

    let report = migrator
        .run(&config.root)
        .await
        .with_context(|| format!("Failed to walk {}", config.root.display()))?;

    report.log_summary();
    Ok(())
}
