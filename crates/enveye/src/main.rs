//! EnvEye - capture a diagnostic snapshot of an application folder and its host.

use clap::Parser;
use enveye_collector::collector::{Collector, CollectorConfig};
use enveye_collector::{naming, services, upload, writer};
use enveye_common::{Error, OsType};
use enveye_snapshot_schema::snapshot_warnings;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "enveye")]
#[command(
    author,
    version,
    about = "Capture a diagnostic snapshot of an application folder and its host"
)]
struct Cli {
    /// Path to the application folder
    #[arg(long)]
    app_folder: String,

    /// Application type, e.g. desktop or web
    #[arg(long)]
    app_type: String,

    /// Upload the snapshot to this URL after writing it
    #[arg(long, env = "ENVEYE_UPLOAD_URL")]
    upload_url: Option<String>,

    /// Comma-separated list of extra service names to check
    #[arg(long, default_value = "")]
    extra_services: String,

    /// Output file; relative paths are resolved next to the executable
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Label appended to the file name, e.g. good or faulty
    #[arg(long)]
    label: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let app_folder = required("--app-folder", &cli.app_folder)?;
    let app_type = required("--app-type", &cli.app_type)?;
    let base_dir = naming::executable_dir()?;

    let config = CollectorConfig {
        app_folder: PathBuf::from(app_folder),
        app_type: app_type.to_string(),
        extra_services: services::parse_extra_services(&cli.extra_services),
        os_type: OsType::current(),
    };

    let collector = Collector::new(config)?;
    let collection = collector.collect().await;

    let file_name = collection.file_name(cli.label.as_deref());
    let snapshot_path = naming::resolve_output_path(&base_dir, cli.output.as_deref(), &file_name);
    writer::write_snapshot(&collection.snapshot, &snapshot_path)?;
    println!("Snapshot written to {}", snapshot_path.display());

    for warning in snapshot_warnings(&collection.snapshot) {
        warn!("{}", warning);
    }

    if let Some(url) = cli.upload_url.as_deref().filter(|u| !u.trim().is_empty()) {
        info!("Uploading snapshot to {}", url);
        match upload::upload_snapshot(url, &snapshot_path, &collection.hostname, app_folder).await
        {
            Ok(()) => println!("Upload successful"),
            Err(e) => println!("Upload failed: {}", e),
        }
    }

    Ok(())
}

/// Reject blank values; anything else is passed through untouched.
fn required<'a>(flag: &str, value: &'a str) -> Result<&'a str, Error> {
    if value.trim().is_empty() {
        return Err(Error::MissingInput(flag.to_string()));
    }
    Ok(value)
}
