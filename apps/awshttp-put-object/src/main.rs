//! awshttp-put-object - upload a local file to Amazon S3.
//!
//! Signs a `PutObject` request with AWS Signature Version 4 and sends it to
//! the regional S3 endpoint, or to `S3_ENDPOINT_URL` when set.
//!
//! # Usage
//!
//! ```text
//! S3_BUCKET=examplebucket awshttp-put-object [--dry-run] [--storage-class CLASS] \
//!     [--content-type TYPE] <key> <file>
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AWS_ACCESS_KEY_ID` / `ACCESS_KEY` | *(required)* | Access key id |
//! | `AWS_SECRET_ACCESS_KEY` / `SECRET_KEY` | *(required)* | Secret access key |
//! | `AWS_REGION` / `DEFAULT_REGION` | `us-east-1` | Signing region |
//! | `S3_BUCKET` | *(required)* | Target bucket |
//! | `S3_ENDPOINT_URL` | *(unset)* | Endpoint override, e.g. `http://localhost:4566` |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod transport;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use awshttp_auth::{Credentials, Signer};
use awshttp_core::AwsHttpConfig;
use awshttp_s3::{PutObjectRequest, StorageClass};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Upload a local file to Amazon S3 with a SigV4-signed PutObject request
#[derive(Debug, Parser)]
#[command(about, version)]
struct Args {
    /// Object key to create
    key: String,

    /// Path of the file to upload
    file: PathBuf,

    /// Print the signed request instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Storage class, e.g. STANDARD or REDUCED_REDUNDANCY
    #[arg(long, value_parser = StorageClass::from_str)]
    storage_class: Option<StorageClass>,

    /// Content-Type of the object
    #[arg(long)]
    content_type: Option<String>,
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AwsHttpConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;

    let bucket = config.require_bucket()?;
    let credentials = Credentials::from_env().context("failed to load credentials")?;
    let signer = Signer::new("s3", config.default_region.as_str())?;

    let body = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut put = PutObjectRequest::new(bucket, args.key.as_str(), body);
    if let Some(storage_class) = args.storage_class {
        put = put.with_storage_class(storage_class);
    }
    if let Some(content_type) = &args.content_type {
        put = put.with_content_type(content_type.as_str());
    }

    let request = put.build_signed(&signer, &credentials, config.endpoint_url.as_deref())?;

    if args.dry_run {
        println!("{} {}", request.method(), request.uri());
        for (name, value) in request.headers() {
            println!("{name}: {}", value.to_str().unwrap_or("<binary>"));
        }
        return Ok(());
    }

    info!(
        bucket = %bucket,
        key = %args.key,
        region = %config.default_region,
        "Uploading object"
    );
    let client = reqwest::Client::new();
    let body = transport::send(&client, request).await?;
    if !body.is_empty() {
        println!("{body}");
    }
    info!(key = %args.key, "Upload complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("awshttp-put-object").chain(list.iter().copied()))
    }

    #[test]
    fn test_should_parse_positional_arguments() {
        let parsed = args(&["photos/cat.jpg", "./cat.jpg"]).unwrap();
        assert_eq!(parsed.key, "photos/cat.jpg");
        assert_eq!(parsed.file, PathBuf::from("./cat.jpg"));
        assert!(!parsed.dry_run);
        assert_eq!(parsed.storage_class, None);
        assert_eq!(parsed.content_type, None);
    }

    #[test]
    fn test_should_parse_flags_in_any_position() {
        let parsed = args(&[
            "--storage-class",
            "REDUCED_REDUNDANCY",
            "k",
            "--dry-run",
            "f",
            "--content-type",
            "text/plain",
        ])
        .unwrap();
        assert!(parsed.dry_run);
        assert_eq!(parsed.storage_class, Some(StorageClass::ReducedRedundancy));
        assert_eq!(parsed.content_type.as_deref(), Some("text/plain"));
        assert_eq!(parsed.key, "k");
        assert_eq!(parsed.file, PathBuf::from("f"));
    }

    #[test]
    fn test_should_reject_wrong_positional_count() {
        assert!(args(&["only-key"]).is_err());
        assert!(args(&["a", "b", "c"]).is_err());
    }

    #[test]
    fn test_should_reject_unknown_flag_and_storage_class() {
        assert!(args(&["--verbose", "k", "f"]).is_err());
        assert!(args(&["--storage-class", "FAST", "k", "f"]).is_err());
        assert!(args(&["k", "f", "--storage-class"]).is_err());
    }

    #[test]
    fn test_should_pass_clap_self_check() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
