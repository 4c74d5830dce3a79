//! Orchestrates a single upload run: load the archive, sniff its type,
//! build the destination key, and issue the one PUT.

use tracing::{error, info};

use crate::archive::{self, ArchiveError};
use crate::config::UploadRequest;
use crate::object::{self, ObjectDestination};
use crate::progress::Spinner;
use crate::store::ObjectStore;

/// Terminal result of a run. Built once, consumed by the reporting step;
/// `succeeded == false` must map to a non-zero process exit.
#[derive(Debug)]
pub struct UploadOutcome {
    pub succeeded: bool,
    pub error_detail: Option<String>,
    pub bucket: String,
    pub key: String,
}

impl UploadOutcome {
    fn success(destination: ObjectDestination) -> Self {
        UploadOutcome {
            succeeded: true,
            error_detail: None,
            bucket: destination.bucket,
            key: destination.key,
        }
    }

    fn failure(destination: ObjectDestination, detail: String) -> Self {
        UploadOutcome {
            succeeded: false,
            error_detail: Some(detail),
            bucket: destination.bucket,
            key: destination.key,
        }
    }
}

/// Runs the upload sequence against the given store. Failures before the
/// network call surface as `Err`; a service failure on the PUT itself is
/// a completed run with a failed outcome.
pub async fn run<S>(request: &UploadRequest, store: &S) -> Result<UploadOutcome, ArchiveError>
where
    S: ObjectStore + ?Sized,
{
    let payload = match archive::load(&request.archive_file) {
        Ok(payload) => payload,
        Err(err) => {
            error!(error = %err, "could not load archive file");
            return Err(err);
        }
    };
    info!(file = %payload.base_name, bytes = payload.length, "archive loaded");

    let content_type = object::detect_content_type(&payload.content);
    let destination = ObjectDestination {
        bucket: request.bucket.clone(),
        key: object::object_key(&request.prefix, &payload.base_name),
    };
    info!(
        bucket = %destination.bucket,
        key = %destination.key,
        content_type,
        "uploading archive"
    );

    let content_length = payload.length as i64;
    let spinner = Spinner::start("Uploading archive ...");
    let result = store
        .put_object(
            destination.clone(),
            payload.content,
            content_length,
            content_type.to_string(),
        )
        .await;
    spinner.stop();

    match result {
        Ok(()) => {
            info!(bucket = %destination.bucket, key = %destination.key, "upload complete");
            Ok(UploadOutcome::success(destination))
        }
        Err(err) => {
            error!(
                error = %err,
                bucket = %destination.bucket,
                key = %destination.key,
                "upload failed"
            );
            Ok(UploadOutcome::failure(destination, err.to_string()))
        }
    }
}
