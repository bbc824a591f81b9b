//! Review Store: per-host "last known good" baselines.
//!
//! A [`ReviewStore`] is an explicitly opened handle on one Reviews file.
//! Reads verify the referenced baseline artifact against the fingerprint
//! recorded at update time. Updates hold an exclusive lock on the sidecar
//! `<reviews>.lock` file, so handles in other threads and processes see each
//! other's writes, and replace the Reviews file atomically.

use crate::artifacts::{decode_walk, WalkFile};
use crate::atomic::atomic_write;
use crate::errors::{decode_error, io_error, persistence_error, Result};
use fsreview_core::codec::CodecKind;
use fsreview_core::errors::{ExError, ExErrorKind, FsReviewError};
use fsreview_core::model::{Fingerprint, Review, Reviews};
use fsreview_core::{log_op_end, log_op_error, log_op_start};
use fd_lock::RwLock;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

/// Handle on a Reviews file
#[derive(Debug)]
pub struct ReviewStore {
    path: PathBuf,
    codec: CodecKind,
    /// In-process fast path; the lock file serializes across handles
    write_lock: Mutex<()>,
}

impl ReviewStore {
    /// Open a store on `path`. The file itself may not exist yet.
    ///
    /// # Errors
    ///
    /// `ConfigError` if the extension maps to no codec.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let codec = CodecKind::for_path(&path)?;
        Ok(Self {
            path,
            codec,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar file locked around every update
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Read the whole Reviews mapping; a missing file is an empty mapping.
    ///
    /// # Errors
    ///
    /// `Io` or `Decode` if the file exists but cannot be read or parsed.
    pub fn read_reviews(&self) -> Result<Reviews> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Reviews::default()),
            Err(e) => return Err(io_error("read_reviews", &self.path, e)),
        };
        self.codec
            .decode(&bytes)
            .map_err(|e| decode_error("read_reviews", &self.path, e))
    }

    /// Verified Review for `hostname`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no Review exists for the host
    /// - `Tamper` if the referenced artifact is gone or its bytes no longer
    ///   match the recorded fingerprint
    pub fn read_last_good(&self, hostname: &str) -> Result<Review> {
        Ok(self.verified_baseline(hostname)?.0)
    }

    /// Verified Review for `hostname` plus the baseline Walk it references.
    ///
    /// # Errors
    ///
    /// As [`read_last_good`](Self::read_last_good), plus `Tamper` if the
    /// artifact holds a different Walk than the Review names and `Decode` if
    /// it no longer parses.
    pub fn read_last_good_walk(&self, hostname: &str) -> Result<(Review, WalkFile)> {
        let start = Instant::now();
        log_op_start!("read_last_good_walk", hostname = hostname);

        let result = self.load_baseline(hostname);

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok((review, _)) => log_op_end!(
                "read_last_good_walk",
                duration_ms = duration_ms,
                walk_id = review.walk_id.as_str()
            ),
            Err(e) => log_op_error!("read_last_good_walk", e.clone(), duration_ms = duration_ms),
        }
        result
    }

    fn load_baseline(&self, hostname: &str) -> Result<(Review, WalkFile)> {
        let (review, bytes) = self.verified_baseline(hostname)?;
        let reference = PathBuf::from(&review.walk_reference);
        let walk_file = decode_walk(&reference, &bytes)?;
        if walk_file.walk.id != review.walk_id {
            return Err(FsReviewError::WalkIdMismatch {
                reference: review.walk_reference.clone(),
                expected: review.walk_id.clone(),
                actual: walk_file.walk.id.clone(),
            }
            .into());
        }
        Ok((review, walk_file))
    }

    /// Look up the Review and check its artifact; returns the artifact bytes
    fn verified_baseline(&self, hostname: &str) -> Result<(Review, Vec<u8>)> {
        let reviews = self.read_reviews()?;
        let review = reviews
            .get(hostname)
            .cloned()
            .ok_or_else(|| -> ExError {
                FsReviewError::ReviewNotFound {
                    hostname: hostname.to_string(),
                }
                .into()
            })?;

        let bytes = match fs::read(&review.walk_reference) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FsReviewError::BaselineArtifactMissing {
                    hostname: hostname.to_string(),
                    reference: review.walk_reference.clone(),
                }
                .into());
            }
            Err(e) => {
                return Err(io_error(
                    "verify_baseline",
                    Path::new(&review.walk_reference),
                    e,
                ))
            }
        };

        if !review.fingerprint.matches_bytes(&bytes) {
            let actual = Fingerprint::of_bytes(review.fingerprint.method, &bytes);
            return Err(FsReviewError::FingerprintMismatch {
                hostname: hostname.to_string(),
                reference: review.walk_reference.clone(),
                method: review.fingerprint.method.to_string(),
                expected: review.fingerprint.value.clone(),
                actual: actual.value,
            }
            .into());
        }

        Ok((review, bytes))
    }

    /// Make `after` the last known good baseline for `hostname`.
    ///
    /// Only call after explicit confirmation. The artifact is re-read and
    /// fingerprinted; if its bytes changed since `after` was loaded the update
    /// is refused. The Reviews file is re-read while the lock file is held
    /// exclusively and replaced atomically, so an error leaves it unchanged.
    ///
    /// # Errors
    ///
    /// - `Tamper` if the artifact changed since it was compared
    /// - `Io` / `Decode` if the artifact or the Reviews file cannot be read
    /// - `Persistence` if the lock file cannot be locked or the new Reviews
    ///   file cannot be written
    pub fn update_baseline(&self, hostname: &str, after: &WalkFile) -> Result<Review> {
        let start = Instant::now();
        log_op_start!(
            "update_baseline",
            hostname = hostname,
            walk_id = after.walk.id.as_str()
        );

        let result = self.write_baseline(hostname, after);

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => log_op_end!("update_baseline", duration_ms = duration_ms),
            Err(e) => log_op_error!("update_baseline", e.clone(), duration_ms = duration_ms),
        }
        result
    }

    fn write_baseline(&self, hostname: &str, after: &WalkFile) -> Result<Review> {
        let bytes = fs::read(&after.path).map_err(|e| io_error("update_baseline", &after.path, e))?;
        let fingerprint = Fingerprint::sha256(&bytes);
        if fingerprint != after.fingerprint {
            return Err(ExError::new(ExErrorKind::Tamper)
                .with_op("update_baseline")
                .with_hostname(hostname)
                .with_path(after.locator())
                .with_message(format!(
                    "artifact changed after it was compared: expected {} {}, found {}",
                    after.fingerprint.method, after.fingerprint.value, fingerprint.value
                )));
        }

        let review = Review {
            walk_id: after.walk.id.clone(),
            walk_reference: after.locator(),
            fingerprint,
        };

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| self.lock_error(&lock_path, e))?;
        let mut file_lock = RwLock::new(lock_file);
        let _file_guard = file_lock
            .write()
            .map_err(|e| self.lock_error(&lock_path, e))?;
        tracing::trace!(lock = %lock_path.display(), "reviews lock held");

        let mut reviews = self.read_reviews()?;
        reviews.upsert(hostname, review.clone());
        let encoded = self
            .codec
            .encode(&reviews)
            .map_err(|e| persistence_error("update_baseline", &self.path, e))?;
        atomic_write(&self.path, &encoded)
            .map_err(|e| persistence_error("update_baseline", &self.path, e))?;

        Ok(review)
    }

    fn lock_error(&self, lock_path: &Path, err: std::io::Error) -> ExError {
        persistence_error(
            "update_baseline",
            &self.path,
            io_error("lock_reviews", lock_path, err),
        )
    }
}
