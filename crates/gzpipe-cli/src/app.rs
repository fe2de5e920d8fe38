//! Request dispatch and exit status policy.

use crate::config::CliConfig;
use gzpipe::{Mode, TranscodeError, TranscodeResult, TranscodeStats, Transcoder};
use std::process::ExitCode;
use tracing::{debug, info};

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Exit code 0
    Success,
    /// Exit code 1
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => Self::SUCCESS,
            Status::Failure => Self::FAILURE,
        }
    }
}

/// Validate the configuration and run the transcode it describes.
pub fn execute(config: &CliConfig) -> TranscodeResult<TranscodeStats> {
    let request = config.request()?;
    let transcoder = Transcoder::new(config.options())?;
    transcoder.transcode(&request)
}

/// Exit status for the outcome of [`execute`].
///
/// Bad arguments always fail. A failed transcode only fails the process when
/// `strict` is set; otherwise the error is reported and the exit is clean.
pub fn status_for(result: &TranscodeResult<TranscodeStats>, strict: bool) -> Status {
    match result {
        Ok(_) => Status::Success,
        Err(err) if err.is_config_error() => Status::Failure,
        Err(_) if strict => Status::Failure,
        Err(_) => Status::Success,
    }
}

/// Run the configured request, printing the summary or the error.
pub fn run(config: &CliConfig) -> ExitCode {
    let result = execute(config);

    match &result {
        Ok(stats) => {
            info!(
                "{} {} -> {}: {stats}",
                stats.mode,
                config.input.display(),
                config.output.display()
            );
            if stats.mode == Mode::Compress {
                println!("{stats}");
            }
        }
        Err(err) => report(err),
    }

    status_for(&result, config.strict).into()
}

fn report(err: &TranscodeError) {
    debug!("transcode failed: {err:?}");
    eprintln!("{err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn open_failure() -> TranscodeError {
        TranscodeError::Open {
            role: gzpipe::StreamRole::Input,
            path: PathBuf::from("missing"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        }
    }

    #[test]
    fn test_transcode_failure_keeps_clean_exit_by_default() {
        assert_eq!(status_for(&Err(open_failure()), false), Status::Success);
        assert_eq!(status_for(&Err(open_failure()), true), Status::Failure);
    }

    #[test]
    fn test_argument_errors_always_fail() {
        let err = TranscodeError::UnknownMode("x".to_string());
        assert_eq!(status_for(&Err(err), false), Status::Failure);
        assert_eq!(
            status_for(&Err(TranscodeError::InvalidLevel(12)), false),
            Status::Failure
        );
    }

    #[test]
    fn test_execute_rejects_bad_options_before_opening_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("missing");
        let output = dir.path().join("out.gz");
        let args: Vec<OsString> = vec![
            "gzpipe".into(),
            "--chunk-size".into(),
            "0".into(),
            "c".into(),
            input.into(),
            output.clone().into(),
        ];
        let config = CliConfig::try_parse_from(args).unwrap();

        let err = execute(&config).unwrap_err();
        assert!(matches!(err, TranscodeError::InvalidChunkSize { size: 0, .. }));
        assert!(!output.exists());
    }
}
