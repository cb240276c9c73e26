//! Swift toolchain adapter.

use std::process::{Command, Stdio};

use swiftgodot_core::{
    application::{
        ApplicationError,
        ports::{BuildRequest, BuildRunner},
    },
    error::ForgeResult,
};
use tracing::{debug, instrument};

/// Runs `swift build` as a child process.
///
/// Compiler output is inherited so the user sees it as it happens.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwiftBuildRunner {
    quiet: bool,
}

impl SwiftBuildRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the compiler's standard output.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl BuildRunner for SwiftBuildRunner {
    #[instrument(skip_all, fields(program = %request.program))]
    fn build(&self, request: &BuildRequest) -> ForgeResult<()> {
        let args = request.args();
        debug!(?args, "spawning build");

        let stdout = if self.quiet {
            Stdio::null()
        } else {
            Stdio::inherit()
        };
        let status = Command::new(&request.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ApplicationError::BuildToolUnavailable {
                program: request.program.clone(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ApplicationError::BuildFailed {
                status: status.to_string(),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use swiftgodot_core::error::{ErrorCategory, ForgeError};

    fn request(program: &str) -> BuildRequest {
        BuildRequest {
            program: program.into(),
            package_path: PathBuf::from("."),
            configuration: "debug".into(),
        }
    }

    #[test]
    fn missing_program_is_reported() {
        let err = SwiftBuildRunner::new()
            .build(&request("swiftgodot-no-such-program"))
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::BuildToolUnavailable { .. })
        ));
        assert_eq!(err.category(), ErrorCategory::External);
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_decides_success() {
        let runner = SwiftBuildRunner::new().quiet(true);
        assert!(runner.build(&request("true")).is_ok());
        assert!(matches!(
            runner.build(&request("false")),
            Err(ForgeError::Application(ApplicationError::BuildFailed { .. }))
        ));
    }
}
