use std::process::ExitCode;

/// Process exit status of a propname run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every requested name was reported.
    Success,
    /// `--strict` run with unresolved names, or `init` over an existing config.
    Failure,
    /// Config errors, missing paths and other internal failures.
    Error,
}

impl ExitStatus {
    /// Status of a `names` run.
    pub fn for_names(strict: bool, unresolved: usize) -> Self {
        if strict && unresolved > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
