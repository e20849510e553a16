use std::fmt;
use std::process::ExitStatus;

/// How the child terminated, reduced to what the parent needs to mirror it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    Code(i32),
    Signal(i32),
}

impl ChildExit {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ChildExit::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(sig) = status.signal() {
                return ChildExit::Signal(sig);
            }
        }
        ChildExit::Code(-1)
    }

    /// Exit code for the parent: the child's own code, or 128+N for signal N.
    pub fn exit_code(self) -> i32 {
        match self {
            ChildExit::Code(code) => code,
            ChildExit::Signal(sig) => 128 + sig,
        }
    }

    pub fn success(self) -> bool {
        matches!(self, ChildExit::Code(0))
    }
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        ChildExit::from_status(status)
    }
}

impl fmt::Display for ChildExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildExit::Code(code) => write!(f, "exit code {code}"),
            ChildExit::Signal(sig) => write!(f, "signal {sig}"),
        }
    }
}
