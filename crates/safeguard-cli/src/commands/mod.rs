//! Command implementations.

pub mod batch;
pub mod check;
pub mod profile;

pub use self::batch::{execute_batch, BatchEntry};
pub use self::check::execute_check;
pub use self::profile::execute_profile;

/// Overall result of a moderation command, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every submission was allowed
    Allowed,
    /// At least one submission was rejected
    Rejected,
    /// At least one submission could not be moderated
    Incomplete,
}

impl Outcome {
    /// Exit code: 0 allowed, 2 rejected, 1 error.
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Allowed => 0,
            Outcome::Rejected => 2,
            Outcome::Incomplete => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Allowed.exit_code(), 0);
        assert_eq!(Outcome::Rejected.exit_code(), 2);
        assert_eq!(Outcome::Incomplete.exit_code(), 1);
    }
}
