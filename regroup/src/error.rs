use custom_error::custom_error;

custom_error! { pub Error
    Infeasible{count: usize} = "Cannot split {count} participants into groups of 3 or 4",
    EmptyGroupNames          = "Group name list is empty",
    DuplicateGroupName{label: String} = "Group label '{label}' would name more than one group",
    InvalidAttempts          = "Search budget must allow at least one attempt",
    InvalidWorkers           = "Parallel search needs at least one worker",
    InvariantViolation{detail: String} = "Invalid partition: {detail}",
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors caused by caller-supplied settings rather than by the roster.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::EmptyGroupNames
                | Error::DuplicateGroupName { .. }
                | Error::InvalidAttempts
                | Error::InvalidWorkers
        )
    }
}
