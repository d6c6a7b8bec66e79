use soroban_sdk::contracttype;

/// Error categories for classifying contract failures.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Initialisation ordering: calling before or twice
    Lifecycle = 1,
    /// Caller lacks the role or active status the operation requires
    Authorization = 2,
    /// Lookup of a delegate or doctor that does not exist
    NotFound = 3,
    /// Creating a record that already exists
    StateConflict = 4,
    /// Malformed arguments
    Validation = 5,
    /// Configured storage bounds reached
    Resource = 6,
}

/// Error severity levels indicating the impact of a failure.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Caller mistake, nothing to investigate
    Low = 1,
    /// Worth surfacing to operators
    Medium = 2,
    /// Misconfigured or misused deployment
    High = 3,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    AlreadyExists = 4,
    NotFound = 5,
    InvalidRange = 6,
    OwnerCannotBeDelegate = 7,
    WindowLimitReached = 8,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::NotFound => ErrorCategory::NotFound,
            ContractError::AlreadyExists => ErrorCategory::StateConflict,
            ContractError::InvalidRange | ContractError::OwnerCannotBeDelegate => {
                ErrorCategory::Validation
            }
            ContractError::WindowLimitReached => ErrorCategory::Resource,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::AlreadyExists
            | ContractError::NotFound
            | ContractError::InvalidRange
            | ContractError::OwnerCannotBeDelegate => ErrorSeverity::Low,
            ContractError::Unauthorized | ContractError::WindowLimitReached => {
                ErrorSeverity::Medium
            }
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorSeverity::High
            }
        }
    }

    /// Every failure is a caller or logic error; nothing here is transient.
    pub fn retryable(&self) -> bool {
        false
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::AlreadyExists => "Principal is already registered in this role",
            ContractError::NotFound => "Principal is not registered in this role",
            ContractError::InvalidRange => "Window end must be zero or greater than start",
            ContractError::OwnerCannotBeDelegate => "The owner cannot be registered as a delegate",
            ContractError::WindowLimitReached => "Doctor already holds the maximum number of windows",
        }
    }
}
