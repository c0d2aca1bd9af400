/// Default SQLite database location, relative to the working directory
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/recipes.db";

/// Default size of the connection pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

// =============================================================================
// Error Messages
// =============================================================================

/// A required field was not supplied (or was null)
pub const ERR_FIELD_REQUIRED: &str = "This field is required.";

/// A text field was supplied but is empty after trimming
pub const ERR_FIELD_BLANK: &str = "This field may not be blank.";

/// Top-level message for field validation failures
pub const ERR_VALIDATION_FAILED: &str = "Validation failed";

/// Recipe lookup by id failed
pub const ERR_RECIPE_NOT_FOUND: &str = "Recipe not found";
