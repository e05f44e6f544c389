pub mod errors;
pub mod retry;
pub mod shutdown;

pub use errors::{AppError, AppResult, ErrorKind, CONNECTIVITY_MESSAGE};
pub use retry::{retry_linear, RetryConfig};
pub use shutdown::ShutdownSignal;
