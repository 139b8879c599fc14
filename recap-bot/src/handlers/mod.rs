//! Chain handlers: request logging and the recap command handler.

mod logging;
mod recap_handler;

pub use logging::LoggingHandler;
pub use recap_handler::RecapHandler;
