pub mod config;
pub mod error;
pub mod invoker;
pub mod tweaks;

pub use config::FlowConfig;
pub use error::InvokeError;
pub use invoker::{FlowInvoker, FlowPayload};
pub use tweaks::Tweaks;
