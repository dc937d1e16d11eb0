//! Generative model port definition.

use crate::domain::InvocationError;

/// Port for sending a prompt to the generative model.
///
/// Implementations own timeout and transport policy. A call either returns
/// the model's raw reply text or an [`InvocationError`]; the pipeline never
/// retries.
pub trait ModelInvoker {
    /// Send `prompt` and return the raw reply text.
    fn invoke(&self, prompt: &str) -> Result<String, InvocationError>;
}
