//! Inference gateway: loads one pre-trained classification artifact and
//! classifies submitted news documents against it.

mod error;
pub use error::{GatewayError, Result};

#[cfg(feature = "onnx")]
mod classifier;
#[cfg(feature = "onnx")]
pub use classifier::NewsClassifier;
