pub mod jolpica;
pub mod pacer;

// Re-export commonly used types
pub use jolpica::{JolpicaClient, JolpicaConfig};
pub use pacer::RequestPacer;
