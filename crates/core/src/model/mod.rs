pub mod session;
pub mod settings;
pub mod value_group;

pub use session::Session;
pub use settings::{ValidationError, ViewportConfig};
pub use value_group::{ClampContext, ValueGroup, ValuePair};
