pub mod analytics;
pub mod diagnostics;
pub mod export;
pub mod health;

pub use analytics::*;
pub use diagnostics::*;
pub use export::*;
pub use health::*;
