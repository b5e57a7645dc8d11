mod aggregated;
mod level;
mod reading;
mod severity;

pub use aggregated::*;
pub use level::*;
pub use reading::*;
pub use severity::*;
