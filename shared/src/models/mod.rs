pub mod personality;
pub mod response;

pub use personality::*;
pub use response::*;
