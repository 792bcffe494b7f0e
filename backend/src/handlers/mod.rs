pub mod home;
pub mod personalities;

pub use home::*;
pub use personalities::*;
