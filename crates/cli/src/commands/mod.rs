pub mod generate;
pub mod profiles;
pub mod subclasses;

pub use generate::*;
pub use profiles::*;
pub use subclasses::*;
