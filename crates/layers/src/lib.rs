pub mod fill;
pub mod symbology;

pub use fill::*;
pub use symbology::*;
