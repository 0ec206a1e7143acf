pub mod product;
pub mod cart;
pub mod sale;
pub mod report;

pub use product::*;
pub use cart::*;
pub use sale::*;
pub use report::*;
