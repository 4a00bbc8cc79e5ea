pub mod form;
pub mod identity;
pub mod navigation;
pub mod order;
pub mod product;
pub mod records;

pub use form::*;
pub use identity::*;
pub use navigation::*;
pub use order::*;
pub use product::*;
pub use records::*;
