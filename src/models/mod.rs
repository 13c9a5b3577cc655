mod blog;
mod category;
mod contact;
mod gallery;
mod product;
mod subcategory;

pub use blog::*;
pub use category::*;
pub use contact::*;
pub use gallery::*;
pub use product::*;
pub use subcategory::*;
