pub mod article;
pub mod entity;
pub mod marker;
pub mod statement;
pub mod token;

#[cfg(test)]
pub(crate) mod fixtures;

pub use article::*;
pub use entity::*;
pub use marker::*;
pub use statement::*;
pub use token::*;
