pub mod check_in;
pub mod product;
pub mod profile;
pub mod recommendation;
