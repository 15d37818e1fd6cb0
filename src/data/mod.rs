pub mod admin;
pub mod catalog;
pub mod geometry;
pub mod mapper;
pub mod mirror;
pub mod outline;
pub mod selection;
pub mod text;
