//! Directory tree access: discovery walk and path distance.

pub mod path;
pub mod walker;
