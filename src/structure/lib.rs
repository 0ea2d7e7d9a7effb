#[macro_use] extern crate failure;
#[macro_use] extern crate lazy_static;

mod element;
mod molecule;

//---------------------------
// public reexports; API

pub use crate::element::{Element, ElementParseError};
pub use crate::molecule::{Atom, Molecule};

pub use crate::element::consts as consts;
