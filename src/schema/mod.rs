//! SCIM 2.0 schema knowledge: attribute definitions for `User`/`Group`/the enterprise
//! extension, consulted by the Attribute Projector and the `/Schemas` discovery endpoint.

pub mod definitions;

pub use definitions::*;
