//! Domains module containing business logic organized by bounded contexts.
//!
//! The gateway has a single domain, tools: everything a transport needs to
//! list and call tools without knowing how they are implemented.

pub mod tools;
