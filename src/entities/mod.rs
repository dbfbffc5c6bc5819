//! Entity module - SeaORM entity definitions for the local database.

pub mod quote;

pub use quote::{Column as QuoteColumn, Entity as Quote, Model as QuoteModel};
