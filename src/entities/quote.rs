//! Quote entity - Quotes added by hand with `/addquote`.
//!
//! Captured chat quotes live in the NerdHub backend; this table only holds the
//! locally curated collection served by `/randomquote`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored quote database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Quote text as entered
    pub text: String,
    /// Discord user ID of whoever added it
    pub added_by: String,
    /// When the quote was added
    pub created_at: DateTimeUtc,
}

/// Quotes have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
