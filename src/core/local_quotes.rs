//! Local quote store - Handles quotes added by hand.
//!
//! Provides creation, counting and random retrieval over the `quotes` table.

use crate::{
    entities::{Quote, quote},
    errors::{Error, Result},
};
use rand::Rng;
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, prelude::*};

/// Longest quote accepted by `/addquote`.
pub const MAX_QUOTE_LEN: usize = 2000;

/// Stores a new quote after trimming and validating it.
///
/// # Errors
/// Returns an error if the text is empty, too long, or the insert fails.
pub async fn add_quote(
    db: &DatabaseConnection,
    text: &str,
    added_by: String,
) -> Result<quote::Model> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidInput {
            message: "Quote text cannot be empty".to_string(),
        });
    }
    if text.chars().count() > MAX_QUOTE_LEN {
        return Err(Error::InvalidInput {
            message: format!("Quote text cannot exceed {MAX_QUOTE_LEN} characters"),
        });
    }

    let quote = quote::ActiveModel {
        text: Set(text.to_string()),
        added_by: Set(added_by),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    quote.insert(db).await.map_err(Into::into)
}

/// Number of stored quotes.
pub async fn count_quotes(db: &DatabaseConnection) -> Result<u64> {
    Quote::find().count(db).await.map_err(Into::into)
}

/// Picks a stored quote uniformly at random, or `None` if the table is empty.
pub async fn random_quote(db: &DatabaseConnection) -> Result<Option<quote::Model>> {
    let total = count_quotes(db).await?;
    if total == 0 {
        return Ok(None);
    }

    let offset = rand::rng().random_range(0..total);
    Quote::find()
        .order_by_asc(quote::Column::Id)
        .offset(offset)
        .limit(1)
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_add_and_fetch_quote() -> Result<()> {
        let db = setup_test_db().await?;

        let stored = add_quote(&db, "  Praise the sun  ", "42".to_string()).await?;
        assert_eq!(stored.text, "Praise the sun");
        assert_eq!(stored.added_by, "42");
        assert_eq!(count_quotes(&db).await?, 1);

        let picked = random_quote(&db).await?.unwrap();
        assert_eq!(picked.id, stored.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_random_quote_on_empty_store() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(random_quote(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_random_quote_returns_a_stored_quote() -> Result<()> {
        let db = setup_test_db().await?;
        for text in ["one", "two", "three"] {
            add_quote(&db, text, "1".to_string()).await?;
        }
        for _ in 0..10 {
            let picked = random_quote(&db).await?.unwrap();
            assert!(["one", "two", "three"].contains(&picked.text.as_str()));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_add_quote_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let empty = add_quote(&db, "   ", "1".to_string()).await;
        assert!(matches!(empty, Err(Error::InvalidInput { .. })));

        let too_long = add_quote(&db, &"a".repeat(MAX_QUOTE_LEN + 1), "1".to_string()).await;
        assert!(matches!(too_long, Err(Error::InvalidInput { .. })));

        assert_eq!(count_quotes(&db).await?, 0);
        Ok(())
    }
}
