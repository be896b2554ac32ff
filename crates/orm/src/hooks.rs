//! Lifecycle hooks attached to a model definition
//!
//! Every hook has a no-op default, so an implementation only overrides the
//! points it cares about. Errors returned by a hook are propagated as
//! [`OrmError::Hook`](crate::error::OrmError::Hook) with the hook's own error
//! as the source.

use async_trait::async_trait;
use serde_json::Value;

use crate::document::Document;

/// Error type returned by hooks
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by hooks
pub type HookResult<T = ()> = Result<T, HookError>;

#[async_trait]
pub trait ModelHooks: Send + Sync {
    /// Runs once per instance construction, after the definition itself validated
    async fn on_create(&self, _document: &Document) -> HookResult {
        Ok(())
    }

    /// Runs before a write is validated; `Some(schema)` replaces the schema for this write only
    async fn before_validate(&self, _schema: &Value, _document: &Document) -> HookResult<Option<Value>> {
        Ok(None)
    }

    /// Runs after an insert payload validated
    async fn before_create(&self, _document: &mut Document) -> HookResult {
        Ok(())
    }

    /// Runs after an update payload validated
    async fn before_update(&self, _document: &mut Document) -> HookResult {
        Ok(())
    }

    /// Runs after `before_create`/`before_update`, right before the write is delegated
    async fn before_save(&self, _document: &mut Document) -> HookResult {
        Ok(())
    }
}

/// Hook set that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

#[async_trait]
impl ModelHooks for NoHooks {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_defaults_have_no_effect() {
        let hooks = NoHooks;
        let mut document = Document::new();
        document.insert("name".to_string(), json!("user"));

        assert!(hooks.on_create(&document).await.is_ok());
        assert!(hooks.before_validate(&json!({}), &document).await.unwrap().is_none());
        assert!(hooks.before_create(&mut document).await.is_ok());
        assert!(hooks.before_update(&mut document).await.is_ok());
        assert!(hooks.before_save(&mut document).await.is_ok());
        assert_eq!(document, json!({"name": "user"}).as_object().cloned().unwrap());
    }
}
