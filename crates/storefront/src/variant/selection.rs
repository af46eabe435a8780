//! Observable selection model.
//!
//! One `SelectionModel` is constructed per page session and owns the
//! selection for that product. Components that need the current selection
//! subscribe to a `tokio::sync::watch` channel instead of relying on any
//! ambient rendering context. Updates are validated against the catalog, so
//! a stored value is always one of its option's permitted values.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use crate::catalog::CatalogSnapshot;

use super::{resolve, Resolution, Selection};

/// Errors from selection updates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The option name does not exist on this catalog.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// The value is not permitted for the option.
    #[error("{value:?} is not a permitted value for option {option:?}")]
    UnknownValue { option: String, value: String },
}

/// Observable, catalog-validated selection state for one page session.
#[derive(Debug)]
pub struct SelectionModel {
    catalog: Arc<CatalogSnapshot>,
    tx: watch::Sender<Selection>,
}

impl SelectionModel {
    /// Create an empty selection model for a catalog.
    #[must_use]
    pub fn new(catalog: Arc<CatalogSnapshot>) -> Self {
        let (tx, _) = watch::channel(Selection::new());
        Self { catalog, tx }
    }

    /// The catalog this model validates against.
    #[must_use]
    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    /// Choose a value for one option.
    ///
    /// Values chosen for other options are untouched; selections persist
    /// independently per option.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] if the option is unknown or the value is
    /// not permitted for it.
    pub fn select(&self, option: &str, value: &str) -> Result<(), SelectionError> {
        let axis = self
            .catalog
            .option(option)
            .ok_or_else(|| SelectionError::UnknownOption(option.to_owned()))?;

        if !axis.permits(value) {
            return Err(SelectionError::UnknownValue {
                option: option.to_owned(),
                value: value.to_owned(),
            });
        }

        self.tx.send_modify(|selection| {
            selection.insert(option.to_owned(), value.to_owned());
        });
        Ok(())
    }

    /// Unset one option's value. No-op if it was not set.
    pub fn clear(&self, option: &str) {
        self.tx.send_if_modified(|selection| selection.remove(option).is_some());
    }

    /// Replace the selection wholesale, dropping entries the catalog does
    /// not permit. Used when restoring persisted session state.
    pub fn restore(&self, candidate: Selection) {
        let valid: Selection = candidate
            .into_iter()
            .filter(|(option, value)| {
                self.catalog
                    .option(option)
                    .is_some_and(|axis| axis.permits(value))
            })
            .collect();

        self.tx.send_modify(|selection| *selection = valid);
    }

    /// Snapshot of the current selection.
    #[must_use]
    pub fn current(&self) -> Selection {
        self.tx.borrow().clone()
    }

    /// Subscribe to selection changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.tx.subscribe()
    }

    /// Resolve the current selection against the catalog.
    #[must_use]
    pub fn resolution(&self) -> Resolution<'_> {
        let current = self.current();
        resolve(&current, &self.catalog)
    }
}
