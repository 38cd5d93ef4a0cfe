//! Controller for one admin page: the last listed records, the table over
//! them, and the add/edit/view modal and delete confirmation.

use std::sync::Arc;

use uuid::Uuid;

use crate::store::{ListQuery, Record, Store, StoreError};
use crate::table::{DataTable, TableActions, TableView};

#[derive(Debug, Clone, PartialEq)]
pub enum Modal<T> {
    Closed,
    Add,
    Edit(T),
    View(T),
}

pub struct RecordPage<T: Record> {
    store: Arc<dyn Store<T>>,
    query: ListQuery,
    records: Vec<T>,
    notice: Option<String>,
    modal: Modal<T>,
    modal_error: Option<String>,
    pending_delete: Option<T>,
    pub table: DataTable,
}

impl<T: Record> RecordPage<T> {
    /// A page listing newest submissions first.
    pub fn new(store: Arc<dyn Store<T>>) -> Self {
        Self::with_query(store, ListQuery::newest_first::<T>())
    }

    pub fn with_query(store: Arc<dyn Store<T>>, query: ListQuery) -> Self {
        RecordPage {
            store,
            query,
            records: Vec::new(),
            notice: None,
            modal: Modal::Closed,
            modal_error: None,
            pending_delete: None,
            table: DataTable::default(),
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Non-fatal message from the last failed read or delete.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn modal(&self) -> &Modal<T> {
        &self.modal
    }

    /// Message from the last failed save; the modal stays open with it.
    pub fn modal_error(&self) -> Option<&str> {
        self.modal_error.as_deref()
    }

    pub fn pending_delete(&self) -> Option<&T> {
        self.pending_delete.as_ref()
    }

    pub fn view(&self) -> TableView<'_, T> {
        self.table.view(&self.records)
    }

    /// Re-list from the store. On failure the page shows no records and a notice.
    pub async fn refresh(&mut self) {
        match self.store.list(&self.query).await {
            Ok(rows) => {
                self.records = rows;
                self.notice = None;
            }
            Err(e) => {
                log::warn!("Listing {} failed: {e}", T::TABLE);
                self.records.clear();
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Create or update according to the open modal, then re-list.
    /// Does nothing unless the modal is in add or edit mode.
    pub async fn save(&mut self, fields: &T::Fields) -> Result<(), StoreError> {
        let result = match &self.modal {
            Modal::Add => self.store.create(fields).await.map(|_| ()),
            Modal::Edit(record) => self.store.update(record.id(), fields).await,
            Modal::Closed | Modal::View(_) => return Ok(()),
        };

        match result {
            Ok(()) => {
                self.modal = Modal::Closed;
                self.modal_error = None;
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.modal_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.modal_error = None;
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the record awaiting confirmation, then re-list.
    pub async fn confirm_delete(&mut self) -> Result<(), StoreError> {
        let Some(record) = self.pending_delete.take() else {
            return Ok(());
        };
        let id: Uuid = record.id();
        if let Err(e) = self.store.delete(id).await {
            log::warn!("Deleting {} {id} failed: {e}", T::TABLE);
            self.notice = Some(e.to_string());
            return Err(e);
        }
        self.refresh().await;
        Ok(())
    }
}

impl<T: Record> TableActions<T> for RecordPage<T> {
    fn on_add(&mut self) {
        self.modal = Modal::Add;
        self.modal_error = None;
    }

    fn on_view(&mut self, record: &T) {
        self.modal = Modal::View(record.clone());
        self.modal_error = None;
    }

    fn on_edit(&mut self, record: &T) {
        self.modal = Modal::Edit(record.clone());
        self.modal_error = None;
    }

    fn on_delete(&mut self, record: &T) {
        self.pending_delete = Some(record.clone());
    }
}
