use std::future::Future;
use whiskers_sources::FetchError;

#[derive(Debug, Clone)]
pub struct ContentBank<T> {
    label: &'static str,
    records: Vec<T>,
}

impl<T> ContentBank<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            records: Vec::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub async fn load<F>(&mut self, fetch: F) -> usize
    where
        F: Future<Output = Result<Vec<T>, FetchError>>,
    {
        match fetch.await {
            Ok(records) => {
                self.replace(records);
                tracing::info!(bank = self.label, count = self.records.len(), "bank loaded");
            }
            Err(e) => {
                self.records.clear();
                tracing::warn!(bank = self.label, error = %e, "preload failed, bank left empty");
            }
        }
        self.records.len()
    }

    pub fn replace(&mut self, records: Vec<T>) {
        self.records = records;
    }

    pub fn take(&mut self) -> Option<T> {
        self.records.pop()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
