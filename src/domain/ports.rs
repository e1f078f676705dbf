use crate::domain::model::Customer;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Lookup side of the pricing request: returns fully joined customer snapshots.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>>;
}
