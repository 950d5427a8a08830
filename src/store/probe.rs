use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Error as E;

/// Status queries shared by the feed and the importer.
#[async_trait::async_trait]
pub trait Probe: Send + Sync {
    /// Round-trip a trivial query as proof of connectivity.
    async fn ping(&self) -> Result<i32, E>;
    /// Row count of the given table, zero when absent or unreadable.
    async fn rows(&self, qualified: &str) -> usize;
}

#[async_trait::async_trait]
impl Probe for Client {
    async fn ping(&self) -> Result<i32, E> {
        Ok(self.query_one("SELECT 1", &[]).await?.get::<_, i32>(0))
    }
    async fn rows(&self, qualified: &str) -> usize {
        let sql = format!("SELECT COUNT(*) FROM {t}", t = qualified);
        self.query_opt(&sql, &[])
            .await
            .ok()
            .flatten()
            .map(|r| r.get::<_, i64>(0) as usize)
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl Probe for Arc<Client> {
    async fn ping(&self) -> Result<i32, E> {
        self.as_ref().ping().await
    }
    async fn rows(&self, qualified: &str) -> usize {
        self.as_ref().rows(qualified).await
    }
}
