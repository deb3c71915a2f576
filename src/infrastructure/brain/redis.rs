use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::traits::Brain;

/// Brain shared through a Redis server. Keys are stored under a `hackbot:` namespace.
pub struct RedisBrain {
    connection: ConnectionManager,
}

impl RedisBrain {
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).context("Invalid redis URL")?;
        let connection = ConnectionManager::new(client)
            .await
            .context("Failed to connect to redis")?;
        Ok(Self { connection })
    }

    fn key(key: &str) -> String {
        format!("hackbot:{key}")
    }
}

#[async_trait]
impl Brain for RedisBrain {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut connection = self.connection.clone();
        Ok(connection.get(Self::key(key)).await?)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut connection = self.connection.clone();
        connection.set::<_, _, ()>(Self::key(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut connection = self.connection.clone();
        connection.del::<_, ()>(Self::key(key)).await?;
        Ok(())
    }
}
