//! Redis-backed store, keys scoped by profile

use super::KeyValueStore;
use crate::error::{AnalystError, Result};
use redis::{Client, Commands, Connection};
use std::sync::Mutex;
use tracing::info;

pub struct RedisStore {
    connection: Mutex<Connection>,
    prefix: String,
}

impl RedisStore {
    pub fn connect(redis_url: &str, profile: &str) -> Result<Self> {
        let client = Client::open(redis_url)?;
        let connection = client.get_connection()?;
        info!(profile = %profile, "Redis store connected");
        Ok(Self {
            connection: Mutex::new(connection),
            prefix: format!("crypto-analyst:{}:", profile),
        })
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn with_connection<T>(
        &self,
        op: impl FnOnce(&mut Connection) -> redis::RedisResult<T>,
    ) -> Result<T> {
        let mut connection = self
            .connection
            .lock()
            .map_err(|_| AnalystError::Storage("redis connection lock poisoned".to_string()))?;
        Ok(op(&mut connection)?)
    }
}

impl KeyValueStore for RedisStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let key = self.scoped(key);
        self.with_connection(|con| con.get::<_, Option<String>>(&key))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let key = self.scoped(key);
        self.with_connection(|con| con.set::<_, _, ()>(&key, value))
    }

    fn delete(&self, key: &str) -> Result<()> {
        let key = self.scoped(key);
        self.with_connection(|con| con.del::<_, ()>(&key))
    }
}
