//! Scoped connection reuse. Each store operation takes a connection out of the
//! pool and the guard puts it back when it drops, whichever way the operation
//! exits. Only `max_idle` connections are retained; any surplus is closed.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use anyhow::Result;
use log::debug;
use rusqlite::Connection;

use super::connection::open_connection;

pub struct ConnectionPool {
    path: PathBuf,
    busy_timeout: Duration,
    max_idle: usize,
    idle: Mutex<Vec<Connection>>,
}

impl ConnectionPool {
    pub fn new(path: impl Into<PathBuf>, busy_timeout: Duration, max_idle: usize) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
            max_idle,
            idle: Mutex::new(Vec::with_capacity(max_idle)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hand out an idle connection, or open a fresh one when none is parked.
    pub fn acquire(&self) -> Result<PooledConnection<'_>> {
        let reused = self.lock_idle().pop();
        let conn = match reused {
            Some(conn) => conn,
            None => open_connection(&self.path, self.busy_timeout)?,
        };
        Ok(PooledConnection {
            conn: Some(conn),
            pool: self,
        })
    }

    /// Number of connections currently parked in the pool.
    pub fn idle_count(&self) -> usize {
        self.lock_idle().len()
    }

    fn release(&self, conn: Connection) {
        let mut idle = self.lock_idle();
        if idle.len() < self.max_idle {
            idle.push(conn);
        } else {
            debug!("closing surplus connection to {}", self.path.display());
        }
    }

    fn lock_idle(&self) -> std::sync::MutexGuard<'_, Vec<Connection>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Connection borrowed from a [`ConnectionPool`]; returned to it on drop.
pub struct PooledConnection<'a> {
    conn: Option<Connection>,
    pool: &'a ConnectionPool,
}

impl Deref for PooledConnection<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.conn
            .as_ref()
            .expect("connection is only taken out on drop")
    }
}

impl Drop for PooledConnection<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.release(conn);
        }
    }
}
