//! Shared helpers for the PostgreSQL-backed integration suites.
//!
//! Each test gets a throwaway database. When `VOTES_TEST_DATABASE_URL` names a
//! server, databases are created there with the `postgres` client, because
//! `DROP DATABASE` cannot run inside the transactions Diesel wraps around its
//! work. Otherwise they come from the embedded cluster shared by the test
//! binary. Provisioning failures panic unless `SKIP_TEST_CLUSTER` is set.

pub mod cluster_skip;

use std::time::Duration;

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

use cluster_skip::handle_cluster_setup_failure;

/// Environment variable naming an administrative connection URL.
pub const TEST_DATABASE_URL_ENV: &str = "VOTES_TEST_DATABASE_URL";

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Render a `postgres` error with SQLSTATE, detail, and hint when present.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}

/// Replace the database name in a PostgreSQL URL, keeping any query string.
fn with_database_name(url: &str, name: &str) -> String {
    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    };
    let authority_end = base.find("://").map_or(0, |idx| idx + 3);
    let prefix = match base[authority_end..].find('/') {
        Some(slash) => &base[..authority_end + slash],
        None => base,
    };
    match query {
        Some(query) => format!("{prefix}/{name}?{query}"),
        None => format!("{prefix}/{name}"),
    }
}

enum Backing {
    Server { admin_url: String, name: String },
    Embedded { _database: TemporaryDatabase },
}

/// A database created for one test and dropped when this value is dropped.
pub struct TestDatabase {
    url: String,
    backing: Backing,
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= SHARED_CLUSTER_RETRIES => {
                return Err(format!("start embedded cluster: {error:?}"));
            }
            Err(_) => {
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

impl TestDatabase {
    /// Provision a fresh, empty database.
    ///
    /// Returns `None` only when provisioning failed and `SKIP_TEST_CLUSTER`
    /// allows the test to be skipped.
    pub fn provision() -> Option<Self> {
        let provisioned = match std::env::var(TEST_DATABASE_URL_ENV) {
            Ok(admin_url) => Self::on_server(admin_url),
            Err(_) => Self::on_embedded_cluster(),
        };
        match provisioned {
            Ok(database) => Some(database),
            Err(reason) => handle_cluster_setup_failure(reason),
        }
    }

    fn on_server(admin_url: String) -> Result<Self, String> {
        let name = format!("votes_test_{}", Uuid::new_v4().simple());
        let mut client = Client::connect(&admin_url, NoTls)
            .map_err(|err| format!("connect to test server: {}", format_postgres_error(&err)))?;
        client
            .batch_execute(&format!("CREATE DATABASE \"{name}\""))
            .map_err(|err| format!("create database: {}", format_postgres_error(&err)))?;
        Ok(Self {
            url: with_database_name(&admin_url, &name),
            backing: Backing::Server { admin_url, name },
        })
    }

    fn on_embedded_cluster() -> Result<Self, String> {
        let database = shared_cluster()?
            .create_temporary_database()
            .map_err(|err| format!("create temporary database: {err:?}"))?;
        Ok(Self {
            url: database.url().to_owned(),
            backing: Backing::Embedded { _database: database },
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Synchronous client connected to this database, for assertions.
    pub fn client(&self) -> Client {
        Client::connect(&self.url, NoTls)
            .unwrap_or_else(|err| panic!("connect to test database: {}", format_postgres_error(&err)))
    }

    /// Run a `SELECT COUNT(*) ...` style query and return the count.
    pub fn count(&self, sql: &str) -> i64 {
        self.client()
            .query_one(sql, &[])
            .unwrap_or_else(|err| panic!("{sql}: {}", format_postgres_error(&err)))
            .get(0)
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let Backing::Server { admin_url, name } = &self.backing else {
            return;
        };
        let dropped = Client::connect(admin_url, NoTls).and_then(|mut client| {
            client.batch_execute(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        });
        if let Err(err) = dropped {
            eprintln!(
                "failed to drop test database {name}: {}",
                format_postgres_error(&err)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::with_database_name;
    use rstest::rstest;

    #[rstest]
    #[case("postgres://u:p@host:5432/postgres", "postgres://u:p@host:5432/t1")]
    #[case("postgres://host/postgres?sslmode=disable", "postgres://host/t1?sslmode=disable")]
    #[case("postgres://host", "postgres://host/t1")]
    fn database_name_is_replaced(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(with_database_name(url, "t1"), expected);
    }
}
