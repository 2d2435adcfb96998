//! Ledger repository: one async fn per SQL statement
//!
//! Every operation is generic over [`sqlx::PgExecutor`] so the same statement
//! runs either against the pool (autocommit) or against `&mut *tx` inside a
//! coordinator-managed transaction. No business logic lives here.

use sqlx::{PgExecutor, Row, postgres::PgRow};

use super::error::StoreError;
use crate::models::{Account, Currency, Entry, Transfer};

/// Create an account with a zero starting balance.
pub async fn create_account<'e, E>(
    executor: E,
    owner: &str,
    currency: Currency,
) -> Result<Account, StoreError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query(
        r#"INSERT INTO accounts (owner, balance, currency)
           VALUES ($1, 0, $2)
           RETURNING id, owner, balance, currency, created_at"#,
    )
    .bind(owner)
    .bind(currency.as_str())
    .fetch_one(executor)
    .await?;

    row_to_account(&row)
}

/// Get an account by id. `NotFound` when absent.
pub async fn get_account<'e, E>(executor: E, id: i64) -> Result<Account, StoreError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query(
        r#"SELECT id, owner, balance, currency, created_at
           FROM accounts WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or(StoreError::NotFound)?;

    row_to_account(&row)
}

/// List accounts ordered by id.
pub async fn list_accounts<'e, E>(
    executor: E,
    limit: i64,
    offset: i64,
) -> Result<Vec<Account>, StoreError>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query(
        r#"SELECT id, owner, balance, currency, created_at
           FROM accounts ORDER BY id LIMIT $1 OFFSET $2"#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await?;

    rows.iter().map(row_to_account).collect()
}

/// Atomically apply `delta` to an account balance and return the updated row.
///
/// This is the only mutation path for `accounts.balance`. The increment is a
/// single statement; the read-modify-write happens inside the database, so
/// concurrent callers cannot lose updates. Under a transaction the statement
/// also takes the row lock that the transfer ordering rule relies on.
pub async fn add_account_balance<'e, E>(
    executor: E,
    id: i64,
    delta: i64,
) -> Result<Account, StoreError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query(
        r#"UPDATE accounts
           SET balance = balance + $1
           WHERE id = $2
           RETURNING id, owner, balance, currency, created_at"#,
    )
    .bind(delta)
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or(StoreError::NotFound)?;

    row_to_account(&row)
}

/// Record one signed ledger line against an account.
pub async fn create_entry<'e, E>(
    executor: E,
    account_id: i64,
    amount: i64,
) -> Result<Entry, StoreError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query(
        r#"INSERT INTO entries (account_id, amount)
           VALUES ($1, $2)
           RETURNING id, account_id, amount, created_at"#,
    )
    .bind(account_id)
    .bind(amount)
    .fetch_one(executor)
    .await?;

    Ok(row_to_entry(&row))
}

/// Get an entry by id. `NotFound` when absent.
pub async fn get_entry<'e, E>(executor: E, id: i64) -> Result<Entry, StoreError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query(
        r#"SELECT id, account_id, amount, created_at
           FROM entries WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or(StoreError::NotFound)?;

    Ok(row_to_entry(&row))
}

/// List entries for one account, newest id last.
pub async fn list_entries<'e, E>(
    executor: E,
    account_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<Entry>, StoreError>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query(
        r#"SELECT id, account_id, amount, created_at
           FROM entries WHERE account_id = $1
           ORDER BY id LIMIT $2 OFFSET $3"#,
    )
    .bind(account_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await?;

    Ok(rows.iter().map(row_to_entry).collect())
}

/// Record the transfer row pairing the two entries of one money movement.
pub async fn create_transfer<'e, E>(
    executor: E,
    from_account_id: i64,
    to_account_id: i64,
    amount: i64,
) -> Result<Transfer, StoreError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query(
        r#"INSERT INTO transfers (from_account_id, to_account_id, amount)
           VALUES ($1, $2, $3)
           RETURNING id, from_account_id, to_account_id, amount, created_at"#,
    )
    .bind(from_account_id)
    .bind(to_account_id)
    .bind(amount)
    .fetch_one(executor)
    .await?;

    Ok(row_to_transfer(&row))
}

/// Get a transfer by id. `NotFound` when absent.
pub async fn get_transfer<'e, E>(executor: E, id: i64) -> Result<Transfer, StoreError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query(
        r#"SELECT id, from_account_id, to_account_id, amount, created_at
           FROM transfers WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or(StoreError::NotFound)?;

    Ok(row_to_transfer(&row))
}

/// List transfers touching one account (either side), ordered by id.
pub async fn list_transfers<'e, E>(
    executor: E,
    account_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<Transfer>, StoreError>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query(
        r#"SELECT id, from_account_id, to_account_id, amount, created_at
           FROM transfers
           WHERE from_account_id = $1 OR to_account_id = $1
           ORDER BY id LIMIT $2 OFFSET $3"#,
    )
    .bind(account_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await?;

    Ok(rows.iter().map(row_to_transfer).collect())
}

fn row_to_account(row: &PgRow) -> Result<Account, StoreError> {
    let currency_str: String = row.get("currency");
    let currency = Currency::parse(&currency_str).ok_or_else(|| {
        StoreError::ConstraintViolation(format!("unknown currency in store: {}", currency_str))
    })?;

    Ok(Account {
        id: row.get("id"),
        owner: row.get("owner"),
        balance: row.get("balance"),
        currency,
        created_at: row.get("created_at"),
    })
}

fn row_to_entry(row: &PgRow) -> Entry {
    Entry {
        id: row.get("id"),
        account_id: row.get("account_id"),
        amount: row.get("amount"),
        created_at: row.get("created_at"),
    }
}

fn row_to_transfer(row: &PgRow) -> Transfer {
    Transfer {
        id: row.get("id"),
        from_account_id: row.get("from_account_id"),
        to_account_id: row.get("to_account_id"),
        amount: row.get("amount"),
        created_at: row.get("created_at"),
    }
}
