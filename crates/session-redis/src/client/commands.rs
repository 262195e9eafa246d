//! Command bodies shared by every client variant.
//!
//! Variants differ only in how they obtain a connection; once they have one,
//! each operation is a single round trip issued here.

use redis::aio::ConnectionLike;
use redis::AsyncCommands;
use session_core::{encode_key, StoreResult};

pub(crate) async fn set<C>(conn: &mut C, key: &str, value: &[u8]) -> StoreResult<()>
where
    C: ConnectionLike + Send,
{
    conn.set::<_, _, ()>(encode_key(key), value).await?;
    Ok(())
}

pub(crate) async fn pexpire<C>(conn: &mut C, key: &str, milliseconds: i64) -> StoreResult<()>
where
    C: ConnectionLike + Send,
{
    conn.pexpire::<_, ()>(encode_key(key), milliseconds).await?;
    Ok(())
}

pub(crate) async fn pexpireat<C>(conn: &mut C, key: &str, epoch_milliseconds: i64) -> StoreResult<()>
where
    C: ConnectionLike + Send,
{
    conn.pexpire_at::<_, ()>(encode_key(key), epoch_milliseconds)
        .await?;
    Ok(())
}

pub(crate) async fn pttl<C>(conn: &mut C, key: &str) -> StoreResult<i64>
where
    C: ConnectionLike + Send,
{
    Ok(conn.pttl(encode_key(key)).await?)
}

pub(crate) async fn get<C>(conn: &mut C, key: &str) -> StoreResult<Option<Vec<u8>>>
where
    C: ConnectionLike + Send,
{
    Ok(conn.get(encode_key(key)).await?)
}

pub(crate) async fn del<C>(conn: &mut C, key: &str) -> StoreResult<()>
where
    C: ConnectionLike + Send,
{
    conn.del::<_, ()>(encode_key(key)).await?;
    Ok(())
}

pub(crate) async fn exists<C>(conn: &mut C, key: &str) -> StoreResult<bool>
where
    C: ConnectionLike + Send,
{
    Ok(conn.exists(encode_key(key)).await?)
}
