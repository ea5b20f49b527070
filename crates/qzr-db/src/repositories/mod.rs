// All repository functions are generic over `E: Executor<'e, Database = Sqlite>`
// so they accept both a `&SqlitePool` (direct query) and a `&mut Transaction` (atomic operations).

pub mod kv;
