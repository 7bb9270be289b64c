pub mod key;
pub mod query_cache;

pub use key::QueryKey;
pub use query_cache::{FetchOutcome, QueryCache, QueryData, QueryState, RemoteData};
