pub mod query;
pub use query::{DateRange, FilterValue, Operator, Predicate};
pub mod datastore;
pub use datastore::{DataAccessError, Datastore};
pub mod pg_store;
pub use pg_store::PgStore;
