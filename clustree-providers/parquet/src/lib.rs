//! Parquet provider reading integer label columns as clusterings.
//!
//! Each selected column becomes one layer, in the order the columns are
//! requested.

mod errors;
mod ingest;
mod provider;

pub use errors::ParquetClusteringsError;
pub use provider::ParquetClusterings;

#[cfg(test)]
mod tests;
