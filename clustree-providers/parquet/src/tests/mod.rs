pub(crate) use super::{ParquetClusterings, ParquetClusteringsError};

mod provider;
mod support;
