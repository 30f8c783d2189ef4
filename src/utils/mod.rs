pub mod database;
pub mod error;
pub mod geocoder;
pub mod pagination;
pub mod query;
pub mod storage;
pub mod validation;
