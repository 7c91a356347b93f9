//! Typed clients for the admin API collections.

mod databases;
mod regions;

pub use databases::{
    CaseDetails, DatabaseCreate, DatabaseDetail, Databases, DatabaseSummary, DatabaseUpdate,
    DbStatus, NamedRef, ReconfigureRequest, Ref, Workload, DATABASES_URL,
};
pub use regions::{Regions, REGIONS_URL};
