pub(crate) mod databases;
pub(crate) mod echo;
pub(crate) mod regions;
pub(crate) mod session;
