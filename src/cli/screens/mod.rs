pub(crate) mod accounts;
pub(crate) mod assistant;
pub(crate) mod boot;
pub(crate) mod console;
pub(crate) mod dashboard;
pub(crate) mod login;
