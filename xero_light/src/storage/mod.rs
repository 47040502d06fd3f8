mod data_store;

pub(crate) use data_store::{DB_TABLE_USERS, GENERIC_DATA_STORE};
