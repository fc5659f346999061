use crate::model::error::store_errors::StoreError;

#[derive(PartialEq, Debug)]
pub enum SearchFileError {
    DbError,
}

impl From<StoreError> for SearchFileError {
    fn from(_: StoreError) -> Self {
        Self::DbError
    }
}
