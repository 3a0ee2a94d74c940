use crate::error::PaginatorError;

pub type PaginatorResult<T> = Result<T, PaginatorError>;
