use crate::error::CapacityError;

pub type CapacityResult<T> = Result<T, CapacityError>;
