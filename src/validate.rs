use thiserror::Error;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Error, Debug)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

pub fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError(message));
    }

    Ok(())
}

pub fn min_len(value: &str, min: usize, message: &'static str) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError(message));
    }

    Ok(())
}
