use crate::error::Result;

/// Structural checks for values built from user input.
pub trait Validate {
    fn validate(&self) -> Result<()>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
