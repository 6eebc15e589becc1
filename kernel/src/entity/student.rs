use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Opaque key of a student managed outside this service.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct StudentId(i32);

impl StudentId {
    pub fn new(id: impl Into<i32>) -> Self {
        Self(id.into())
    }
}
