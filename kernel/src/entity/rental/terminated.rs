use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct IsTerminated(bool);

impl IsTerminated {
    pub fn new(value: impl Into<bool>) -> Self {
        Self(value.into())
    }
}
