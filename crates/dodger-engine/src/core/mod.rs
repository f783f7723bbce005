pub use self::{rect::*, settings::*};

pub(crate) mod rect;
pub(crate) mod settings;
