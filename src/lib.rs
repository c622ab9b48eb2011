pub use rowbind_core::*;
pub use rowbind_macros::Entity;
