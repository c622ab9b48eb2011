mod as_value;
mod bind;
mod decode_type;
mod destination;
mod entity;
mod error;
mod executor;
mod mapper;
mod resolve;
mod scan;
mod tuple;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use bind::*;
pub use decode_type::*;
pub use destination::*;
pub use entity::*;
pub use error::*;
pub use executor::*;
pub use mapper::*;
pub use resolve::*;
pub use scan::*;
pub use tuple::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
