//! Client-facing API: the resolver and the handle it produces

mod handle;
mod mapper;
mod resolver;

pub use handle::ClientHandle;
pub use mapper::Mapper;
pub use resolver::{ConnectionResolver, ResolverConfig, TOOLS_HOME_ENV};
