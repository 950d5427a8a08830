mod connect;
mod probe;
mod schema;

pub use connect::*;
pub use probe::*;
pub use schema::*;
