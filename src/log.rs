mod collection;
mod store;

pub use collection::{Log, LogError, Update};
pub use store::LogStore;
