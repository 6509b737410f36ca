//! Implements the stores with a MongoDB deployment.

mod category;

pub use category::MongoCategoryStore;
