mod build_chain;

pub use build_chain::{ArcFrame, BuildChain};
