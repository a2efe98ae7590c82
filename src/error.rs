use thiserror::Error;

use crate::chain::{Direction, SegmentId};

/// Top-level error type for spherewalk.
#[derive(Debug, Error)]
pub enum SpherewalkError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Errors raised while building arc geometry.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("invalid arc frame: {0}")]
    InvalidFrame(String),
}

/// Errors raised while walking a segment chain.
#[derive(Debug, Error, PartialEq)]
pub enum ChainError {
    #[error("chain exhausted moving {direction:?} from segment {segment:?} with {remaining} left")]
    ChainExhausted {
        segment: SegmentId,
        direction: Direction,
        remaining: f32,
    },

    #[error("segment not found in chain")]
    SegmentNotFound,

    #[error("travel parameter is not finite: {0}")]
    NonFiniteParameter(f32),

    #[error("cannot build a chain from zero frames")]
    EmptyChain,
}

/// Convenience type alias for results using [`SpherewalkError`].
pub type Result<T> = std::result::Result<T, SpherewalkError>;
