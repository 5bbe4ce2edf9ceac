// src/error.rs

use std::fmt;

/// Errors returned by the queue operations. None of them leave the queue
/// changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Enqueue was attempted while every slot is occupied.
    QueueFull,
    /// Dequeue was attempted while no slot is occupied.
    QueueEmpty,
    /// The id source has no ids left to hand out.
    IdsExhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::QueueFull => write!(f, "the queue is full"),
            Error::QueueEmpty => write!(f, "the queue is empty"),
            Error::IdsExhausted => write!(f, "no piece ids are left"),
        }
    }
}

impl std::error::Error for Error {}
