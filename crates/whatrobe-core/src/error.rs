//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhatrobeError {
    #[error("LABEL/unknown {kind} '{value}'")]
    UnknownLabel { kind: &'static str, value: String },

    #[error("ITEM/duplicate id '{0}'")]
    DuplicateItem(String),

    #[error("ITEM/not found '{0}'")]
    ItemNotFound(String),
}
