//! Holds small value types shared across the entity model: typed identifiers and point values.

use std::fmt;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Declares a `u32`-backed identifier newtype.
///
/// Identifiers are allocated as one greater than the largest existing identifier in the owning
/// collection, starting at 1 for an empty collection.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            Hash,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name {
            id: u32,
        }

        impl $name {
            pub const fn new(id: u32) -> Self {
                Self { id }
            }

            pub fn as_u32(self) -> u32 {
                self.id
            }

            /// The identifier that follows every one of `existing`.
            pub fn next_after(existing: impl IntoIterator<Item = Self>) -> Self {
                let max = existing.into_iter().map(Self::as_u32).max().unwrap_or(0);
                Self::new(max + 1)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                self.id.fmt(f)
            }
        }
    };
}

pub(crate) use entity_id;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Points {
    points: f64,
}

impl Points {
    pub fn new(points: f64) -> Result<Self> {
        if !points.is_finite() {
            bail!("attempted to construct points with non-finite value `{points}`");
        }
        if points < 0.0 {
            bail!("attempted to construct points with negative value `{points}`");
        }
        Ok(Self { points })
    }

    pub fn as_f64(self) -> f64 {
        self.points
    }
}

impl TryFrom<f64> for Points {
    type Error = anyhow::Error;

    fn try_from(points: f64) -> Result<Self> {
        Self::new(points)
    }
}

impl From<Points> for f64 {
    fn from(points: Points) -> Self {
        points.points
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.points.fmt(f)
    }
}
