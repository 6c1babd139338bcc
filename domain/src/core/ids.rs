//! Strongly typed identifiers.
//!
//! Numeric ids serialize as plain JSON numbers so snapshots stay compatible
//! with hand-edited files.

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn value(&self) -> u64 {
                self.0
            }

            /// The id following this one
            pub fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .trim_start_matches('#')
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| format!("Invalid {}: {}", stringify!($name), s))
            }
        }
    };
}

numeric_id!(
    /// Identifier of an agenda event
    EventId
);
numeric_id!(
    /// Identifier of an agenda topic
    TopicId
);
numeric_id!(
    /// Identifier of a delegate record
    DelegateId
);
numeric_id!(
    /// Identifier of a submitted motion in the queue (strictly increasing)
    QueueId
);

/// Country code of a delegation (e.g. "USA", "RUS")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DelegateCode(String);

impl DelegateCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DelegateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DelegateCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DelegateCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for DelegateCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DelegateCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
