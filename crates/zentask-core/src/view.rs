use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::list::ListId;

pub const TASKS_ID: &str = "tasks";
pub const MY_DAY_ID: &str = "my-day";
pub const IMPORTANT_ID: &str = "important";
pub const PLANNED_ID: &str = "planned";

/// Storage grouping key of a task: the default `tasks` bucket or a user list.
///
/// Pseudo-view ids are not representable here, so a task can never be
/// stored under `my-day`, `important` or `planned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Bucket {
    Tasks,
    List(ListId),
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tasks => f.write_str(TASKS_ID),
            Self::List(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for Bucket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TASKS_ID => Ok(Self::Tasks),
            MY_DAY_ID | IMPORTANT_ID | PLANNED_ID => {
                Err(anyhow!("pseudo-view `{s}` cannot be used as a task bucket"))
            }
            other => Uuid::parse_str(other)
                .map(Self::List)
                .map_err(|_| anyhow!("invalid bucket id: {other}")),
        }
    }
}

impl TryFrom<String> for Bucket {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Bucket> for String {
    fn from(value: Bucket) -> Self {
        value.to_string()
    }
}

/// Identifier of what the user is looking at: a pseudo-view or a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ViewId {
    #[default]
    MyDay,
    Important,
    Planned,
    Tasks,
    List(ListId),
}

impl ViewId {
    /// Bucket a task created from this view is stored in.
    pub fn bucket(self) -> Bucket {
        match self {
            Self::List(id) => Bucket::List(id),
            Self::MyDay | Self::Important | Self::Planned | Self::Tasks => Bucket::Tasks,
        }
    }

    pub fn is_pseudo(self) -> bool {
        matches!(self, Self::MyDay | Self::Important | Self::Planned)
    }
}

impl From<Bucket> for ViewId {
    fn from(value: Bucket) -> Self {
        match value {
            Bucket::Tasks => Self::Tasks,
            Bucket::List(id) => Self::List(id),
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MyDay => f.write_str(MY_DAY_ID),
            Self::Important => f.write_str(IMPORTANT_ID),
            Self::Planned => f.write_str(PLANNED_ID),
            Self::Tasks => f.write_str(TASKS_ID),
            Self::List(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for ViewId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            MY_DAY_ID => Ok(Self::MyDay),
            IMPORTANT_ID => Ok(Self::Important),
            PLANNED_ID => Ok(Self::Planned),
            other => other.parse::<Bucket>().map(Self::from),
        }
    }
}

impl TryFrom<String> for ViewId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ViewId> for String {
    fn from(value: ViewId) -> Self {
        value.to_string()
    }
}
