//! The fixed set of catalog collections.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A catalog collection and its resource path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    All,
    Baits,
    Buckets,
    Creatures,
    Decorations,
    Events,
    Items,
    Locations,
    Npcs,
    Seasons,
    Skills,
    SkillsData,
    Tanks,
    Tools,
}

impl Resource {
    /// Every collection, in path order.
    pub const ALL: [Resource; 14] = [
        Resource::All,
        Resource::Baits,
        Resource::Buckets,
        Resource::Creatures,
        Resource::Decorations,
        Resource::Events,
        Resource::Items,
        Resource::Locations,
        Resource::Npcs,
        Resource::Seasons,
        Resource::Skills,
        Resource::SkillsData,
        Resource::Tanks,
        Resource::Tools,
    ];

    /// Path appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::All => "/all",
            Resource::Baits => "/baits",
            Resource::Buckets => "/buckets",
            Resource::Creatures => "/creatures",
            Resource::Decorations => "/decorations",
            Resource::Events => "/events",
            Resource::Items => "/items",
            Resource::Locations => "/locations",
            Resource::Npcs => "/npcs",
            Resource::Seasons => "/seasons",
            Resource::Skills => "/skills",
            Resource::SkillsData => "/skillsdata",
            Resource::Tanks => "/tanks",
            Resource::Tools => "/tools",
        }
    }

    /// Collection name, i.e. the path without its leading slash.
    pub fn name(self) -> &'static str {
        &self.path()[1..]
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('/').to_ascii_lowercase();
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == wanted)
            .ok_or_else(|| Error::Config(format!("unknown catalog collection '{}'", s)))
    }
}
