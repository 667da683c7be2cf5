//! Orchestration services for the team registry.

mod registry;

pub use registry::{
    AddMemberRequest, CreateTeamRequest, NewMemberFields, TeamRegistryError, TeamRegistryResult,
    TeamRegistryService,
};
