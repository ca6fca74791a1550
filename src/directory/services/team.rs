//! Service layer for team creation and lookup.

use super::{DirectoryServiceError, DirectoryServiceResult};
use crate::{
    config::ReviewPolicy,
    directory::{
        domain::{Team, TeamName, User, UserId},
        ports::{DirectoryRepository, DirectoryRepositoryError},
    },
    error::DomainError,
};
use std::sync::Arc;
use tracing::{error, info};

/// Member entry of an [`AddTeamRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMemberRequest {
    user_id: String,
    username: String,
    team_name: Option<String>,
    is_active: bool,
}

impl TeamMemberRequest {
    /// Creates a member that inherits the request's team name.
    #[must_use]
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, is_active: bool) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            team_name: None,
            is_active,
        }
    }

    /// Sets an explicit team name, which must match the team being created.
    #[must_use]
    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }
}

/// Request payload for creating a team with its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTeamRequest {
    team_name: String,
    members: Vec<TeamMemberRequest>,
}

impl AddTeamRequest {
    /// Creates a request for `team_name` with no members.
    #[must_use]
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            members: Vec::new(),
        }
    }

    /// Appends a member.
    #[must_use]
    pub fn with_member(mut self, member: TeamMemberRequest) -> Self {
        self.members.push(member);
        self
    }

    /// Replaces the member list.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = TeamMemberRequest>) -> Self {
        self.members = members.into_iter().collect();
        self
    }
}

/// Team creation and lookup service.
#[derive(Clone)]
pub struct TeamService<D>
where
    D: DirectoryRepository,
{
    directory: Arc<D>,
    policy: ReviewPolicy,
}

impl<D> TeamService<D>
where
    D: DirectoryRepository,
{
    /// Creates a new team service.
    #[must_use]
    pub const fn new(directory: Arc<D>, policy: ReviewPolicy) -> Self {
        Self { directory, policy }
    }

    /// Creates a team and registers (or re-homes) each of its members.
    ///
    /// # Errors
    ///
    /// Returns [`super::DirectoryServiceError::Domain`] when validation fails
    /// or the team already exists, and
    /// [`super::DirectoryServiceError::Repository`] when persistence fails.
    pub async fn add_team(&self, request: AddTeamRequest) -> DirectoryServiceResult<Team> {
        let AddTeamRequest { team_name, members } = request;
        let name = TeamName::new(team_name)?;
        let users = members
            .into_iter()
            .map(|member| member_to_user(member, &name))
            .collect::<Result<Vec<_>, _>>()?;
        let team = Team::new(name, users, self.policy.max_team_members)?;

        let exists = self
            .directory
            .team_exists(team.name())
            .await
            .inspect_err(|err| error!(team = %team.name(), error = %err, "team lookup failed"))?;
        if exists {
            return Err(DomainError::TeamExists(team.name().clone()).into());
        }

        self.directory
            .create_team(&team)
            .await
            .map_err(|err| match err {
                DirectoryRepositoryError::DuplicateTeam(taken) => {
                    DirectoryServiceError::from(DomainError::TeamExists(taken))
                }
                other => {
                    error!(team = %team.name(), error = %other, "team insert failed");
                    other.into()
                }
            })?;
        for member in team.members() {
            self.directory
                .create_or_update_user(member)
                .await
                .inspect_err(|err| {
                    error!(user = %member.id(), error = %err, "member upsert failed");
                })?;
        }

        info!(team = %team.name(), members = team.members().len(), "team created");
        Ok(team)
    }

    /// Returns a team with its members.
    ///
    /// # Errors
    ///
    /// Returns [`super::DirectoryServiceError::Domain`] when the name is
    /// invalid or the team does not exist, and
    /// [`super::DirectoryServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn get_team(&self, team_name: &str) -> DirectoryServiceResult<Team> {
        let name = TeamName::new(team_name)?;
        let team = self
            .directory
            .find_team(&name)
            .await
            .inspect_err(|err| error!(team = %name, error = %err, "team lookup failed"))?;
        team.ok_or_else(|| DomainError::TeamNotFound(name).into())
    }
}

fn member_to_user(member: TeamMemberRequest, team: &TeamName) -> Result<User, DomainError> {
    let TeamMemberRequest {
        user_id,
        username,
        team_name,
        is_active,
    } = member;
    let id = UserId::new(user_id)?;
    let member_team = match team_name {
        Some(declared) => TeamName::new(declared)?,
        None => team.clone(),
    };
    User::new(id, username, member_team, is_active)
}
