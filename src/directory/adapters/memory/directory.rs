//! In-memory directory for tests and single-process embedding.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::{
    domain::{Team, TeamName, User, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult},
};

/// Thread-safe in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    users: HashMap<UserId, User>,
    teams: HashSet<TeamName>,
    // Member ids in registration order.
    memberships: HashMap<TeamName, Vec<UserId>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DirectoryRepositoryResult<RwLockReadGuard<'_, InMemoryDirectoryState>> {
        self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> DirectoryRepositoryResult<RwLockWriteGuard<'_, InMemoryDirectoryState>> {
        self.state.write().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryDirectoryState {
    fn members(&self, team: &TeamName) -> impl Iterator<Item = &User> {
        self.memberships
            .get(team)
            .into_iter()
            .flatten()
            .filter_map(|id| self.users.get(id))
    }

    fn detach(&mut self, user_id: &UserId, team: &TeamName) {
        if let Some(ids) = self.memberships.get_mut(team) {
            ids.retain(|id| id != user_id);
        }
    }

    fn attach(&mut self, user_id: &UserId, team: &TeamName) {
        let ids = self.memberships.entry(team.clone()).or_default();
        if !ids.contains(user_id) {
            ids.push(user_id.clone());
        }
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectory {
    async fn find_user(&self, id: &UserId) -> DirectoryRepositoryResult<Option<User>> {
        Ok(self.read()?.users.get(id).cloned())
    }

    async fn create_or_update_user(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        let previous_team = state.users.get(user.id()).map(|known| known.team().clone());
        if let Some(previous) = previous_team
            && previous != *user.team()
        {
            state.detach(user.id(), &previous);
        }
        state.attach(user.id(), user.team());
        state.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        let previous_team = state
            .users
            .get(user.id())
            .ok_or_else(|| DirectoryRepositoryError::UserNotFound(user.id().clone()))?
            .team()
            .clone();
        if previous_team != *user.team() {
            state.detach(user.id(), &previous_team);
            state.attach(user.id(), user.team());
        }
        state.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn users_by_team(&self, team: &TeamName) -> DirectoryRepositoryResult<Vec<User>> {
        let state = self.read()?;
        Ok(state.members(team).cloned().collect())
    }

    async fn active_users_by_team(&self, team: &TeamName) -> DirectoryRepositoryResult<Vec<User>> {
        let state = self.read()?;
        Ok(state
            .members(team)
            .filter(|user| user.is_active())
            .cloned()
            .collect())
    }

    async fn find_team(&self, name: &TeamName) -> DirectoryRepositoryResult<Option<Team>> {
        let state = self.read()?;
        if !state.teams.contains(name) {
            return Ok(None);
        }
        let members = state.members(name).cloned().collect();
        Ok(Some(Team::from_persisted(name.clone(), members)))
    }

    async fn team_exists(&self, name: &TeamName) -> DirectoryRepositoryResult<bool> {
        Ok(self.read()?.teams.contains(name))
    }

    async fn create_team(&self, team: &Team) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.teams.insert(team.name().clone()) {
            return Err(DirectoryRepositoryError::DuplicateTeam(team.name().clone()));
        }
        Ok(())
    }
}
