use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{EventRepository, TeamRepository, UserRepository};
use crate::domain::types::{
    DEFAULT_TEAM_MAX_MEMBERS, Team, TeamMember, TeamRole, TeamStatus,
};
use crate::error::FestivalServiceError;
use crate::usecase::code::{generate_invite_code, generate_team_id};
use crate::usecase::event::find_event;

/// Resolve a team by its human-readable id first, uuid second.
pub(crate) async fn find_team<T: TeamRepository>(
    teams: &T,
    key: &str,
) -> Result<Team, FestivalServiceError> {
    if let Some(team) = teams.find_by_team_id(key).await? {
        return Ok(team);
    }
    if let Ok(id) = key.parse::<Uuid>() {
        if let Some(team) = teams.find_by_id(id).await? {
            return Ok(team);
        }
    }
    Err(FestivalServiceError::TeamNotFound)
}

// ── CreateTeam ───────────────────────────────────────────────────────────────

pub struct CreateTeamInput {
    /// Event slug or uuid.
    pub event_id: String,
    pub team_name: String,
}

pub struct CreateTeamUseCase<T: TeamRepository, U: UserRepository, E: EventRepository> {
    pub teams: T,
    pub users: U,
    pub events: E,
}

impl<T: TeamRepository, U: UserRepository, E: EventRepository> CreateTeamUseCase<T, U, E> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateTeamInput,
    ) -> Result<Team, FestivalServiceError> {
        // 1. Name and event must hold up before anything is written
        let team_name = input.team_name.trim();
        if team_name.is_empty() {
            return Err(FestivalServiceError::MissingField("team_name"));
        }
        let event = find_event(&self.events, &input.event_id).await?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(FestivalServiceError::UserNotFound)?;

        // 2. The creator is the leader and always members[0]
        let now = Utc::now();
        let leader = TeamMember {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: TeamRole::Leader,
            joined_at: now,
        };
        let max_members = if event.is_team_event && event.max_team_members > 0 {
            event.max_team_members
        } else {
            DEFAULT_TEAM_MAX_MEMBERS
        };
        let team = Team {
            id: Uuid::new_v4(),
            team_id: generate_team_id(),
            event_id: event.id,
            event_name: event.event_name.clone(),
            team_name: team_name.to_owned(),
            leader_id: user.id,
            leader_email: user.email.clone(),
            leader_name: user.name.clone(),
            members: vec![leader],
            max_members,
            current_members: 1,
            invite_code: generate_invite_code(),
            status: TeamStatus::for_count(1, max_members),
            created_at: now,
            updated_at: now,
        };

        // 3. Team row first, then the denormalized copies
        self.teams.create(&team).await?;
        self.users.add_team(user.id, team.id).await?;
        self.events.adjust_current_teams(event.id, 1).await?;

        Ok(team)
    }
}

// ── JoinTeam ─────────────────────────────────────────────────────────────────

pub struct JoinTeamUseCase<T: TeamRepository, U: UserRepository> {
    pub teams: T,
    pub users: U,
}

impl<T: TeamRepository, U: UserRepository> JoinTeamUseCase<T, U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        invite_code: &str,
    ) -> Result<Team, FestivalServiceError> {
        // 1. Invite codes are stored uppercase; accept any casing
        let code = invite_code.trim().to_uppercase();
        let team = self
            .teams
            .find_by_invite_code(&code)
            .await?
            .ok_or(FestivalServiceError::InvalidInviteCode)?;

        // 2. Reject in order: full, locked, already on the team
        if team.current_members >= team.max_members {
            return Err(FestivalServiceError::TeamFull);
        }
        if team.status == TeamStatus::Locked {
            return Err(FestivalServiceError::TeamLocked);
        }
        if team.is_member(user_id) {
            return Err(FestivalServiceError::AlreadyInTeam);
        }

        // 3. Append and let the count decide open vs full
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(FestivalServiceError::UserNotFound)?;
        let mut members = team.members.clone();
        members.push(TeamMember {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: TeamRole::Member,
            joined_at: Utc::now(),
        });
        let status = TeamStatus::for_count(members.len() as i32, team.max_members);
        if !self.teams.update_members(team.id, &members, status).await? {
            return Err(FestivalServiceError::TeamNotFound);
        }
        self.users.add_team(user.id, team.id).await?;

        self.teams
            .find_by_id(team.id)
            .await?
            .ok_or(FestivalServiceError::TeamNotFound)
    }
}

// ── LeaveTeam ────────────────────────────────────────────────────────────────

pub struct LeaveTeamUseCase<T: TeamRepository, U: UserRepository> {
    pub teams: T,
    pub users: U,
}

impl<T: TeamRepository, U: UserRepository> LeaveTeamUseCase<T, U> {
    pub async fn execute(&self, user_id: Uuid, key: &str) -> Result<(), FestivalServiceError> {
        let team = find_team(&self.teams, key).await?;

        // The leader deletes the team instead of leaving it
        if team.leader_id == user_id {
            return Err(FestivalServiceError::LeaderCannotLeave);
        }

        let mut members = team.members.clone();
        let before = members.len();
        members.retain(|member| member.user_id != user_id);
        if members.len() == before {
            // Not on the team; nothing to undo
            return Ok(());
        }

        // Any departure reopens the team, locked or not
        if !self
            .teams
            .update_members(team.id, &members, TeamStatus::Open)
            .await?
        {
            return Err(FestivalServiceError::TeamNotFound);
        }
        self.users.remove_team(user_id, team.id).await?;

        Ok(())
    }
}

// ── RemoveMember ─────────────────────────────────────────────────────────────

pub struct RemoveMemberUseCase<T: TeamRepository, U: UserRepository> {
    pub teams: T,
    pub users: U,
}

impl<T: TeamRepository, U: UserRepository> RemoveMemberUseCase<T, U> {
    pub async fn execute(
        &self,
        caller_id: Uuid,
        key: &str,
        member_id: Uuid,
    ) -> Result<Team, FestivalServiceError> {
        let team = find_team(&self.teams, key).await?;

        if team.leader_id != caller_id {
            return Err(FestivalServiceError::NotTeamLeader);
        }
        if member_id == team.leader_id {
            return Err(FestivalServiceError::CannotRemoveLeader);
        }

        let mut members = team.members.clone();
        let before = members.len();
        members.retain(|member| member.user_id != member_id);
        if members.len() == before {
            return Err(FestivalServiceError::UserNotFound);
        }

        if !self
            .teams
            .update_members(team.id, &members, TeamStatus::Open)
            .await?
        {
            return Err(FestivalServiceError::TeamNotFound);
        }
        self.users.remove_team(member_id, team.id).await?;

        self.teams
            .find_by_id(team.id)
            .await?
            .ok_or(FestivalServiceError::TeamNotFound)
    }
}

// ── DeleteTeam ───────────────────────────────────────────────────────────────

pub struct DeleteTeamUseCase<T: TeamRepository, U: UserRepository, E: EventRepository> {
    pub teams: T,
    pub users: U,
    pub events: E,
}

impl<T: TeamRepository, U: UserRepository, E: EventRepository> DeleteTeamUseCase<T, U, E> {
    pub async fn execute(&self, caller_id: Uuid, key: &str) -> Result<(), FestivalServiceError> {
        let team = find_team(&self.teams, key).await?;

        if team.leader_id != caller_id {
            return Err(FestivalServiceError::NotTeamLeader);
        }

        // 1. Strip the team from every member's side-list first
        for member in &team.members {
            self.users.remove_team(member.user_id, team.id).await?;
        }

        // 2. Drop the row, then release the event slot
        if !self.teams.delete(team.id).await? {
            return Err(FestivalServiceError::TeamNotFound);
        }
        self.events.adjust_current_teams(team.event_id, -1).await?;

        Ok(())
    }
}

// ── ToggleTeamLock ───────────────────────────────────────────────────────────

pub struct ToggleTeamLockUseCase<T: TeamRepository> {
    pub teams: T,
}

impl<T: TeamRepository> ToggleTeamLockUseCase<T> {
    pub async fn execute(&self, caller_id: Uuid, key: &str) -> Result<Team, FestivalServiceError> {
        let team = find_team(&self.teams, key).await?;

        if team.leader_id != caller_id {
            return Err(FestivalServiceError::NotTeamLeader);
        }

        // Unlocking restores whichever state the member count implies
        let next = match team.status {
            TeamStatus::Locked => {
                TeamStatus::for_count(team.current_members, team.max_members)
            }
            _ => TeamStatus::Locked,
        };

        if !self.teams.update_status(team.id, next).await? {
            return Err(FestivalServiceError::TeamNotFound);
        }

        self.teams
            .find_by_id(team.id)
            .await?
            .ok_or(FestivalServiceError::TeamNotFound)
    }
}

// ── GetTeam ──────────────────────────────────────────────────────────────────

pub struct GetTeamUseCase<T: TeamRepository> {
    pub teams: T,
}

impl<T: TeamRepository> GetTeamUseCase<T> {
    pub async fn execute(&self, key: &str) -> Result<Team, FestivalServiceError> {
        find_team(&self.teams, key).await
    }
}

// ── UserTeams ────────────────────────────────────────────────────────────────

pub struct UserTeamsUseCase<T: TeamRepository> {
    pub teams: T,
}

impl<T: TeamRepository> UserTeamsUseCase<T> {
    /// Scan every team and filter on the member list. The `team_ids`
    /// side-list on the account is a denormalized hint; the member list is
    /// the authority.
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Team>, FestivalServiceError> {
        let all = self.teams.list_all().await?;

        Ok(all.into_iter().filter(|team| team.is_member(user_id)).collect())
    }
}

// ── EventTeams ───────────────────────────────────────────────────────────────

pub struct EventTeamsUseCase<T: TeamRepository, E: EventRepository> {
    pub teams: T,
    pub events: E,
}

impl<T: TeamRepository, E: EventRepository> EventTeamsUseCase<T, E> {
    pub async fn execute(&self, event_key: &str) -> Result<Vec<Team>, FestivalServiceError> {
        let event = find_event(&self.events, event_key).await?;

        self.teams.list_by_event(event.id).await
    }
}
