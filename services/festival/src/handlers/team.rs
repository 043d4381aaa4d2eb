use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lumiere_auth_types::identity::Identity;

use crate::domain::types::{Team, TeamMember, TeamRole};
use crate::error::FestivalServiceError;
use crate::state::AppState;
use crate::usecase::team::{
    CreateTeamInput, CreateTeamUseCase, DeleteTeamUseCase, EventTeamsUseCase, GetTeamUseCase,
    JoinTeamUseCase, LeaveTeamUseCase, RemoveMemberUseCase, ToggleTeamLockUseCase,
    UserTeamsUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TeamMemberResponse {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: TeamRole,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

impl From<TeamMember> for TeamMemberResponse {
    fn from(member: TeamMember) -> Self {
        Self {
            user_id: member.user_id,
            email: member.email,
            name: member.name,
            role: member.role,
            joined_at: member.joined_at,
        }
    }
}

#[derive(Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub team_id: String,
    pub event_id: Uuid,
    pub event_name: String,
    pub team_name: String,
    pub leader_id: Uuid,
    pub leader_email: String,
    pub leader_name: String,
    pub members: Vec<TeamMemberResponse>,
    pub max_members: i32,
    pub current_members: i32,
    pub invite_code: String,
    pub status: &'static str,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "lumiere_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            team_id: team.team_id,
            event_id: team.event_id,
            event_name: team.event_name,
            team_name: team.team_name,
            leader_id: team.leader_id,
            leader_email: team.leader_email,
            leader_name: team.leader_name,
            members: team.members.into_iter().map(Into::into).collect(),
            max_members: team.max_members,
            current_members: team.current_members,
            invite_code: team.invite_code,
            status: team.status.as_str(),
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

// ── POST /teams ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTeamRequest {
    /// Event slug or uuid.
    pub event_id: String,
    pub team_name: String,
}

pub async fn create_team(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateTeamRequest>,
) -> Result<impl IntoResponse, FestivalServiceError> {
    let usecase = CreateTeamUseCase {
        teams: state.team_repo(),
        users: state.user_repo(),
        events: state.event_repo(),
    };
    let team = usecase
        .execute(
            identity.user_id,
            CreateTeamInput {
                event_id: body.event_id,
                team_name: body.team_name,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(team))))
}

// ── POST /teams/join ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct JoinTeamRequest {
    pub invite_code: String,
}

pub async fn join_team(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<JoinTeamRequest>,
) -> Result<Json<TeamResponse>, FestivalServiceError> {
    let usecase = JoinTeamUseCase {
        teams: state.team_repo(),
        users: state.user_repo(),
    };
    let team = usecase.execute(identity.user_id, &body.invite_code).await?;
    Ok(Json(team.into()))
}

// ── GET /teams/@me ───────────────────────────────────────────────────────────

pub async fn my_teams(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamResponse>>, FestivalServiceError> {
    let usecase = UserTeamsUseCase {
        teams: state.team_repo(),
    };
    let teams = usecase.execute(identity.user_id).await?;
    Ok(Json(teams.into_iter().map(Into::into).collect()))
}

// ── GET /teams/{team_id} ─────────────────────────────────────────────────────

pub async fn get_team(
    _identity: Identity,
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamResponse>, FestivalServiceError> {
    let usecase = GetTeamUseCase {
        teams: state.team_repo(),
    };
    let team = usecase.execute(&team_id).await?;
    Ok(Json(team.into()))
}

// ── DELETE /teams/{team_id} ──────────────────────────────────────────────────

pub async fn delete_team(
    identity: Identity,
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<StatusCode, FestivalServiceError> {
    let usecase = DeleteTeamUseCase {
        teams: state.team_repo(),
        users: state.user_repo(),
        events: state.event_repo(),
    };
    usecase.execute(identity.user_id, &team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /teams/{team_id}/leave ──────────────────────────────────────────────

pub async fn leave_team(
    identity: Identity,
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<StatusCode, FestivalServiceError> {
    let usecase = LeaveTeamUseCase {
        teams: state.team_repo(),
        users: state.user_repo(),
    };
    usecase.execute(identity.user_id, &team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /teams/{team_id}/members/{user_id} ────────────────────────────────

pub async fn remove_member(
    identity: Identity,
    State(state): State<AppState>,
    Path((team_id, user_id)): Path<(String, Uuid)>,
) -> Result<Json<TeamResponse>, FestivalServiceError> {
    let usecase = RemoveMemberUseCase {
        teams: state.team_repo(),
        users: state.user_repo(),
    };
    let team = usecase.execute(identity.user_id, &team_id, user_id).await?;
    Ok(Json(team.into()))
}

// ── PATCH /teams/{team_id}/lock ──────────────────────────────────────────────

pub async fn toggle_lock(
    identity: Identity,
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamResponse>, FestivalServiceError> {
    let usecase = ToggleTeamLockUseCase {
        teams: state.team_repo(),
    };
    let team = usecase.execute(identity.user_id, &team_id).await?;
    Ok(Json(team.into()))
}

// ── GET /events/{event_id}/teams ─────────────────────────────────────────────

pub async fn event_teams(
    _identity: Identity,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<TeamResponse>>, FestivalServiceError> {
    let usecase = EventTeamsUseCase {
        teams: state.team_repo(),
        events: state.event_repo(),
    };
    let teams = usecase.execute(&event_id).await?;
    Ok(Json(teams.into_iter().map(Into::into).collect()))
}
