use serde::{Deserialize, Serialize};

use crate::contract::model::{NewUser, User, UserPatch};

/// Registration payload: profile data for an account already created with
/// the identity provider. Field names match the mobile client's wire format.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserReq {
    pub firebase_uid: String,
    pub nombre: String,
    pub correo: String,
    pub ciudad: String,
    pub pais: String,
    pub direccion: String,
    pub edad: Option<i32>,
}

/// Sync payload: everything optional, the subject id comes from the token.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SyncUserReq {
    pub nombre: Option<String>,
    pub correo: Option<String>,
    pub ciudad: Option<String>,
    pub pais: Option<String>,
    pub direccion: Option<String>,
    pub edad: Option<i32>,
}

/// The user fields echoed back by `/users/me` and `/users/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummaryDto {
    pub id: i32,
    pub firebase_uid: String,
    pub nombre: Option<String>,
    pub correo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub message: String,
    pub user: UserSummaryDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserSummaryDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    pub status: String,
    pub user: i32,
}

// Conversions between REST DTOs and contract models.

impl From<User> for UserSummaryDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            firebase_uid: user.firebase_uid,
            nombre: user.display_name,
            correo: user.email,
        }
    }
}

impl From<RegisterUserReq> for NewUser {
    fn from(req: RegisterUserReq) -> Self {
        Self {
            firebase_uid: req.firebase_uid,
            email: req.correo,
            display_name: Some(req.nombre),
            city: Some(req.ciudad),
            country: Some(req.pais),
            address: Some(req.direccion),
            age: req.edad,
        }
    }
}

impl From<SyncUserReq> for UserPatch {
    fn from(req: SyncUserReq) -> Self {
        Self {
            email: req.correo,
            display_name: req.nombre,
            city: req.ciudad,
            country: req.pais,
            address: req.direccion,
            age: req.edad,
        }
    }
}
