/// Pure user model for cross-layer use (no serde).
///
/// `firebase_uid` and `email` are immutable once the row exists; everything
/// else may change on later sync calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub firebase_uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub age: Option<i32>,
}

/// Data for creating a new user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub firebase_uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub age: Option<i32>,
}

/// Partial profile data supplied by a sync call. Absent fields are left
/// unchanged on existing rows; `email` is only honored when the row is
/// first created.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub age: Option<i32>,
}
