use crate::domain::models::user::User;

/// Row-shaped user record; `None` fields are left untouched on update.
#[derive(Debug, Clone, Default)]
pub struct UserDTO {
    pub id: i32,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UserDTO {
    /// UserDTO for a partial update of the given user
    pub fn for_update(id: i32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn is_empty_update(&self) -> bool {
        self.username.is_none()
            && self.password_hash.is_none()
            && self.nickname.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        UserDTO {
            id: value.id,
            username: Some(value.username),
            password_hash: Some(value.password_hash),
            nickname: value.nickname,
            email: value.email,
            phone: value.phone,
            address: value.address,
        }
    }
}

impl From<UserDTO> for User {
    fn from(value: UserDTO) -> Self {
        User {
            id: value.id,
            username: value.username.unwrap_or_default(),
            password_hash: value.password_hash.unwrap_or_default(),
            nickname: value.nickname,
            email: value.email,
            phone: value.phone,
            address: value.address,
        }
    }
}
