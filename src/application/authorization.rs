use crate::{
    application::error::ApplicationError,
    domain::models::{file::File, identity::AuthenticatedUser},
};

/// Permits the caller only when it owns the resource.
pub fn ensure_owner(owner_id: i32, user: &AuthenticatedUser) -> Result<(), ApplicationError> {
    if owner_id == user.id {
        Ok(())
    } else {
        Err(ApplicationError::Forbidden)
    }
}

pub fn ensure_visible(file: &File, user: &AuthenticatedUser) -> Result<(), ApplicationError> {
    if file.is_visible_to(user.id) {
        Ok(())
    } else {
        Err(ApplicationError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(id: i32) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            username: None,
        }
    }

    #[test]
    fn owner_is_permitted() {
        assert!(ensure_owner(3, &caller(3)).is_ok());
    }

    #[test]
    fn other_user_is_forbidden() {
        assert!(matches!(
            ensure_owner(3, &caller(4)),
            Err(ApplicationError::Forbidden)
        ));
    }

    #[test]
    fn open_download_files_are_visible_to_everyone() {
        let file = File {
            id: 1,
            owner_id: 3,
            open_download: true,
            ..Default::default()
        };
        assert!(ensure_visible(&file, &caller(9)).is_ok());

        let private = File {
            open_download: false,
            ..file
        };
        assert!(matches!(
            ensure_visible(&private, &caller(9)),
            Err(ApplicationError::Forbidden)
        ));
        assert!(ensure_visible(&private, &caller(3)).is_ok());
    }
}
