//! In-memory repositories used by handler tests.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::{
    application::{
        dto::{file_dto::FileDTO, user_dto::UserDTO},
        error::ApplicationError,
        repositories::{file_repository::FileRepository, user_repository::UserRepository},
    },
    domain::models::{file::File, user::User},
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    files: BTreeMap<i32, File>,
    next_user_id: i32,
    next_file_id: i32,
}

/// Users and files share one store so deleting a user cascades like the schema does.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repository(&self) -> MemoryUserRepository {
        MemoryUserRepository {
            store: self.clone(),
        }
    }

    pub fn file_repository(&self) -> MemoryFileRepository {
        MemoryFileRepository {
            store: self.clone(),
        }
    }
}

pub struct MemoryUserRepository {
    store: MemoryStore,
}

pub struct MemoryFileRepository {
    store: MemoryStore,
}

fn username_taken(tables: &Tables, username: &str, except: Option<i32>) -> bool {
    tables
        .users
        .values()
        .any(|u| u.username == username && Some(u.id) != except)
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, user: UserDTO) -> Result<User, ApplicationError> {
        let mut tables = self.store.tables.lock().unwrap();
        let mut user: User = user.into();
        if username_taken(&tables, &user.username, None) {
            return Err(ApplicationError::Conflict(
                "username already exists".to_string(),
            ));
        }
        tables.next_user_id += 1;
        user.id = tables.next_user_id;
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> Result<User, ApplicationError> {
        let tables = self.store.tables.lock().unwrap();
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or(ApplicationError::NotFound)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApplicationError> {
        let tables = self.store.tables.lock().unwrap();
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApplicationError> {
        let tables = self.store.tables.lock().unwrap();
        Ok(tables.users.values().cloned().collect())
    }

    async fn update_user(&self, user: UserDTO) -> Result<User, ApplicationError> {
        let mut tables = self.store.tables.lock().unwrap();
        if let Some(username) = &user.username {
            if username_taken(&tables, username, Some(user.id)) {
                return Err(ApplicationError::Conflict(
                    "username already exists".to_string(),
                ));
            }
        }
        let stored = tables
            .users
            .get_mut(&user.id)
            .ok_or(ApplicationError::NotFound)?;
        if let Some(username) = user.username {
            stored.username = username;
        }
        if let Some(password_hash) = user.password_hash {
            stored.password_hash = password_hash;
        }
        if user.nickname.is_some() {
            stored.nickname = user.nickname;
        }
        if user.email.is_some() {
            stored.email = user.email;
        }
        if user.phone.is_some() {
            stored.phone = user.phone;
        }
        if user.address.is_some() {
            stored.address = user.address;
        }
        Ok(stored.clone())
    }

    async fn delete_user(&self, id: i32) -> Result<User, ApplicationError> {
        let mut tables = self.store.tables.lock().unwrap();
        let user = tables.users.remove(&id).ok_or(ApplicationError::NotFound)?;
        tables.files.retain(|_, f| f.owner_id != id);
        Ok(user)
    }

    async fn count_users(&self) -> Result<i64, ApplicationError> {
        let tables = self.store.tables.lock().unwrap();
        Ok(tables.users.len() as i64)
    }
}

#[async_trait]
impl FileRepository for MemoryFileRepository {
    async fn create_file(&self, file: FileDTO) -> Result<File, ApplicationError> {
        let mut tables = self.store.tables.lock().unwrap();
        let mut file: File = file.into();
        tables.next_file_id += 1;
        file.id = tables.next_file_id;
        tables.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn get_file(&self, id: i32) -> Result<File, ApplicationError> {
        let tables = self.store.tables.lock().unwrap();
        tables
            .files
            .get(&id)
            .cloned()
            .ok_or(ApplicationError::NotFound)
    }

    async fn list_visible_files(&self, user_id: i32) -> Result<Vec<File>, ApplicationError> {
        let tables = self.store.tables.lock().unwrap();
        Ok(tables
            .files
            .values()
            .filter(|f| f.is_visible_to(user_id))
            .cloned()
            .collect())
    }

    async fn list_files_by_owner(&self, owner_id: i32) -> Result<Vec<File>, ApplicationError> {
        let tables = self.store.tables.lock().unwrap();
        Ok(tables
            .files
            .values()
            .filter(|f| f.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn update_file(&self, file: FileDTO) -> Result<File, ApplicationError> {
        let mut tables = self.store.tables.lock().unwrap();
        let stored = tables
            .files
            .get_mut(&file.id)
            .ok_or(ApplicationError::NotFound)?;
        if let Some(filename) = file.filename {
            stored.filename = filename;
        }
        if file.filetype.is_some() {
            stored.filetype = file.filetype;
        }
        if let Some(filesize) = file.filesize {
            stored.filesize = filesize;
        }
        if let Some(open_download) = file.open_download {
            stored.open_download = open_download;
        }
        if let Some(owner_id) = file.owner_id {
            stored.owner_id = owner_id;
        }
        Ok(stored.clone())
    }

    async fn delete_file(&self, id: i32) -> Result<File, ApplicationError> {
        let mut tables = self.store.tables.lock().unwrap();
        tables.files.remove(&id).ok_or(ApplicationError::NotFound)
    }

    async fn count_files(&self) -> Result<i64, ApplicationError> {
        let tables = self.store.tables.lock().unwrap();
        Ok(tables.files.len() as i64)
    }

    async fn list_file_types(&self) -> Result<Vec<String>, ApplicationError> {
        let tables = self.store.tables.lock().unwrap();
        let mut types: Vec<String> = tables
            .files
            .values()
            .filter_map(|f| f.filetype.clone())
            .collect();
        types.sort();
        types.dedup();
        Ok(types)
    }
}
