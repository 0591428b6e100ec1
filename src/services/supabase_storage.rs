use async_trait::async_trait;
use reqwest::{multipart, Client, StatusCode, Url};
use serde_json::json;
use tracing::info;

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::{config::app::SupabaseSecrets, models::file::FileData},
    services::error::StorageError,
};

pub struct SupabaseStorageService {
    client: Client,
    storage_url: String,
    api_key: String,
    bucket_name: String,
}

impl SupabaseStorageService {
    pub fn new(secrets: SupabaseSecrets) -> Self {
        Self {
            client: Client::new(),
            storage_url: secrets.storage_url.trim_end_matches('/').to_string(),
            api_key: secrets.api_key,
            bucket_name: secrets.bucket_name,
        }
    }

    fn object_url(&self, key: &str) -> Result<Url, StorageError> {
        let mut url = Url::parse(&format!(
            "{}/object/{}",
            self.storage_url, self.bucket_name
        ))
        .map_err(|e| StorageError::InvalidCredentials(format!("Invalid storage URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| {
                StorageError::InvalidCredentials("Storage URL cannot carry a path".to_string())
            })?
            .push(key);

        Ok(url)
    }

    fn check_status(status: StatusCode, key: &str, action: &str) -> Result<(), StorageError> {
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(key.to_string()));
        }
        if !status.is_success() {
            return Err(StorageError::ProviderError(format!(
                "{} failed with status: {}",
                action, status
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageService for SupabaseStorageService {
    async fn upload(&self, key: &str, file_data: FileData) -> Result<(), ApplicationError> {
        let url = self.object_url(key)?;
        let size = file_data.size();

        let file_part = multipart::Part::bytes(file_data.content)
            .file_name(file_data.filename)
            .mime_str(&file_data.mime_type)
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        let form = multipart::Form::new().part("file", file_part);

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(StorageError::from)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(
                StorageError::ProviderError(format!("Upload failed: {}", error_text)).into(),
            );
        }

        info!("Uploaded {} bytes to bucket '{}' as {}", size, self.bucket_name, key);
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, ApplicationError> {
        let url = self.object_url(key)?;

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(StorageError::from)?;

        Self::check_status(response.status(), key, "Download")?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, key: &str) -> Result<(), ApplicationError> {
        let url = self.object_url(key)?;

        let response = self
            .client
            .delete(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(StorageError::from)?;

        Self::check_status(response.status(), key, "Delete")?;
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), ApplicationError> {
        let url = format!("{}/object/move", self.storage_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .json(&json!({
                "bucketId": self.bucket_name,
                "sourceKey": from,
                "destinationKey": to,
            }))
            .send()
            .await
            .map_err(StorageError::from)?;

        Self::check_status(response.status(), from, "Move")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SupabaseStorageService {
        SupabaseStorageService::new(SupabaseSecrets {
            storage_url: "https://project.supabase.co/storage/v1/".to_string(),
            api_key: "key".to_string(),
            bucket_name: "files".to_string(),
        })
    }

    #[test]
    fn object_url_escapes_the_key() {
        let url = service().object_url("12_my report#1.pdf").unwrap();
        assert_eq!(
            url.as_str(),
            "https://project.supabase.co/storage/v1/object/files/12_my%20report%231.pdf"
        );
    }

    #[test]
    fn not_found_status_maps_to_not_found() {
        let err = SupabaseStorageService::check_status(StatusCode::NOT_FOUND, "1_a", "Download")
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
        assert!(SupabaseStorageService::check_status(StatusCode::OK, "1_a", "Download").is_ok());
    }
}
