//! REST calls the gallery editor makes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use showroom_core::categorization::SortOrderUpdate;
use showroom_core::image_type::ImageType;
use showroom_core::types::DbId;

use crate::error::ClientError;
use crate::model::GalleryImage;

/// Server operations behind the gallery editor.
#[async_trait]
pub trait GalleryApi: Send + Sync {
    async fn list_images(&self, vehicle_id: DbId) -> Result<Vec<GalleryImage>, ClientError>;

    /// Persist new sort orders for one gallery bucket.
    async fn reorder_images(
        &self,
        vehicle_id: DbId,
        updates: &[SortOrderUpdate],
    ) -> Result<(), ClientError>;

    async fn update_image_type(
        &self,
        vehicle_id: DbId,
        image_id: DbId,
        image_type: ImageType,
    ) -> Result<(), ClientError>;

    async fn delete_image(&self, vehicle_id: DbId, image_id: DbId) -> Result<(), ClientError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReorderBody<'a> {
    image_updates: &'a [SortOrderUpdate],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageTypeBody {
    image_type: ImageType,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// [`GalleryApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGalleryApi {
    client: reqwest::Client,
    /// e.g. `http://localhost:3000/api/v1`
    base_url: String,
    token: Option<String>,
}

impl HttpGalleryApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Send `Authorization: Bearer {token}` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn images_url(&self, vehicle_id: DbId) -> String {
        format!("{}/vehicles/{vehicle_id}/images", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl GalleryApi for HttpGalleryApi {
    async fn list_images(&self, vehicle_id: DbId) -> Result<Vec<GalleryImage>, ClientError> {
        let response = self
            .authorize(self.client.get(self.images_url(vehicle_id)))
            .send()
            .await?;
        let envelope: DataEnvelope<Vec<GalleryImage>> =
            Self::ensure_success(response).await?.json().await?;
        Ok(envelope.data)
    }

    async fn reorder_images(
        &self,
        vehicle_id: DbId,
        updates: &[SortOrderUpdate],
    ) -> Result<(), ClientError> {
        let url = format!("{}/reorder", self.images_url(vehicle_id));
        let response = self
            .authorize(self.client.patch(url))
            .json(&ReorderBody {
                image_updates: updates,
            })
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn update_image_type(
        &self,
        vehicle_id: DbId,
        image_id: DbId,
        image_type: ImageType,
    ) -> Result<(), ClientError> {
        let url = format!("{}/{image_id}", self.images_url(vehicle_id));
        let response = self
            .authorize(self.client.patch(url))
            .json(&ImageTypeBody { image_type })
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn delete_image(&self, vehicle_id: DbId, image_id: DbId) -> Result<(), ClientError> {
        let url = format!("{}/{image_id}", self.images_url(vehicle_id));
        let response = self.authorize(self.client.delete(url)).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_bodies_are_camel_case() {
        let updates = [SortOrderUpdate { id: 3, sort_order: 0 }];
        let body = serde_json::to_value(ReorderBody {
            image_updates: &updates,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "imageUpdates": [{ "id": 3, "sortOrder": 0 }] })
        );

        let body = serde_json::to_value(ImageTypeBody {
            image_type: ImageType::GALLERY_INTERIOR,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "imageType": "GALLERY_INTERIOR" }));
    }

    #[test]
    fn urls_drop_trailing_slash() {
        let api = HttpGalleryApi::new("http://localhost:3000/api/v1/");
        assert_eq!(api.images_url(4), "http://localhost:3000/api/v1/vehicles/4/images");
    }
}
