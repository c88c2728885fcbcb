//! Property listings service: CRUD, search, media and chain operations.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::data::ipfs::MediaStorage;
use crate::error::Error;
use crate::models::properties::{
    CreatePropertyRequest, PropertyResponse, SearchQuery, UpdatePropertyRequest,
};
use crate::repository::{ListingsOps, NewProperty, Property, PropertyChanges, User};

use super::auth::authorize_owner;

enum MediaKind {
    Images,
    Documents,
}

pub struct PropertyService {
    repository: Arc<dyn ListingsOps>,
    media: Arc<dyn MediaStorage>,
}

impl PropertyService {
    pub fn new(repository: Arc<dyn ListingsOps>, media: Arc<dyn MediaStorage>) -> Self {
        Self { repository, media }
    }

    pub async fn create(
        &self,
        user: &User,
        request: CreatePropertyRequest,
    ) -> Result<PropertyResponse, Error> {
        let property = self
            .repository
            .create_property(NewProperty {
                title: request.title,
                description: request.description,
                price: request.price,
                currency: request.currency,
                location: request.location,
                bedrooms: request.bedrooms,
                bathrooms: request.bathrooms,
                area: request.area,
                property_type: request.property_type,
                token_id: None,
                owner_address: user.sui_address.clone(),
                is_listed: false,
                images: request.images,
                documents: request.documents,
                created_at: Utc::now(),
                owner_id: user.id,
            })
            .await?;

        info!(target: "property_service::create", property_id = property.id, owner = %user.sui_address, "created listing");

        Ok(property.into())
    }

    pub async fn get(&self, id: i64) -> Result<PropertyResponse, Error> {
        Ok(self.fetch(id).await?.into())
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<PropertyResponse>, Error> {
        let results = self
            .repository
            .search_properties(&query.filter(), query.page_limit(), query.page_offset())
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: i64,
        user: &User,
        request: UpdatePropertyRequest,
    ) -> Result<PropertyResponse, Error> {
        let property = self.fetch(id).await?;
        authorize_owner(property.owner_id, user)?;

        let mut changes = PropertyChanges {
            title: request.title,
            description: request.description,
            price: request.price,
            currency: request.currency,
            location: request.location,
            bedrooms: request.bedrooms,
            bathrooms: request.bathrooms,
            area: request.area,
            property_type: request.property_type,
            token_id: None,
            is_listed: None,
            images: request.images,
            documents: request.documents,
            updated_at: None,
        };
        if changes.is_empty() {
            return Ok(property.into());
        }
        changes.updated_at = Some(Utc::now());

        Ok(self.repository.update_property(id, changes).await?.into())
    }

    /// Upload images to the media store and append their CIDs
    pub async fn attach_images(
        &self,
        id: i64,
        user: &User,
        files: Vec<(String, Vec<u8>)>,
    ) -> Result<Vec<String>, Error> {
        self.attach_media(id, user, MediaKind::Images, files).await
    }

    /// Upload documents to the media store and append their CIDs
    pub async fn attach_documents(
        &self,
        id: i64,
        user: &User,
        files: Vec<(String, Vec<u8>)>,
    ) -> Result<Vec<String>, Error> {
        self.attach_media(id, user, MediaKind::Documents, files)
            .await
    }

    async fn attach_media(
        &self,
        id: i64,
        user: &User,
        kind: MediaKind,
        files: Vec<(String, Vec<u8>)>,
    ) -> Result<Vec<String>, Error> {
        let property = self.fetch(id).await?;
        authorize_owner(property.owner_id, user)?;

        let mut hashes = Vec::with_capacity(files.len());
        for (filename, bytes) in files {
            debug!(target: "property_service::attach_media", property_id = id, filename = %filename, "uploading media");
            hashes.push(self.media.store(&filename, bytes).await?);
        }

        let mut changes = PropertyChanges {
            updated_at: Some(Utc::now()),
            ..Default::default()
        };
        match kind {
            MediaKind::Images => {
                let mut images = property.images;
                images.extend(hashes.iter().cloned());
                changes.images = Some(images);
            }
            MediaKind::Documents => {
                let mut documents = property.documents;
                documents.extend(hashes.iter().cloned());
                changes.documents = Some(documents);
            }
        }
        self.repository.update_property(id, changes).await?;

        Ok(hashes)
    }

    /// Mint the property as an NFT.
    ///
    /// The chain transaction runs through an external integration that is
    /// not wired up; the state checks still apply so clients get accurate
    /// errors.
    pub async fn mint(&self, id: i64, user: &User) -> Result<(), Error> {
        let property = self.fetch(id).await?;
        authorize_owner(property.owner_id, user)?;

        if property.token_id.is_some() {
            return Err(Error::BadRequest("Property is already minted".to_string()));
        }

        Err(Error::NotImplemented(
            "Property minting is not available yet".to_string(),
        ))
    }

    /// Put a minted property up for sale. Same status as [`Self::mint`].
    pub async fn list_for_sale(&self, id: i64, user: &User) -> Result<(), Error> {
        let property = self.fetch(id).await?;
        authorize_owner(property.owner_id, user)?;

        if property.token_id.is_none() {
            return Err(Error::BadRequest(
                "Property must be minted first".to_string(),
            ));
        }

        Err(Error::NotImplemented(
            "Property listing is not available yet".to_string(),
        ))
    }

    async fn fetch(&self, id: i64) -> Result<Property, Error> {
        self.repository
            .get_property_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Property not found".to_string()))
    }
}
