use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::search::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use crate::repository::{Property, PropertyFilter, PropertySort, SortOrder};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub location: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: f64,
    pub property_type: String,
    pub token_id: Option<String>,
    pub owner_address: String,
    pub is_listed: bool,
    pub images: Vec<String>,
    pub documents: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub owner_id: i64,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            title: property.title,
            description: property.description,
            price: property.price,
            currency: property.currency,
            location: property.location,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            area: property.area,
            property_type: property.property_type,
            token_id: property.token_id,
            owner_address: property.owner_address,
            is_listed: property.is_listed,
            images: property.images,
            documents: property.documents,
            created_at: property.created_at,
            updated_at: property.updated_at,
            owner_id: property.owner_id,
        }
    }
}

fn default_currency() -> String {
    "SUI".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePropertyRequest {
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub location: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    /// Square meters
    pub area: f64,
    pub property_type: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
}

/// Partial listing update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<f64>,
    pub property_type: Option<String>,
    pub images: Option<Vec<String>>,
    pub documents: Option<Vec<String>>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

/// Search query parameters for `GET /properties`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub property_type: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub location: Option<String>,
    pub is_listed: Option<bool>,
    #[serde(default)]
    pub sort_by: PropertySort,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl SearchQuery {
    pub fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            query: self.query.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            property_type: self.property_type.clone(),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            min_area: self.min_area,
            max_area: self.max_area,
            location: self.location.clone(),
            is_listed: self.is_listed,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }

    pub fn page_limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_LIMIT)
    }

    pub fn page_offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.page_limit()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub image_hashes: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentUploadResponse {
    pub document_hashes: Vec<String>,
}
