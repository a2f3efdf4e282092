use serde::{Deserialize, Serialize};

/// A product listed in the catalogue together with the city it ships to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier, e.g. "P1001"
    pub id: String,
    pub name: String,
    pub category: String,
    /// Price in whole currency units
    pub price: u32,
    /// Free-form availability location, matched by substring against a user's city
    pub available_city: String,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: u32,
        available_city: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            available_city: available_city.into(),
        }
    }
}

/// A registered user; the city decides which products they can see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier, e.g. "U1001"
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub city: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            city: city.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAvailabilityResponse {
    pub user_id: String,
    pub category: Option<String>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
