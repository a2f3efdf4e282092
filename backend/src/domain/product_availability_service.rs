use shared::{Product, User};
use tracing::{debug, info, warn};

use crate::error::{AvailabilityError, StorageResult};
use crate::storage::{BackendSelector, ProductStorage, UserStorage};

/// Answers "which products can this user get" from an in-memory snapshot of
/// every product and user.
///
/// The snapshot is taken once, when the service is built, and never
/// refreshed; build a new service to see later changes in the backend.
/// Construction fails if either list cannot be loaded, so a service value is
/// always fully loaded.
#[derive(Debug, Clone)]
pub struct ProductAvailabilityService {
    products: Vec<Product>,
    users: Vec<User>,
}

impl ProductAvailabilityService {
    /// Load both lists from the given stores
    pub async fn load<P, U>(product_storage: &P, user_storage: &U) -> StorageResult<Self>
    where
        P: ProductStorage + ?Sized,
        U: UserStorage + ?Sized,
    {
        info!("Loading product availability snapshot");

        let products = product_storage.list_products().await?;
        let users = user_storage.list_users().await?;

        info!("Snapshot ready: {} products, {} users", products.len(), users.len());
        Ok(Self { products, users })
    }

    /// Load both lists from the stores chosen by a selector
    pub async fn from_selector(selector: &BackendSelector) -> StorageResult<Self> {
        let product_store = selector.product_store()?;
        let user_store = selector.user_store()?;
        Self::load(&product_store, &user_store).await
    }

    /// Build a service over lists that are already in memory
    pub fn from_snapshot(products: Vec<Product>, users: Vec<User>) -> Self {
        Self { products, users }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Find a user by ID, ignoring case. The first match wins.
    pub fn find_user(&self, user_id: &str) -> Result<&User, AvailabilityError> {
        self.users
            .iter()
            .find(|user| eq_ignore_case(&user.id, user_id))
            .ok_or_else(|| {
                warn!("User not found: {}", user_id);
                AvailabilityError::UserNotFound {
                    user_id: user_id.to_string(),
                }
            })
    }

    /// Every product whose availability city contains the user's city.
    ///
    /// Matching is a case-sensitive substring test, so a user in "York" sees
    /// products available in "New York City". Product order is preserved.
    pub fn products_for_user(&self, user_id: &str) -> Result<Vec<Product>, AvailabilityError> {
        let user = self.find_user(user_id)?;
        let city = user.city.as_str();

        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|product| product.available_city.contains(city))
            .cloned()
            .collect();

        debug!("Found {} products in {} for user {}", products.len(), city, user_id);
        Ok(products)
    }

    /// `products_for_user` narrowed to one category (exact match, ignoring case)
    pub fn products_for_user_in_category(
        &self,
        user_id: &str,
        category: &str,
    ) -> Result<Vec<Product>, AvailabilityError> {
        let products: Vec<Product> = self
            .products_for_user(user_id)?
            .into_iter()
            .filter(|product| eq_ignore_case(&product.category, category))
            .collect();

        debug!("Found {} {} products for user {}", products.len(), category, user_id);
        Ok(products)
    }
}

/// Case-insensitive equality over Unicode lowercase mappings ("Café" == "CAFÉ")
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
