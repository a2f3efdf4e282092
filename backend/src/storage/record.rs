//! # Record Parser
//!
//! Converts one delimited line (or an already split set of fields) into a typed
//! entity. Products are laid out as `id,name,category,price,city`; users as
//! `id,name,email,phone,city`. Only the product price is numeric.
//!
//! Parsing is pure: no I/O, no shared state. Fields are taken as-is after the
//! split, with no trimming.

use shared::{Product, User};

use crate::error::{StorageError, StorageResult};

/// Field separator used by flat-file records
pub const DELIMITER: &str = ",";

/// Number of fields in both record layouts
pub const FIELD_COUNT: usize = 5;

/// An entity that can be read from and written to a delimited record
pub trait Record: Sized {
    /// Column names, in record order
    const HEADER: [&'static str; FIELD_COUNT];

    /// Human-readable entity name used in log lines and errors
    const ENTITY: &'static str;

    /// Build an entity from split fields; `raw` is quoted back in errors
    fn from_fields(fields: &[&str], raw: &str) -> StorageResult<Self>;

    fn to_fields(&self) -> [String; FIELD_COUNT];

    /// Parse one raw line
    fn parse_line(line: &str) -> StorageResult<Self> {
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        Self::from_fields(&fields, line)
    }

    fn to_record_line(&self) -> String {
        self.to_fields().join(DELIMITER)
    }

    fn header_line() -> String {
        Self::HEADER.join(DELIMITER)
    }
}

fn field_count_error(fields: &[&str], raw: &str) -> StorageError {
    StorageError::malformed(
        raw,
        format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
    )
}

/// Parse a price field, naming the whole record on failure
pub fn parse_price(value: &str, raw: &str) -> StorageResult<u32> {
    value.parse::<u32>().map_err(|e| {
        StorageError::malformed(
            raw,
            format!("price '{}' is not a non-negative integer ({})", value, e),
        )
    })
}

impl Record for Product {
    const HEADER: [&'static str; FIELD_COUNT] = [
        "productId",
        "productName",
        "productCategory",
        "price",
        "availableCity",
    ];
    const ENTITY: &'static str = "product";

    fn from_fields(fields: &[&str], raw: &str) -> StorageResult<Self> {
        let [id, name, category, price, city] = fields else {
            return Err(field_count_error(fields, raw));
        };

        let price = parse_price(price, raw)?;
        Ok(Product::new(*id, *name, *category, price, *city))
    }

    fn to_fields(&self) -> [String; FIELD_COUNT] {
        [
            self.id.clone(),
            self.name.clone(),
            self.category.clone(),
            self.price.to_string(),
            self.available_city.clone(),
        ]
    }
}

impl Record for User {
    const HEADER: [&'static str; FIELD_COUNT] = ["userId", "userName", "email", "phoneNumber", "city"];
    const ENTITY: &'static str = "user";

    fn from_fields(fields: &[&str], raw: &str) -> StorageResult<Self> {
        let [id, name, email, phone_number, city] = fields else {
            return Err(field_count_error(fields, raw));
        };

        Ok(User::new(*id, *name, *email, *phone_number, *city))
    }

    fn to_fields(&self) -> [String; FIELD_COUNT] {
        [
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.phone_number.clone(),
            self.city.clone(),
        ]
    }
}
