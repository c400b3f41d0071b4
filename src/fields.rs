//! # Column names of a retail transactions table
//!
//! Names are exact and case-sensitive.
//!

pub const CARDS_NUMBER: &str = "cards_number";
pub const RECEIPT_ID: &str = "receipt_id";
pub const DATE_TIME: &str = "date-time";
pub const STORE_NAME: &str = "store_name";
pub const COORDINATES: &str = "coordinates";
pub const TOTAL_COST: &str = "total_cost";
pub const PRICE: &str = "price";
pub const NUMBER_OF_PRODUCTS: &str = "number_of_products";
pub const CATEGORIES: &str = "categories";
pub const BRANDS: &str = "brands";

/// Every column a raw transactions table must carry
pub const REQUIRED: [&str; 10] = [
    CARDS_NUMBER,
    RECEIPT_ID,
    DATE_TIME,
    STORE_NAME,
    COORDINATES,
    TOTAL_COST,
    PRICE,
    NUMBER_OF_PRODUCTS,
    CATEGORIES,
    BRANDS,
];
