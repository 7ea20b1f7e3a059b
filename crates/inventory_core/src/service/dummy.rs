//! Placeholder product generation for demos and smoke checks.

use crate::model::product::NewProduct;
use uuid::Uuid;

const DUMMY_NAMES: [&str; 10] = [
    "Super Soft Icon T-Shirt",
    "AirFlex + Patched Stacked Skinny Jean",
    "Super Soft Icon Cargo Jogger",
    "Super Soft Vintage Vault Graphic T-Shirt",
    "Cozy Cabin Flannel",
    "Super Soft Thermal Hoodie Tee",
    "AirFlex + 5.5\" Denim Short",
    "Flex Longer Length Cargo Short",
    "Space Dye 3\" Classic Trunk Underwear",
    "Skate Sneaker",
];

const DUMMY_SUPPLIERS: [&str; 5] = [
    "Grainger Industrial Supply",
    "Hudson Wholesale Inc.",
    "Regards Wholesale",
    "Garment Center Supplier Association",
    "eFashion Wholesale",
];

const PRICE_BOUND: u16 = 10_000;
const QUANTITY_BOUND: u16 = 1_000;
/// Seed bytes used as picture data. Bytes 6 and 8 of a v4 uuid carry the
/// version and variant bits.
const PICTURE_BYTES: std::ops::Range<usize> = 10..14;

/// Builds a random valid product.
pub fn random_dummy_product() -> NewProduct {
    dummy_product_from_seed(*Uuid::new_v4().as_bytes())
}

/// Builds a valid product deterministically from 16 seed bytes.
///
/// Price falls in `0..10000`, quantity in `0..1000`, picture is 4 bytes.
pub fn dummy_product_from_seed(seed: [u8; 16]) -> NewProduct {
    let name = DUMMY_NAMES[usize::from(seed[0]) % DUMMY_NAMES.len()];
    let supplier = DUMMY_SUPPLIERS[usize::from(seed[1]) % DUMMY_SUPPLIERS.len()];
    let price = u16::from_le_bytes([seed[2], seed[3]]) % PRICE_BOUND;
    let quantity = u16::from_le_bytes([seed[4], seed[5]]) % QUANTITY_BOUND;

    NewProduct::new(
        name,
        i64::from(price),
        i64::from(quantity),
        supplier,
        seed[PICTURE_BYTES].to_vec(),
    )
}
