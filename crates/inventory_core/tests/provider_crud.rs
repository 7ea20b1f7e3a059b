use inventory_core::{
    ColumnValue, ContentValues, Locator, ProductProvider, ProviderConfig, ProviderError,
    ValidationError,
};

fn red_shirt() -> ContentValues {
    ContentValues::new()
        .with("name", "Red T-Shirt")
        .with("price", 1000)
        .with("quantity", 10)
        .with("supplier", "Garment District")
        .with("picture", vec![0_u8, 1, 2, 3])
}

fn product(name: &str, price: i64, quantity: i64) -> ContentValues {
    ContentValues::new()
        .with("name", name)
        .with("price", price)
        .with("quantity", quantity)
        .with("supplier", "Hudson Wholesale Inc.")
        .with("picture", Vec::<u8>::new())
}

fn row_count(provider: &ProductProvider) -> usize {
    provider
        .query(&provider.collection_uri(), None, None, &[], None)
        .unwrap()
        .len()
}

#[test]
fn insert_valid_values_returns_item_locator() {
    let provider = ProductProvider::in_memory().unwrap();

    let uri = provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();

    match provider.matcher().classify(&uri) {
        Some(Locator::Item(id)) => assert!(id > 0),
        other => panic!("expected item locator, got {other:?}"),
    }
    assert!(uri.starts_with(&provider.collection_uri()));
}

#[test]
fn insert_with_missing_columns_is_rejected() {
    let provider = ProductProvider::in_memory().unwrap();
    let values = ContentValues::new().with("name", "Blue T-Shirt");

    let err = provider.insert(&provider.collection_uri(), &values).unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Validation(ValidationError::IncompleteInsert { .. })
    ));
    assert_eq!(row_count(&provider), 0);
}

#[test]
fn insert_with_negative_price_is_rejected() {
    let provider = ProductProvider::in_memory().unwrap();
    let values = ContentValues::new()
        .with("name", "Yellow T-Shirt")
        .with("price", -23)
        .with("quantity", 55)
        .with("supplier", "Bed Bath and Beyond")
        .with("picture", vec![4_u8, 5, 6, 7]);

    let err = provider.insert(&provider.collection_uri(), &values).unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Validation(ValidationError::Negative { .. })
    ));
    assert_eq!(row_count(&provider), 0);
}

#[test]
fn insert_rejects_invalid_values_of_every_kind() {
    let provider = ProductProvider::in_memory().unwrap();
    let collection = provider.collection_uri();

    let cases = [
        red_shirt().with("quantity", -1),
        red_shirt().with("name", ""),
        red_shirt().with("supplier", ""),
        red_shirt().with("price", "1000"),
        red_shirt().with("picture", ColumnValue::Null),
        red_shirt().with("_id", 5),
    ];
    for values in cases {
        let err = provider.insert(&collection, &values).unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)), "{values:?}");
    }
    assert_eq!(row_count(&provider), 0);
}

#[test]
fn insert_on_item_or_unknown_locator_fails() {
    let provider = ProductProvider::in_memory().unwrap();

    let item_err = provider.insert(&provider.item_uri(1), &red_shirt()).unwrap_err();
    assert!(matches!(item_err, ProviderError::UnsupportedInsertTarget(_)));

    let unknown_err = provider
        .insert("content://inventory.tracker/suppliers", &red_shirt())
        .unwrap_err();
    assert!(matches!(unknown_err, ProviderError::UnrecognizedLocator(_)));
    assert_eq!(row_count(&provider), 0);
}

#[test]
fn query_collection_exposes_every_column_by_name() {
    let provider = ProductProvider::in_memory().unwrap();
    provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();
    provider
        .insert(&provider.collection_uri(), &product("Cozy Cabin Flannel", 4500, 3))
        .unwrap();

    let cursor = provider
        .query(&provider.collection_uri(), None, None, &[], None)
        .unwrap();

    assert_eq!(cursor.len(), 2);
    assert_eq!(
        cursor.columns(),
        ["_id", "name", "price", "quantity", "supplier", "picture"]
    );
    assert_eq!(cursor.get_str(0, "name"), Some("Red T-Shirt"));
    assert_eq!(cursor.get_i64(0, "price"), Some(1000));
    assert_eq!(cursor.get_i64(0, "quantity"), Some(10));
    assert_eq!(cursor.get_str(0, "supplier"), Some("Garment District"));
    assert_eq!(cursor.get_blob(0, "picture"), Some(&[0_u8, 1, 2, 3][..]));
    assert_eq!(cursor.get_blob(1, "picture"), Some(&[][..]));
}

#[test]
fn query_empty_collection_returns_empty_cursor() {
    let provider = ProductProvider::in_memory().unwrap();
    let cursor = provider
        .query(&provider.collection_uri(), None, None, &[], None)
        .unwrap();
    assert!(cursor.is_empty());
    assert_eq!(cursor.notification_locator(), Locator::Collection);
}

#[test]
fn insert_then_query_item_round_trips_values() {
    let provider = ProductProvider::in_memory().unwrap();
    let uri = provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();

    let products = provider
        .query(&uri, None, None, &[], None)
        .unwrap()
        .products()
        .unwrap();

    assert_eq!(products.len(), 1);
    let stored = &products[0];
    assert_eq!(Some(Locator::Item(stored.id)), provider.matcher().classify(&uri));
    assert_eq!(stored.to_new_product().to_content_values(), red_shirt());
}

#[test]
fn query_item_ignores_caller_selection() {
    let provider = ProductProvider::in_memory().unwrap();
    provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();
    let uri = provider
        .insert(&provider.collection_uri(), &product("Skate Sneaker", 6000, 1))
        .unwrap();

    let cursor = provider
        .query(&uri, None, Some("name = ?"), &["Red T-Shirt"], None)
        .unwrap();

    assert_eq!(cursor.len(), 1);
    assert_eq!(cursor.get_str(0, "name"), Some("Skate Sneaker"));
}

#[test]
fn query_collection_applies_selection_projection_and_sort() {
    let provider = ProductProvider::in_memory().unwrap();
    for (name, price) in [("a", 300), ("b", 100), ("c", 200)] {
        provider
            .insert(&provider.collection_uri(), &product(name, price, 1))
            .unwrap();
    }

    let cursor = provider
        .query(
            &provider.collection_uri(),
            Some(&["name", "price"][..]),
            Some("price >= ?"),
            &["200"],
            Some("price DESC"),
        )
        .unwrap();

    assert_eq!(cursor.columns(), ["name", "price"]);
    assert_eq!(cursor.len(), 2);
    assert_eq!(cursor.get_str(0, "name"), Some("a"));
    assert_eq!(cursor.get_str(1, "name"), Some("c"));
    assert_eq!(cursor.get(0, "supplier"), None);
}

#[test]
fn query_rejects_unknown_projection_and_sort_columns() {
    let provider = ProductProvider::in_memory().unwrap();
    let collection = provider.collection_uri();

    let projection_err = provider
        .query(&collection, Some(&["color"][..]), None, &[], None)
        .unwrap_err();
    assert!(matches!(projection_err, ProviderError::InvalidQuery(_)));

    let sort_err = provider
        .query(&collection, None, None, &[], Some("color"))
        .unwrap_err();
    assert!(matches!(sort_err, ProviderError::InvalidQuery(_)));
}

#[test]
fn query_accepts_column_names_in_any_case() {
    let provider = ProductProvider::in_memory().unwrap();
    for (name, price) in [("a", 100), ("b", 300)] {
        provider
            .insert(&provider.collection_uri(), &product(name, price, 1))
            .unwrap();
    }

    let cursor = provider
        .query(
            &provider.collection_uri(),
            Some(&["NAME", "Price"][..]),
            None,
            &[],
            Some("PRICE DESC"),
        )
        .unwrap();

    assert_eq!(cursor.columns(), ["name", "price"]);
    assert_eq!(cursor.get_str(0, "name"), Some("b"));
    assert_eq!(cursor.get_i64(1, "price"), Some(100));
}

#[test]
fn query_with_malformed_selection_is_storage_failure() {
    let provider = ProductProvider::in_memory().unwrap();
    let err = provider
        .query(&provider.collection_uri(), None, Some("price >"), &[], None)
        .unwrap_err();
    assert!(matches!(err, ProviderError::Storage(_)));
}

#[test]
fn query_unrecognized_locator_fails() {
    let provider = ProductProvider::in_memory().unwrap();
    for locator in [
        "content://inventory.tracker/products/0",
        "content://inventory.tracker/products/abc",
        "content://elsewhere/products",
    ] {
        let err = provider.query(locator, None, None, &[], None).unwrap_err();
        assert!(matches!(err, ProviderError::UnrecognizedLocator(_)), "{locator}");
    }
}

#[test]
fn repeated_queries_without_writes_are_identical() {
    let provider = ProductProvider::in_memory().unwrap();
    provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();
    provider
        .insert(&provider.collection_uri(), &product("Cozy Cabin Flannel", 4500, 3))
        .unwrap();

    let first = provider
        .query(&provider.collection_uri(), None, None, &[], None)
        .unwrap();
    let second = provider
        .query(&provider.collection_uri(), None, None, &[], None)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn update_valid_picture_on_collection_returns_row_count() {
    let provider = ProductProvider::in_memory().unwrap();
    let values = ContentValues::new().with("picture", vec![8_u8, 9, 10, 11]);

    let empty_count = provider
        .update(&provider.collection_uri(), &values, None, &[])
        .unwrap();
    assert_eq!(empty_count, 0);

    provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();
    provider
        .insert(&provider.collection_uri(), &product("Skate Sneaker", 6000, 1))
        .unwrap();
    let count = provider
        .update(&provider.collection_uri(), &values, None, &[])
        .unwrap();
    assert_eq!(count, 2);

    let cursor = provider
        .query(&provider.collection_uri(), None, None, &[], None)
        .unwrap();
    assert_eq!(cursor.get_blob(1, "picture"), Some(&[8_u8, 9, 10, 11][..]));
    assert_eq!(cursor.get_str(1, "name"), Some("Skate Sneaker"));
}

#[test]
fn update_negative_price_fails_and_leaves_rows_untouched() {
    let provider = ProductProvider::in_memory().unwrap();
    provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();
    let values = ContentValues::new().with("price", -616);

    let err = provider
        .update(&provider.collection_uri(), &values, None, &[])
        .unwrap_err();

    assert!(matches!(err, ProviderError::Validation(_)));
    let cursor = provider
        .query(&provider.collection_uri(), None, None, &[], None)
        .unwrap();
    assert_eq!(cursor.get_i64(0, "price"), Some(1000));
}

#[test]
fn update_rejects_empty_text_and_identifier_changes() {
    let provider = ProductProvider::in_memory().unwrap();
    let uri = provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();

    for values in [
        ContentValues::new().with("name", ""),
        ContentValues::new().with("supplier", ""),
        ContentValues::new().with("quantity", -5),
        ContentValues::new().with("_id", 99),
    ] {
        let err = provider.update(&uri, &values, None, &[]).unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)), "{values:?}");
    }
}

#[test]
fn update_validation_runs_before_locator_classification() {
    let provider = ProductProvider::in_memory().unwrap();
    let values = ContentValues::new().with("price", -1);

    let err = provider
        .update("content://elsewhere/products", &values, None, &[])
        .unwrap_err();

    assert!(matches!(err, ProviderError::Validation(_)));
}

#[test]
fn update_with_empty_values_is_a_no_op_even_for_unknown_locator() {
    let provider = ProductProvider::in_memory().unwrap();
    let count = provider
        .update("content://elsewhere/products", &ContentValues::new(), None, &[])
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn update_item_only_touches_that_row() {
    let provider = ProductProvider::in_memory().unwrap();
    provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();
    let uri = provider
        .insert(&provider.collection_uri(), &product("Skate Sneaker", 6000, 1))
        .unwrap();

    let count = provider
        .update(
            &uri,
            &ContentValues::new().with("quantity", 7).with("price", 5500),
            Some("1 = 1"),
            &[],
        )
        .unwrap();
    assert_eq!(count, 1);

    let products = provider
        .query(&provider.collection_uri(), None, None, &[], None)
        .unwrap()
        .products()
        .unwrap();
    assert_eq!((products[0].price, products[0].quantity), (1000, 10));
    assert_eq!((products[1].price, products[1].quantity), (5500, 7));
}

#[test]
fn update_missing_item_returns_zero() {
    let provider = ProductProvider::in_memory().unwrap();
    let count = provider
        .update(
            &provider.item_uri(404),
            &ContentValues::new().with("quantity", 1),
            None,
            &[],
        )
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn update_unrecognized_locator_fails() {
    let provider = ProductProvider::in_memory().unwrap();
    let err = provider
        .update(
            "content://inventory.tracker/stock",
            &ContentValues::new().with("quantity", 1),
            None,
            &[],
        )
        .unwrap_err();
    assert!(matches!(err, ProviderError::UnrecognizedLocator(_)));
}

#[test]
fn delete_collection_without_filter_removes_all_rows() {
    let provider = ProductProvider::in_memory().unwrap();
    assert_eq!(provider.delete(&provider.collection_uri(), None, &[]).unwrap(), 0);

    for name in ["a", "b", "c"] {
        provider
            .insert(&provider.collection_uri(), &product(name, 1, 1))
            .unwrap();
    }

    let removed = provider.delete(&provider.collection_uri(), None, &[]).unwrap();
    assert_eq!(removed, 3);
    assert_eq!(row_count(&provider), 0);
}

#[test]
fn delete_collection_with_selection_removes_matching_rows() {
    let provider = ProductProvider::in_memory().unwrap();
    for (name, quantity) in [("a", 0), ("b", 4), ("c", 0)] {
        provider
            .insert(&provider.collection_uri(), &product(name, 1, quantity))
            .unwrap();
    }

    let removed = provider
        .delete(&provider.collection_uri(), Some("quantity = ?"), &["0"])
        .unwrap();

    assert_eq!(removed, 2);
    let cursor = provider
        .query(&provider.collection_uri(), None, None, &[], None)
        .unwrap();
    assert_eq!(cursor.len(), 1);
    assert_eq!(cursor.get_str(0, "name"), Some("b"));
}

#[test]
fn delete_item_removes_only_that_row() {
    let provider = ProductProvider::in_memory().unwrap();
    let keep = provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();
    let remove = provider
        .insert(&provider.collection_uri(), &product("Skate Sneaker", 6000, 1))
        .unwrap();

    assert_eq!(provider.delete(&remove, None, &[]).unwrap(), 1);
    assert_eq!(provider.delete(&remove, None, &[]).unwrap(), 0);
    assert_eq!(provider.query(&keep, None, None, &[], None).unwrap().len(), 1);
}

#[test]
fn delete_item_ignores_caller_selection() {
    let provider = ProductProvider::in_memory().unwrap();
    let keep = provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();
    let remove = provider
        .insert(&provider.collection_uri(), &product("Skate Sneaker", 6000, 1))
        .unwrap();

    let removed = provider.delete(&remove, Some("1 = 1"), &[]).unwrap();

    assert_eq!(removed, 1);
    assert_eq!(row_count(&provider), 1);
    assert_eq!(provider.query(&keep, None, None, &[], None).unwrap().len(), 1);
}

#[test]
fn delete_unrecognized_locator_fails() {
    let provider = ProductProvider::in_memory().unwrap();
    let err = provider
        .delete("content://inventory.tracker/", None, &[])
        .unwrap_err();
    assert!(matches!(err, ProviderError::UnrecognizedLocator(_)));
}

#[test]
fn get_type_reports_dir_and_item_mime_types() {
    let provider = ProductProvider::in_memory().unwrap();
    assert_eq!(
        provider.get_type(&provider.collection_uri()).as_deref(),
        Some("vnd.android.cursor.dir/inventory.tracker/products")
    );
    assert_eq!(
        provider.get_type(&provider.item_uri(3)).as_deref(),
        Some("vnd.android.cursor.item/inventory.tracker/products")
    );
    assert_eq!(provider.get_type("content://elsewhere/products"), None);
}

#[test]
fn custom_authority_is_honored() {
    let provider = ProductProvider::new(ProviderConfig {
        authority: "com.example.shop".to_string(),
        ..ProviderConfig::in_memory()
    })
    .unwrap();

    assert_eq!(provider.collection_uri(), "content://com.example.shop/products");
    provider.insert(&provider.collection_uri(), &red_shirt()).unwrap();
    let err = provider
        .query("content://inventory.tracker/products", None, None, &[], None)
        .unwrap_err();
    assert!(matches!(err, ProviderError::UnrecognizedLocator(_)));
}

#[test]
fn invalid_authority_is_rejected_at_construction() {
    let result = ProductProvider::new(ProviderConfig {
        authority: "bad authority".to_string(),
        ..ProviderConfig::in_memory()
    });
    assert!(matches!(result, Err(ProviderError::InvalidConfig(_))));
}

#[test]
fn file_backed_provider_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProviderConfig {
        location: inventory_core::DbLocation::File(dir.path().join("products.db")),
        ..ProviderConfig::default()
    };

    let first = ProductProvider::new(config.clone()).unwrap();
    let uri = first.insert(&first.collection_uri(), &red_shirt()).unwrap();
    drop(first);

    let second = ProductProvider::new(config).unwrap();
    let cursor = second.query(&uri, None, None, &[], None).unwrap();
    assert_eq!(cursor.get_str(0, "name"), Some("Red T-Shirt"));
}
