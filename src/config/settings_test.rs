// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::Settings;
use std::io::Write;

#[test]
fn test_defaults_match_listing_site() {
    let settings = Settings::with_defaults().unwrap();

    assert_eq!(settings.engine.container_id, "content");
    assert_eq!(settings.engine.allowed_paths.len(), 5);
    assert!(settings
        .engine
        .allowed_paths
        .contains(&"/property-for-sale".to_string()));
    assert_eq!(settings.selectors.item_class, "propertyWrap");
    assert_eq!(settings.selectors.value_selector, ".icon-floor_area + strong");
    assert_eq!(settings.fetch.marker_header_name, "espc-floor-area-extension");
    assert_eq!(settings.fetch.timeout_secs, None);
    assert_eq!(settings.cache.key_prefix, "floorarea-");
    assert_eq!(settings.cache.fallback_value, "N/A");
}

#[test]
fn test_file_overrides_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[engine]
allowed_paths = ["/lettings"]

[fetch]
timeout_secs = 15

[cache]
fallback_value = "unknown"
"#
    )
    .unwrap();

    let settings = Settings::from_file(file.path()).unwrap();

    assert_eq!(settings.engine.allowed_paths, vec!["/lettings".to_string()]);
    // Untouched keys keep their defaults
    assert_eq!(settings.engine.container_id, "content");
    assert_eq!(settings.fetch.timeout_secs, Some(15));
    assert_eq!(settings.cache.fallback_value, "unknown");
    assert_eq!(settings.cache.key_prefix, "floorarea-");
}
